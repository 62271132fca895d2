//! Chat messages as the completion API expects them.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
}

impl Message {
    pub fn role(&self) -> &'static str {
        match self {
            Message::System(_) => "system",
            Message::User(_) => "user",
            Message::Assistant(_) => "assistant",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Message::System(s) | Message::User(s) | Message::Assistant(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_role_and_content() {
        let json = serde_json::to_value(Message::Assistant("readfiles ./a".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "role": "assistant", "content": "readfiles ./a" })
        );
        let back: Message =
            serde_json::from_value(serde_json::json!({ "role": "user", "content": "hi" })).unwrap();
        assert_eq!(back, Message::User("hi".into()));
        assert_eq!(back.role(), "user");
    }
}
