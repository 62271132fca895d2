//! The conversation log, threaded through every turn.
use crate::prompting::{COMMANDS, OPENING};
use crate::protocol::Message;

/// Ordered messages exchanged with the model. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Replace each `¶name` in `template` in one pass, so inserted values are never rescanned.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(at) = rest.find('¶') {
        out.push_str(&rest[..at]);
        let after = &rest[at + '¶'.len_utf8()..];
        match values.iter().find(|(name, _)| after.starts_with(name)) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len()..];
            }
            None => {
                out.push('¶');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Start a conversation with the issue, the command help, and the checkout listing.
pub fn make_history(issue_number: &str, issue_text: &str, files: &[String]) -> Conversation {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    let prompt = fill(
        OPENING,
        &[
            ("commands", COMMANDS.trim_end()),
            ("files", files.join(", ").as_str()),
            ("today", now.date().to_string().as_str()),
            ("issue", issue_number),
            ("text", issue_text),
        ],
    );
    Conversation {
        messages: vec![Message::User(prompt)],
    }
}
