use super::{AnyDisplay, Spinner};

struct Plain;

#[async_trait::async_trait]
impl AnyDisplay for Plain {
    async fn start_spinning(&self) -> Spinner {
        Spinner::start_empty()
    }

    async fn show_log(&self, line: &str) {
        eprintln!("{}", line.trim_end());
    }

    /// GitHub Actions folds everything between these two workflow commands.
    async fn show_message(&self, role: &str, text: &str) {
        println!("::group::{role}\n{}\n::endgroup::", text.trim_end());
    }
}

/// Linear stdout display: one log group per message.
pub fn make_display() -> std::sync::Arc<dyn AnyDisplay> {
    std::sync::Arc::new(Plain)
}
