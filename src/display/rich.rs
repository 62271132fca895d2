use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::sync::Arc;

use super::{AnyDisplay, Spinner};

/// Colorful stderr rendering with a spinner while the model is busy.
struct RichDisplay;

fn role_color(role: &str) -> Color {
    match role {
        "assistant" => Color::DarkYellow,
        "user" => Color::DarkGreen,
        _ => Color::DarkGrey,
    }
}

#[async_trait::async_trait]
impl AnyDisplay for RichDisplay {
    async fn start_spinning(&self) -> Spinner {
        Spinner::start()
    }

    async fn show_log(&self, line: &str) {
        let line = line.trim_end();
        let _ = crossterm::execute!(
            std::io::stderr(),
            SetForegroundColor(Color::DarkCyan),
            Print("| "),
            Print(line),
            ResetColor,
            Print("\n"),
        );
    }

    async fn show_message(&self, role: &str, text: &str) {
        let _ = crossterm::execute!(
            std::io::stderr(),
            SetForegroundColor(role_color(role)),
            SetAttribute(Attribute::Bold),
            Print(role),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n"),
            Print(text.trim_end()),
            Print("\n\n"),
        );
    }
}

pub fn make_display() -> Arc<dyn AnyDisplay> {
    Arc::new(RichDisplay)
}
