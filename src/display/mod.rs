use std::sync::Arc;

mod plain;
mod rich;
mod spinner;

pub use spinner::Spinner;

/// Object-safe display interface used by CLI components.
#[async_trait::async_trait]
pub trait AnyDisplay: Send + Sync {
    /// Return a guard that will stop the spinner when dropped.
    async fn start_spinning(&self) -> Spinner;

    /// Append a text line to the technical readout.
    async fn show_log(&self, line: &str);

    /// Show one whole conversation message under its role.
    async fn show_message(&self, role: &str, text: &str);
}

/// Dynamically chosen display backend used by CLI components.
pub type Display = Arc<dyn AnyDisplay>;

/// Inside GitHub Actions, print collapsible groups; on a terminal, color.
pub fn make_display() -> Display {
    if std::env::var("GITHUB_ACTIONS").is_ok() {
        return plain::make_display();
    }
    if atty::is(atty::Stream::Stderr) {
        return rich::make_display();
    }
    plain::make_display()
}

pub use plain::make_display as make_plain_display;
