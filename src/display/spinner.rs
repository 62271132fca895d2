//! Progress indicator shown on stderr while a completion request is in flight.

use crossterm::cursor;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::time::{Duration, Instant};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(120);

fn status(frame: &str, waited: Duration) -> String {
    format!("{frame} waiting for the model ({}s)", waited.as_secs())
}

async fn animate() {
    let started = Instant::now();
    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(stderr, cursor::Hide);
    for frame in FRAMES.iter().cycle() {
        let _ = crossterm::execute!(
            stderr,
            Print("\r"),
            SetForegroundColor(Color::DarkGrey),
            Print(status(frame, started.elapsed())),
            ResetColor
        );
        tokio::time::sleep(TICK).await;
    }
}

fn erase() {
    let _ = crossterm::execute!(
        std::io::stderr(),
        Clear(ClearType::CurrentLine),
        Print("\r"),
        ResetColor,
        cursor::Show,
    );
}

/// Keeps the indicator running until dropped.
pub struct Spinner {
    task: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Draws nothing; for output that is not a terminal.
    pub(super) fn start_empty() -> Self {
        Spinner { task: None }
    }

    pub(super) fn start() -> Self {
        Spinner {
            task: Some(tokio::spawn(animate())),
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        // The line is only erased once the animation can no longer draw over it.
        tokio::spawn(async move {
            task.abort();
            let _ = task.await;
            erase();
        });
    }
}
