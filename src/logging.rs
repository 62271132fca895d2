//! Tracing setup: events are formatted once and handed to the display line by line.
use std::io;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing_subscriber::EnvFilter;

use crate::display::Display;

/// Used when `MEND_LOG` is unset or not a valid filter.
const DEFAULT_FILTER: &str = "info";

/// The fmt layer writes each event in one call; forward it without the newline.
#[derive(Clone)]
struct LineSink(UnboundedSender<String>);

impl io::Write for LineSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let text = text.trim_end_matches(['\n', '\r']);
        if !text.is_empty() {
            let _ = self.0.send(text.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn forward(mut lines: UnboundedReceiver<String>, display: Display) {
    while let Some(line) = lines.recv().await {
        display.show_log(&line).await;
    }
}

fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Route tracing logs into the display; verbosity comes from `MEND_LOG`.
pub fn setup_tracing_display_logger(display: Display) {
    let (tx, rx) = unbounded_channel();
    tokio::spawn(forward(rx, display));

    let sink = LineSink(tx);
    let directive = std::env::var("MEND_LOG").ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from(directive.as_deref()))
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(move || sink.clone())
        .try_init();
}
