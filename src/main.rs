//! Command-line entrypoint: one issue, one checkout, one conversation with the model.
use eyre::Result;

pub mod chat;
pub mod cli;
pub mod command;
pub mod config;
pub mod display;
pub mod history;
pub mod logging;
pub mod outputs;
pub mod prompting;
pub mod protocol;
pub mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
