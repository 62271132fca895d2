use eyre::{Result, eyre};

use crate::chat::OpenAiChat;
use crate::cli::specials;
use crate::config::Config;
use crate::display::{self, Display};
use crate::history::{self, Conversation};
use crate::outputs::StepOutputs;
use crate::tools::Workspace;
use crate::tools::apply_patch::PatchOptions;

use super::turn::{Flow, Outcome, Session, run_turn};

/// Initialize the display and route logs through it.
fn start_display() -> Display {
    let display = display::make_display();
    crate::logging::setup_tracing_display_logger(display.clone());
    display
}

/// CLI entrypoint: read the issue, open the checkout, and talk to the model until it exits.
pub async fn run() -> Result<()> {
    // Start display; all user-visible output goes through it
    let display = start_display();

    if specials::handle_specials_if_needed() {
        return Ok(());
    }

    let config = Config::from_env()?;
    let chat = OpenAiChat::new(&config)?;
    let workspace = Workspace::new(
        &config.checkout,
        config.formatter.clone(),
        PatchOptions {
            search_window: config.search_window,
        },
    )?;
    let outputs = StepOutputs::new(config.github_output.clone());

    let files = workspace.list_files()?;
    tracing::info!(
        checkout = %workspace.root().display(),
        files = files.len(),
        model = %config.model,
        "run: starting"
    );
    let mut conversation = history::make_history(&config.issue_number, &config.issue_text, &files);

    let session = Session {
        chat: &chat,
        workspace: &workspace,
        outputs: &outputs,
        display,
        issue_number: &config.issue_number,
    };
    let outcome = converse(&session, &mut conversation, config.max_turns).await?;
    tracing::info!(
        commit = outcome.commit_message.is_some(),
        comment = outcome.comment_message.is_some(),
        "run: finished"
    );
    println!("done");
    Ok(())
}

/// Keep taking turns until the model exits or runs out of turns.
pub async fn converse(
    session: &Session<'_>,
    conversation: &mut Conversation,
    max_turns: usize,
) -> Result<Outcome> {
    if let Some(opening) = conversation.last() {
        session
            .display
            .show_message(opening.role(), opening.content())
            .await;
    }

    let mut outcome = Outcome::default();
    for turn in 1..=max_turns {
        tracing::debug!(turn, "converse: asking the model");
        if run_turn(session, conversation, &mut outcome).await? == Flow::Exit {
            return Ok(outcome);
        }
    }
    Err(eyre!("the model did not exit within {max_turns} turns"))
}
