use eyre::Result;

use crate::chat::ChatBackend;
use crate::command::{self, Command, CommandError};
use crate::display::Display;
use crate::history::Conversation;
use crate::outputs::StepOutputs;
use crate::prompting::COMMANDS;
use crate::protocol::Message;
use crate::tools::Workspace;
use crate::tools::common::scrub_root;

const COMMIT_SET: &str = "Commit message set. Use the comment command to write a comment, or exit to end the process.";
const COMMENT_SET: &str = "Comment contents set. Use the commit command to write a commit message, or exit to end the process.";

/// Everything a turn needs besides the conversation itself.
pub struct Session<'a> {
    pub chat: &'a dyn ChatBackend,
    pub workspace: &'a Workspace,
    pub outputs: &'a StepOutputs,
    pub display: Display,
    pub issue_number: &'a str,
}

/// What the model left behind for the workflow's later steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub commit_message: Option<String>,
    pub comment_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Ask the model for one command, carry it out, and append both sides to the conversation.
pub async fn run_turn(
    session: &Session<'_>,
    conversation: &mut Conversation,
    outcome: &mut Outcome,
) -> Result<Flow> {
    let spinner = session.display.start_spinning().await;
    let reply = session.chat.complete(conversation.messages()).await;
    drop(spinner);
    let reply = reply?;

    show_and_push(session, conversation, Message::Assistant(reply.clone())).await;

    let answer = match command::parse(&reply) {
        Ok(Command::Exit) => {
            tracing::info!("turn: model exited");
            return Ok(Flow::Exit);
        }
        Ok(command) => match perform(session, command, outcome).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "turn: command failed");
                format!(
                    "error: {}",
                    scrub_root(&e.to_string(), session.workspace.root())
                )
            }
        },
        Err(CommandError::Unrecognized) => format!("command not recognized\n{COMMANDS}"),
        Err(e) => format!("error: {e}"),
    };

    show_and_push(session, conversation, Message::User(answer)).await;
    Ok(Flow::Continue)
}

async fn show_and_push(session: &Session<'_>, conversation: &mut Conversation, message: Message) {
    session
        .display
        .show_message(message.role(), message.content())
        .await;
    conversation.push(message);
}

async fn perform(session: &Session<'_>, command: Command, outcome: &mut Outcome) -> Result<String> {
    let workspace = session.workspace;
    match command {
        Command::ReadFiles(names) => workspace.read_files(&names).await,
        Command::PatchFile { path, body } => workspace.patch_file(&path, &body).await,
        Command::CreateFile { path, contents } => workspace.create_file(&path, &contents).await,
        Command::RemoveFile(path) => workspace.remove_file(&path).await,
        Command::Commit(message) => {
            let message = format!("{message} - Closes #{}", session.issue_number);
            session.outputs.set("commit_message", &message)?;
            outcome.commit_message = Some(message);
            Ok(COMMIT_SET.to_string())
        }
        Command::Comment(text) => {
            session.outputs.set("comment_message", &text)?;
            outcome.comment_message = Some(text);
            Ok(COMMENT_SET.to_string())
        }
        Command::Exit => Ok(String::new()),
    }
}
