//! The model's replies, parsed into the commands it may issue.
use crate::tools::common::trim_code_blocks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ReadFiles(Vec<String>),
    PatchFile { path: String, body: String },
    CreateFile { path: String, contents: String },
    RemoveFile(String),
    Commit(String),
    Comment(String),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unrecognized,
    MissingArgument { command: &'static str },
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Unrecognized => write!(f, "command not recognized"),
            CommandError::MissingArgument { command } => {
                write!(f, "{command} needs an argument")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Split off the first whitespace-delimited word.
fn keyword(reply: &str) -> (&str, &str) {
    match reply.find(char::is_whitespace) {
        Some(at) => (&reply[..at], &reply[at..]),
        None => (reply, ""),
    }
}

/// The first line names the file; everything after it is the payload.
fn path_and_body(command: &'static str, rest: &str) -> Result<(String, String), CommandError> {
    let rest = rest.trim_start_matches([' ', '\t']);
    let (path, body) = rest.split_once('\n').unwrap_or((rest, ""));
    let path = path.trim();
    if path.is_empty() {
        return Err(CommandError::MissingArgument { command });
    }
    Ok((path.to_string(), trim_code_blocks(body)))
}

fn argument(command: &'static str, rest: &str) -> Result<String, CommandError> {
    let text = rest.trim();
    if text.is_empty() {
        return Err(CommandError::MissingArgument { command });
    }
    Ok(text.to_string())
}

/// Commands are case sensitive and must open the reply.
pub fn parse(reply: &str) -> Result<Command, CommandError> {
    let (word, rest) = keyword(reply.trim_start());
    match word {
        "readfiles" => {
            let names: Vec<String> = rest
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            if names.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "readfiles",
                });
            }
            Ok(Command::ReadFiles(names))
        }
        "patchfile" => {
            let (path, body) = path_and_body("patchfile", rest)?;
            Ok(Command::PatchFile { path, body })
        }
        "createfile" => {
            let (path, contents) = path_and_body("createfile", rest)?;
            Ok(Command::CreateFile { path, contents })
        }
        "removefile" => Ok(Command::RemoveFile(argument("removefile", rest)?)),
        "commit" => Ok(Command::Commit(argument("commit", rest)?)),
        "comment" => Ok(Command::Comment(argument("comment", rest)?)),
        "exit" => Ok(Command::Exit),
        _ => Err(CommandError::Unrecognized),
    }
}
