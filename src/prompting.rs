//! What we tell the model to do.

/// The command vocabulary, repeated back whenever the model goes off script.
pub const COMMANDS: &str = r#"commands:
  readfiles <comma separated list of file paths to view> // read the contents of the files with line numbers added to them
  patchfile <filename to change>\n<patch body> // patch the file with the given patch
  createfile <filename of new file>\n<contents of new file> // create a new file with the given contents
  removefile <filename to remove> // remove the file
  commit <message describing change in 'this commit will <message>' syntax> // set a commit message that will be used to commit the code after the conversation ends
  comment <write a comment on the issue, with all relevant information, since this conversation is not available in the issue> // write a comment that is added to the issue when the conversation ends
  exit // ends the conversation
If you think the issue is already resolved, use the comment command. Don't ever apologise or write any other such text. Only use commands, and never anything else. When you're done, use the commit command.
patch syntax:
* Each hunk begins with a header holding the old range and the new range: `@@ -oldStart,oldLength +newStart,newLength @@` (e.g. `@@ -1,3 +1,4 @@`). Line numbers are the ones shown by readfiles.
* Lines starting with a space (` `) are context lines that stay unchanged; they must match the file exactly.
* Lines starting with `-` are deleted, lines starting with `+` are added.
* oldLength counts context and deleted lines; newLength counts context and added lines.
* An optional line starting with `\` can follow a line, marking it as the last line of the file with no trailing newline.
* Hunks must be in file order and must not overlap.
"#;

/// The opening message. `¶` placeholders are filled in by `history::make_history`.
pub const OPENING: &str = r#"Issue #¶issue: ¶text
¶commands
files: ¶files
current date: ¶today
instructions: use only a single command at a time. commands are case sensitive.
"#;
