use super::model::{Hunk, Op, PatchError};
use super::text::Lines;

/// What the last line a hunk emitted looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastEmitted {
    pub added: bool,
    pub no_newline: bool,
}

/// Replay `hunk` over `source` from `start`, appending the new lines to `out`.
pub fn apply_hunk<'a>(
    source: &Lines<'a>,
    hunk: &'a Hunk,
    index: usize,
    start: usize,
    out: &mut Vec<&'a str>,
) -> Result<Option<LastEmitted>, PatchError> {
    let mut src = start;
    let mut consumed = 0;
    let mut produced = 0;
    let mut last: Option<LastEmitted> = None;
    let mut previous_emitted = false;

    let corrupt = |consumed, produced| PatchError::CorruptHunk {
        hunk: index,
        consumed,
        produced,
        old_len: hunk.old_len,
        new_len: hunk.new_len,
    };

    for op in &hunk.ops {
        match op {
            Op::Context(_) => {
                let Some(line) = source.lines.get(src) else {
                    return Err(corrupt(consumed, produced));
                };
                out.push(line.text);
                src += 1;
                consumed += 1;
                produced += 1;
                last = Some(LastEmitted {
                    added: false,
                    no_newline: false,
                });
                previous_emitted = true;
            }
            Op::Delete(_) => {
                if src >= source.len() {
                    return Err(corrupt(consumed, produced));
                }
                src += 1;
                consumed += 1;
                previous_emitted = false;
            }
            Op::Add(text) => {
                out.push(text);
                produced += 1;
                last = Some(LastEmitted {
                    added: true,
                    no_newline: false,
                });
                previous_emitted = true;
            }
            Op::NoNewlineAtEof => {
                // Only meaningful for the new side; on a deleted line it describes the old file.
                if previous_emitted && let Some(last) = last.as_mut() {
                    last.no_newline = true;
                }
            }
        }
    }

    if consumed != hunk.old_len || produced != hunk.new_len {
        return Err(corrupt(consumed, produced));
    }
    Ok(last)
}
