//! Hunk-based patch engine: parse a unified-diff body, locate each hunk in the
//! file text, replay it, and reassemble. Pure text in, text out; callers own all I/O.
mod applying;
mod locating;
mod model;
mod parsing;
mod text;

pub use model::{Hunk, Op, Patch, PatchError};
pub use parsing::parse_hunks;
pub use text::{Line, Lines, join_lines, split_lines};

use applying::{LastEmitted, apply_hunk};
use locating::{already_applied, locate_hunk};

/// How far around a hunk's declared line the locator may look.
pub const DEFAULT_SEARCH_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchOptions {
    pub search_window: usize,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            search_window: DEFAULT_SEARCH_WINDOW,
        }
    }
}

/// A successful application. `changed` is false when `text` is byte-identical to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    pub changed: bool,
}

pub fn apply(original: &str, patch: &str) -> Result<Applied, PatchError> {
    apply_with(original, patch, &PatchOptions::default())
}

/// Apply every hunk of `patch` to `original`, or none of them.
pub fn apply_with(
    original: &str,
    patch: &str,
    options: &PatchOptions,
) -> Result<Applied, PatchError> {
    let hunks = parse_hunks(patch)?;
    if hunks.is_empty() {
        return Ok(Applied {
            text: original.to_string(),
            changed: false,
        });
    }

    let source = split_lines(original);
    let mut out: Vec<&str> = Vec::with_capacity(source.len());
    let mut cursor = 0;
    let mut previous_end = 0;
    let mut tail: Option<LastEmitted> = None;

    for (i, hunk) in hunks.iter().enumerate() {
        let index = i + 1;
        let declared = hunk.declared_index();
        if i > 0 && declared < previous_end {
            return Err(PatchError::OutOfOrderHunk {
                hunk: index,
                start: hunk.old_start,
                previous_end,
            });
        }
        previous_end = declared.saturating_add(hunk.old_len);

        let start = locate_hunk(&source, hunk, index, cursor, options.search_window)?;
        if let Some(at) = already_applied(&source, hunk, start, cursor) {
            tracing::debug!(hunk = index, line = at + 1, "apply_patch: hunk already applied");
            let end = at + hunk.new_lines().len();
            out.extend(source.texts(cursor, end));
            tail = None;
            cursor = end;
            continue;
        }
        out.extend(source.texts(cursor, start));
        tail = apply_hunk(&source, hunk, index, start, &mut out)?;
        cursor = start + hunk.old_len;
    }
    let reaches_end = cursor == source.len();
    out.extend(source.texts(cursor, source.len()));

    let ends_with_newline = match tail {
        Some(last) if reaches_end && last.no_newline => false,
        Some(last) if reaches_end && last.added => true,
        _ => source.ends_with_newline,
    };
    let text = join_lines(&out, ends_with_newline);
    let changed = text != original;
    tracing::debug!(hunks = hunks.len(), changed, "apply_patch: applied");
    Ok(Applied { text, changed })
}

#[cfg(test)]
mod tests;
