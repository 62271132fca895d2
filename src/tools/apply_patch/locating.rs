use super::model::{Hunk, PatchError};
use super::text::Lines;

/// Find where `hunk` really starts in `source`, never before `cursor`.
///
/// The declared position is tried first, then positions `window` lines around it,
/// nearest first and earlier before later. Every context and deleted line has to
/// match exactly. Pure insertions carry no text to verify, so they are taken at
/// their declared position as long as it lies inside `[cursor, len]`.
pub fn locate_hunk(
    source: &Lines<'_>,
    hunk: &Hunk,
    index: usize,
    cursor: usize,
    window: usize,
) -> Result<usize, PatchError> {
    let declared = hunk.declared_index();
    let expected = hunk.old_lines();

    let found = if expected.is_empty() {
        (cursor..=source.len()).contains(&declared).then_some(declared)
    } else {
        candidates(declared, window)
            .find(|&start| start >= cursor && matches_at(source, &expected, start))
    };

    match found {
        Some(start) => {
            if start != declared {
                tracing::debug!(
                    hunk = index,
                    declared = declared.saturating_add(1),
                    actual = start + 1,
                    "apply_patch: hunk located off its declared line"
                );
            }
            Ok(start)
        }
        None => Err(PatchError::HunkContextMismatch {
            hunk: index,
            line: declared.saturating_add(1),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            actual: source
                .texts(declared, declared.saturating_add(expected.len()))
                .into_iter()
                .map(str::to_string)
                .collect(),
        }),
    }
}

/// Where the hunk's new lines already sit, if an additive hunk located at `start`
/// turns out to be applied already. Replaying it then would add its lines twice.
pub fn already_applied(
    source: &Lines<'_>,
    hunk: &Hunk,
    start: usize,
    cursor: usize,
) -> Option<usize> {
    if !hunk.is_additive() {
        return None;
    }
    let at = start.checked_sub(hunk.leading_adds())?;
    (at >= cursor && matches_at(source, &hunk.new_lines(), at)).then_some(at)
}

fn candidates(declared: usize, window: usize) -> impl Iterator<Item = usize> {
    std::iter::once(Some(declared))
        .chain((1..=window).flat_map(move |d| [declared.checked_sub(d), declared.checked_add(d)]))
        .flatten()
}

fn matches_at(source: &Lines<'_>, expected: &[&str], start: usize) -> bool {
    let Some(have) = start
        .checked_add(expected.len())
        .and_then(|end| source.lines.get(start..end))
    else {
        return false;
    };
    expected.iter().zip(have).all(|(want, have)| *want == have.text)
}
