use super::model::{Hunk, Op, Patch, PatchError};

/// Parse a patch body (no filename line, no fences) into hunks.
/// Never looks at the target file; an empty body yields an empty patch.
pub fn parse_hunks(raw: &str) -> Result<Patch, PatchError> {
    let mut hunks: Patch = Vec::new();
    // The hunk being collected and the patch line its header sits on.
    let mut cur: Option<(Hunk, usize)> = None;

    for (idx, raw_line) in patch_lines(raw).into_iter().enumerate() {
        let line = idx + 1;
        let hunk = hunks.len() + 1;

        if raw_line.starts_with("@@") {
            if let Some((done, at)) = cur.take() {
                hunks.push(finish_hunk(done, hunk, at)?);
            }
            let header = parse_header(raw_line).map_err(|reason| PatchError::MalformedHeader {
                hunk: hunks.len() + 1,
                line,
                reason,
            })?;
            cur = Some((header, line));
            continue;
        }

        let Some((current, _)) = cur.as_mut() else {
            if is_preamble(raw_line) {
                continue;
            }
            return Err(PatchError::UnrecognizedLine {
                hunk,
                line,
                text: raw_line.to_string(),
            });
        };

        let op = match raw_line.chars().next() {
            None => Op::Context(String::new()),
            Some(' ') => Op::Context(raw_line[1..].to_string()),
            Some('+') => Op::Add(raw_line[1..].to_string()),
            Some('-') => Op::Delete(raw_line[1..].to_string()),
            Some('\\') => match current.ops.last() {
                Some(Op::NoNewlineAtEof) | None => {
                    return Err(PatchError::DanglingNoNewlineMarker { hunk, line });
                }
                Some(_) => Op::NoNewlineAtEof,
            },
            Some(_) => {
                return Err(PatchError::UnrecognizedLine {
                    hunk,
                    line,
                    text: raw_line.to_string(),
                });
            }
        };
        current.ops.push(op);
    }

    if let Some((done, at)) = cur.take() {
        let hunk = hunks.len() + 1;
        hunks.push(finish_hunk(done, hunk, at)?);
    }
    Ok(hunks)
}

fn patch_lines(raw: &str) -> Vec<&str> {
    if raw.is_empty() {
        return Vec::new();
    }
    let body = raw.strip_suffix('\n').unwrap_or(raw);
    body.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

// Lines tolerated before the first header: blanks and a unified-diff file preamble.
fn is_preamble(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with("--- ") || line.starts_with("+++ ")
}

/// Parse `@@ -a[,b] +c[,d] @@[ section]` into an op-less hunk.
fn parse_header(line: &str) -> Result<Hunk, String> {
    let rest = line.trim_start_matches('@').trim_start();
    let Some(close) = rest.find("@@") else {
        return Err("missing closing `@@`".into());
    };
    let mut ranges = rest[..close].split_whitespace();
    let old = ranges
        .next()
        .and_then(|r| r.strip_prefix('-'))
        .ok_or("expected `-oldStart[,oldLength]`")?;
    let new = ranges
        .next()
        .and_then(|r| r.strip_prefix('+'))
        .ok_or("expected `+newStart[,newLength]`")?;
    if let Some(extra) = ranges.next() {
        return Err(format!("unexpected `{extra}` between the ranges"));
    }

    let (old_start, old_len) = parse_range(old)?;
    let (new_start, new_len) = parse_range(new)?;
    if old_start == 0 && old_len > 0 {
        return Err("old range cannot start at line 0 unless its length is 0".into());
    }
    if old_start.checked_add(old_len).is_none() || new_start.checked_add(new_len).is_none() {
        return Err("range runs past the largest line number".into());
    }

    Ok(Hunk {
        old_start,
        old_len,
        new_start,
        new_len,
        ops: Vec::new(),
    })
}

fn parse_range(range: &str) -> Result<(usize, usize), String> {
    let number = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("`{range}` is not a line range"))
    };
    match range.split_once(',') {
        Some((start, len)) => Ok((number(start)?, number(len)?)),
        None => Ok((number(range)?, 1)),
    }
}

/// Drop stray trailing blank lines, then hold the body to the header's counts.
fn finish_hunk(mut hunk: Hunk, index: usize, header_line: usize) -> Result<Hunk, PatchError> {
    loop {
        let (old, new) = hunk.counts();
        let overflows = old > hunk.old_len || new > hunk.new_len;
        let trailing_blank = matches!(hunk.ops.last(), Some(Op::Context(t)) if t.is_empty());
        if overflows && trailing_blank {
            hunk.ops.pop();
        } else {
            break;
        }
    }

    let (old, new) = hunk.counts();
    if old != hunk.old_len || new != hunk.new_len {
        return Err(PatchError::MalformedHeader {
            hunk: index,
            line: header_line,
            reason: format!(
                "header declares {} old and {} new lines but the body has {old} old and {new} new",
                hunk.old_len, hunk.new_len
            ),
        });
    }
    Ok(hunk)
}
