/// One line of a hunk body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Context(String),
    Add(String),
    Delete(String),
    /// Binds to the op right before it: that line is the last one and has no `\n`.
    NoNewlineAtEof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 1-based, as declared in the header.
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
    pub ops: Vec<Op>,
}

impl Hunk {
    /// 0-based index of the first old line, in source coordinates.
    /// A zero-length old range names the line *after which* new lines go.
    pub fn declared_index(&self) -> usize {
        if self.old_len == 0 {
            self.old_start
        } else {
            self.old_start - 1
        }
    }

    /// Lines the hunk expects to find in the source, in order.
    pub fn old_lines(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Context(text) | Op::Delete(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Lines the hunk leaves behind, in order.
    pub fn new_lines(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Context(text) | Op::Add(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Only adds lines: every old line survives as context.
    pub fn is_additive(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, Op::Add(_)))
            && !self.ops.iter().any(|op| matches!(op, Op::Delete(_)))
    }

    /// Added lines that come before the first context line.
    /// Zero for pure insertions, whose new lines start at the insertion point.
    pub fn leading_adds(&self) -> usize {
        if !self.ops.iter().any(|op| matches!(op, Op::Context(_))) {
            return 0;
        }
        self.ops
            .iter()
            .take_while(|op| !matches!(op, Op::Context(_)))
            .filter(|op| matches!(op, Op::Add(_)))
            .count()
    }

    pub fn counts(&self) -> (usize, usize) {
        let mut old = 0;
        let mut new = 0;
        for op in &self.ops {
            match op {
                Op::Context(_) => {
                    old += 1;
                    new += 1;
                }
                Op::Delete(_) => old += 1,
                Op::Add(_) => new += 1,
                Op::NoNewlineAtEof => {}
            }
        }
        (old, new)
    }
}

pub type Patch = Vec<Hunk>;

/// Everything that can go wrong between a patch body and a patched text.
/// Hunk numbers are 1-based, line numbers are 1-based within the patch body or the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    MalformedHeader {
        hunk: usize,
        line: usize,
        reason: String,
    },
    UnrecognizedLine {
        hunk: usize,
        line: usize,
        text: String,
    },
    DanglingNoNewlineMarker {
        hunk: usize,
        line: usize,
    },
    OutOfOrderHunk {
        hunk: usize,
        start: usize,
        previous_end: usize,
    },
    HunkContextMismatch {
        hunk: usize,
        line: usize,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    CorruptHunk {
        hunk: usize,
        consumed: usize,
        produced: usize,
        old_len: usize,
        new_len: usize,
    },
}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchError::MalformedHeader { hunk, line, reason } => {
                write!(f, "hunk {hunk}: malformed header at patch line {line}: {reason}")
            }
            PatchError::UnrecognizedLine { hunk, line, text } => write!(
                f,
                "hunk {hunk}: unrecognized line {line} {text:?}; body lines must start with ' ', '+', '-' or '\\'"
            ),
            PatchError::DanglingNoNewlineMarker { hunk, line } => write!(
                f,
                "hunk {hunk}: `\\` marker at patch line {line} does not follow a line"
            ),
            PatchError::OutOfOrderHunk {
                hunk,
                start,
                previous_end,
            } => write!(
                f,
                "hunk {hunk}: starts at line {start} but the previous hunk ends at line {previous_end}; hunks must be ordered and non-overlapping"
            ),
            PatchError::HunkContextMismatch {
                hunk,
                line,
                expected,
                actual,
            } => write!(
                f,
                "hunk {hunk}: context mismatch at line {line}: expected {:?}, found {:?}",
                expected.join("\n"),
                actual.join("\n"),
            ),
            PatchError::CorruptHunk {
                hunk,
                consumed,
                produced,
                old_len,
                new_len,
            } => write!(
                f,
                "hunk {hunk}: consumed {consumed}/{old_len} old lines and produced {produced}/{new_len} new lines"
            ),
        }
    }
}

impl std::error::Error for PatchError {}
