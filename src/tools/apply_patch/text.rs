/// A source line together with its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lines<'a> {
    pub lines: Vec<Line<'a>>,
    pub ends_with_newline: bool,
}

impl<'a> Lines<'a> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn texts(&self, from: usize, to: usize) -> Vec<&'a str> {
        let to = to.min(self.lines.len());
        let from = from.min(to);
        self.lines[from..to].iter().map(|l| l.text).collect()
    }
}

/// Split on `\n` only; a `\r` stays inside its line so that `join_lines` is exact.
pub fn split_lines(text: &str) -> Lines<'_> {
    if text.is_empty() {
        return Lines {
            lines: Vec::new(),
            ends_with_newline: false,
        };
    }
    let ends_with_newline = text.ends_with('\n');
    let body = if ends_with_newline {
        &text[..text.len() - 1]
    } else {
        text
    };
    let lines = body
        .split('\n')
        .enumerate()
        .map(|(i, text)| Line { number: i + 1, text })
        .collect();
    Lines {
        lines,
        ends_with_newline,
    }
}

pub fn join_lines<S: AsRef<str>>(lines: &[S], ends_with_newline: bool) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    if ends_with_newline && !lines.is_empty() {
        out.push('\n');
    }
    out
}
