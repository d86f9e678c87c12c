//! Token-level highlighting inside changed lines.

use regex::Regex;
use similar::{capture_diff_slices, Algorithm, DiffOp};
use std::sync::LazyLock;

/// Identifiers, digit runs, horizontal whitespace runs, line breaks, and
/// any other single character
const TOKEN_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_]*|[0-9]+|[ \t]+|\n|.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanClass {
    Added,
    Removed,
    Changed,
}

impl SpanClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            SpanClass::Added => "added",
            SpanClass::Removed => "removed",
            SpanClass::Changed => "changed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Span { class: SpanClass, text: String },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Span { text, .. } => text,
        }
    }

    fn class(&self) -> Option<SpanClass> {
        match self {
            Segment::Plain(_) => None,
            Segment::Span { class, .. } => Some(*class),
        }
    }
}

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("TOKEN_PATTERN is a valid regex"));

/// Split text into diff tokens; the tokens concatenate back to `text`
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Lines of segments for one column
pub type SegmentLines = Vec<Vec<Segment>>;

struct LineBuilder {
    lines: SegmentLines,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }

    fn push(&mut self, token: &str, class: Option<SpanClass>) {
        if token == "\n" {
            self.lines.push(Vec::new());
            return;
        }
        let Some(line) = self.lines.last_mut() else {
            return;
        };
        if let Some(last) = line.last_mut() {
            if last.class() == class {
                match last {
                    Segment::Plain(text) | Segment::Span { text, .. } => text.push_str(token),
                }
                return;
            }
        }
        line.push(match class {
            None => Segment::Plain(token.to_string()),
            Some(class) => Segment::Span {
                class,
                text: token.to_string(),
            },
        });
    }

    fn finish(self, line_count: usize) -> SegmentLines {
        if line_count == 0 {
            Vec::new()
        } else {
            self.lines
        }
    }
}

/// Highlight the tokens that differ between two line chunks
///
/// Removed tokens are marked on the source side, added tokens on the target
/// side, and replaced tokens as changed on both. Runs of tokens with the
/// same class form a single span.
pub fn highlight(source: &[String], target: &[String]) -> (SegmentLines, SegmentLines) {
    let source_text = source.join("\n");
    let target_text = target.join("\n");
    let old = tokenize(&source_text);
    let new = tokenize(&target_text);

    let mut left = LineBuilder::new();
    let mut right = LineBuilder::new();
    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                old[old_index..old_index + len]
                    .iter()
                    .for_each(|t| left.push(t, None));
                new[new_index..new_index + len]
                    .iter()
                    .for_each(|t| right.push(t, None));
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => old[old_index..old_index + old_len]
                .iter()
                .for_each(|t| left.push(t, Some(SpanClass::Removed))),
            DiffOp::Insert {
                new_index, new_len, ..
            } => new[new_index..new_index + new_len]
                .iter()
                .for_each(|t| right.push(t, Some(SpanClass::Added))),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                old[old_index..old_index + old_len]
                    .iter()
                    .for_each(|t| left.push(t, Some(SpanClass::Changed)));
                new[new_index..new_index + new_len]
                    .iter()
                    .for_each(|t| right.push(t, Some(SpanClass::Changed)));
            }
        }
    }
    (left.finish(source.len()), right.finish(target.len()))
}

/// Mark every line of a chunk with one class
pub fn mark_all(lines: &[String], class: SpanClass) -> SegmentLines {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![Segment::Span {
                    class,
                    text: line.clone(),
                }]
            }
        })
        .collect()
}

/// Plain, unhighlighted lines
pub fn plain(lines: &[String]) -> SegmentLines {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![Segment::Plain(line.clone())]
            }
        })
        .collect()
}
