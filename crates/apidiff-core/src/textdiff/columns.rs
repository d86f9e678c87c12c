//! Side-by-side column layout with context elision.

use super::delta::{Delta, DeltaKind};
use super::tokens::{highlight, plain, Segment, SegmentLines};
use crate::html::{Content, HtmlTree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text {
        number: Option<usize>,
        segments: Vec<Segment>,
    },
    /// Elided equal lines
    Separator,
    /// Blank line keeping the two columns aligned
    Padding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub lines: Vec<Line>,
    /// Width line numbers are right-aligned to
    pub number_width: usize,
}

impl Column {
    pub fn new(label: impl Into<String>, number_width: usize) -> Self {
        Self {
            label: label.into(),
            lines: Vec::new(),
            number_width,
        }
    }

    /// Append lines numbered from `first` (1-based) when numbering is on
    pub fn push_lines(&mut self, lines: SegmentLines, first: usize, numbered: bool) {
        for (i, segments) in lines.into_iter().enumerate() {
            self.lines.push(Line::Text {
                number: numbered.then_some(first + i),
                segments,
            });
        }
    }

    pub fn text_lines(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, Line::Text { .. }))
            .count()
    }

    pub fn has_separator(&self) -> bool {
        self.lines.iter().any(|l| matches!(l, Line::Separator))
    }

    pub fn to_html(&self) -> HtmlTree {
        let mut pre = HtmlTree::new("pre").with_class("diff-column");
        for line in &self.lines {
            match line {
                Line::Text { number, segments } => {
                    if let Some(number) = number {
                        pre.push(
                            HtmlTree::new("span")
                                .with_class("line-number")
                                .with_text(format!("{:>width$} ", number, width = self.number_width)),
                        );
                    }
                    for segment in segments {
                        match segment {
                            Segment::Plain(text) => pre.push(Content::text(text.clone())),
                            Segment::Span { class, text } => pre.push(
                                HtmlTree::new("span")
                                    .with_class(class.css_class())
                                    .with_text(text.clone()),
                            ),
                        }
                    }
                }
                Line::Separator => {
                    pre.push(HtmlTree::new("span").with_class("separator").with_text("\u{2026}"))
                }
                Line::Padding => pre.push(HtmlTree::new("span").with_class("padding")),
            }
            pre.push(Content::text("\n"));
        }
        pre
    }
}

/// Two aligned columns: reference on the left, modified on the right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBySide {
    pub reference: Column,
    pub modified: Column,
}

impl SideBySide {
    pub fn to_html(&self) -> HtmlTree {
        let head = HtmlTree::new("tr")
            .with_child(HtmlTree::new("th").with_text(self.reference.label.clone()))
            .with_child(HtmlTree::new("th").with_text(self.modified.label.clone()));
        let body = HtmlTree::new("tr")
            .with_child(HtmlTree::new("td").with_child(self.reference.to_html()))
            .with_child(HtmlTree::new("td").with_child(self.modified.to_html()));
        HtmlTree::new("table")
            .with_class("text-diff")
            .with_child(HtmlTree::new("thead").with_child(head))
            .with_child(HtmlTree::new("tbody").with_child(body))
    }
}

/// Where an equal run sits relative to the changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPlace {
    Leading,
    Between,
    Trailing,
    /// The texts have no changes at all
    Only,
}

/// Lines kept from an equal run: `head` from its start, `tail` from its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elision {
    pub head: usize,
    pub separator: bool,
    pub tail: usize,
}

/// Decide which lines of an equal run of `len` lines are shown
///
/// Between two changes at most `context` lines are kept on each side, and
/// the middle is elided only when more than `2 * context` lines remain.
/// Leading and trailing runs keep the `context` lines next to the change.
pub fn elide(len: usize, context: usize, place: RunPlace) -> Elision {
    let keep_all = Elision {
        head: len,
        separator: false,
        tail: 0,
    };
    match place {
        RunPlace::Only => keep_all,
        RunPlace::Between if len > 2 * context => Elision {
            head: context,
            separator: true,
            tail: context,
        },
        RunPlace::Leading if len > context => Elision {
            head: 0,
            separator: true,
            tail: context,
        },
        RunPlace::Trailing if len > context => Elision {
            head: context,
            separator: true,
            tail: 0,
        },
        RunPlace::Between | RunPlace::Leading | RunPlace::Trailing => keep_all,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub context: usize,
    pub line_numbers: bool,
}

fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}

/// Lay out an edit script as two aligned columns
pub fn layout(
    reference_label: &str,
    modified_label: &str,
    source_len: usize,
    target_len: usize,
    deltas: &[Delta],
    options: LayoutOptions,
) -> SideBySide {
    let width = digits(source_len.max(target_len));
    let mut left = Column::new(reference_label, width);
    let mut right = Column::new(modified_label, width);
    let numbered = options.line_numbers;

    let changed: Vec<usize> = deltas
        .iter()
        .enumerate()
        .filter(|(_, d)| d.kind != DeltaKind::Equal)
        .map(|(i, _)| i)
        .collect();

    for (index, delta) in deltas.iter().enumerate() {
        if delta.kind == DeltaKind::Equal {
            let place = match (changed.first(), changed.last()) {
                (Some(first), _) if index < *first => RunPlace::Leading,
                (_, Some(last)) if index > *last => RunPlace::Trailing,
                (Some(_), Some(_)) => RunPlace::Between,
                _ => RunPlace::Only,
            };
            let len = delta.source.len();
            let elision = elide(len, options.context, place);
            let lines = &delta.source.lines;

            left.push_lines(plain(&lines[..elision.head]), delta.source.offset + 1, numbered);
            right.push_lines(plain(&lines[..elision.head]), delta.target.offset + 1, numbered);
            if elision.separator {
                left.lines.push(Line::Separator);
                right.lines.push(Line::Separator);
            }
            let tail_start = len - elision.tail;
            left.push_lines(
                plain(&lines[tail_start..]),
                delta.source.offset + tail_start + 1,
                numbered,
            );
            right.push_lines(
                plain(&lines[tail_start..]),
                delta.target.offset + tail_start + 1,
                numbered,
            );
            continue;
        }

        let (old, new) = highlight(&delta.source.lines, &delta.target.lines);
        let (old_len, new_len) = (old.len(), new.len());
        left.push_lines(old, delta.source.offset + 1, numbered);
        right.push_lines(new, delta.target.offset + 1, numbered);
        for _ in old_len..new_len {
            left.lines.push(Line::Padding);
        }
        for _ in new_len..old_len {
            right.lines.push(Line::Padding);
        }
    }

    SideBySide {
        reference: left,
        modified: right,
    }
}
