//! Line and token text differ.
//!
//! A line-level edit script is laid out as two aligned columns, equal runs
//! are cut down to the configured context, and each changed chunk is
//! re-diffed at token granularity for intra-line highlighting.

pub mod classify;
pub mod columns;
pub mod delta;
pub mod tokens;

pub use classify::{classify_delta, classify_script};
pub use columns::{elide, layout, Column, Elision, LayoutOptions, Line, RunPlace, SideBySide};
pub use delta::{apply, line_deltas, split_lines, Chunk, Delta, DeltaKind};
pub use tokens::{highlight, tokenize, Segment, SpanClass};

use crate::grouping::{Group, PairRenderer};
use crate::html::HtmlTree;
use crate::model::api::ApiSet;
use crate::model::kinds::Direction;

/// Result of diffing two texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDiff {
    pub deltas: Vec<Delta>,
    pub columns: SideBySide,
    /// `None` when the texts have the same lines
    pub direction: Option<Direction>,
}

/// Diff two labelled texts
pub fn diff_text(
    reference_label: &str,
    reference: &str,
    modified_label: &str,
    modified: &str,
    options: LayoutOptions,
) -> TextDiff {
    let source = split_lines(reference);
    let target = split_lines(modified);
    let deltas = line_deltas(&source, &target);
    let columns = layout(
        reference_label,
        modified_label,
        source.len(),
        target.len(),
        &deltas,
        options,
    );
    let direction = classify_script(&deltas);
    TextDiff {
        deltas,
        columns,
        direction,
    }
}

/// A rendered comparison of one text against the focus text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRendering {
    Paired(SideBySide),
    /// Text present on one side only, marked entirely
    Solo { class: SpanClass, column: Column },
}

impl TextRendering {
    pub fn to_html(&self) -> HtmlTree {
        match self {
            TextRendering::Paired(columns) => columns.to_html(),
            TextRendering::Solo { class, column } => HtmlTree::new("div")
                .with_class(format!("text-diff solo {}", class.css_class()))
                .with_child(HtmlTree::new("div").with_class("caption").with_text(column.label.clone()))
                .with_child(column.to_html()),
        }
    }
}

/// Renders text values for the grouping engine, naming columns after the
/// instances in each group
pub struct TextDiffRenderer<'a> {
    apis: &'a ApiSet,
    options: LayoutOptions,
}

impl<'a> TextDiffRenderer<'a> {
    pub fn new(apis: &'a ApiSet, options: LayoutOptions) -> Self {
        Self { apis, options }
    }

    fn solo(&self, label: String, text: &str, class: SpanClass) -> TextRendering {
        let lines = split_lines(text);
        let width = lines.len().max(1).to_string().len();
        let mut column = Column::new(label, width);
        column.push_lines(tokens::mark_all(&lines, class), 1, self.options.line_numbers);
        TextRendering::Solo { class, column }
    }
}

impl PairRenderer<String> for TextDiffRenderer<'_> {
    type Output = TextRendering;

    fn paired(
        &mut self,
        older: &Group<'_, String>,
        older_value: &String,
        focus: &Group<'_, String>,
        focus_value: &String,
    ) -> (TextRendering, Option<Direction>) {
        let diff = diff_text(
            &self.apis.names_of(&older.apis),
            older_value,
            &self.apis.names_of(&focus.apis),
            focus_value,
            self.options,
        );
        (TextRendering::Paired(diff.columns), diff.direction)
    }

    fn added(
        &mut self,
        _older: &Group<'_, String>,
        focus: &Group<'_, String>,
        focus_value: &String,
    ) -> TextRendering {
        self.solo(self.apis.names_of(&focus.apis), focus_value, SpanClass::Added)
    }

    fn removed(&mut self, older: &Group<'_, String>, older_value: &String) -> TextRendering {
        self.solo(self.apis.names_of(&older.apis), older_value, SpanClass::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_change_with_context() {
        let diff = diff_text(
            "v1",
            "A\nB\nC",
            "v2",
            "A\nX\nC",
            LayoutOptions {
                context: 5,
                line_numbers: false,
            },
        );
        let changes: Vec<_> = diff
            .deltas
            .iter()
            .filter(|d| d.kind != DeltaKind::Equal)
            .collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, DeltaKind::Change);
        assert_eq!(diff.direction, Some(Direction::Changed));
        assert_eq!(diff.columns.reference.text_lines(), 3);
        assert!(!diff.columns.reference.has_separator());
    }

    #[test]
    fn test_empty_reference_is_addition() {
        let diff = diff_text(
            "v1",
            "",
            "v2",
            "new text",
            LayoutOptions {
                context: 5,
                line_numbers: false,
            },
        );
        assert_eq!(diff.direction, Some(Direction::Added));
        assert_eq!(diff.columns.reference.lines, vec![Line::Padding]);
    }
}
