//! Markup (tree) differ for documentation fragments.
//!
//! Both inputs are cleaned into element trees, flattened into word atoms,
//! compared, and rebuilt into one tree where differing text is wrapped in
//! `added`, `removed` or `changed` spans. Failures stay local to the item:
//! it renders empty and the failure goes to the degraded log channel.

pub mod atoms;
pub mod clean;
pub mod compare;
pub mod rebuild;
pub mod tooltip;

pub use clean::{clean, MAX_DEPTH};
pub use rebuild::{merge_adjacent, rebuild, wrapper_class, Rebuilt};

use crate::errors::MarkupError;
use crate::grouping::{Group, PairRenderer};
use crate::html::{Content, HtmlTree};
use crate::log_degraded;
use crate::model::api::ApiSet;
use crate::model::key::ElementKey;
use crate::model::kinds::Direction;
use atoms::{flatten, Side};

/// Merged tree of a two-way markup diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDiff {
    pub nodes: Vec<Content>,
    /// `None` when no wrapper marks a difference
    pub direction: Option<Direction>,
}

/// Diff two markup fragments
///
/// Unknown tags and attributes in the result are reported as warnings on
/// the degraded channel and do not fail the diff.
///
/// # Errors
///
/// Returns a [`MarkupError`] when either input cannot be cleaned or the
/// result cannot be rebuilt.
pub fn diff_markup(old: &str, new: &str) -> Result<MarkupDiff, MarkupError> {
    let old_atoms = flatten(&clean(old)?, Side::Old);
    let new_atoms = flatten(&clean(new)?, Side::New);
    let stream = compare::compare(&old_atoms, &new_atoms);
    let rebuilt = rebuild(&stream)?;
    for warning in rebuilt.warnings {
        log_degraded!("rebuild_diff_tree", warning);
    }
    let direction = classify(&rebuilt.nodes);
    Ok(MarkupDiff {
        nodes: rebuilt.nodes,
        direction,
    })
}

/// Count direction from the outermost wrappers of a merged tree
///
/// `changed`, or both `added` and `removed`, give `Changed`; only `added`
/// gives `Added`; only `removed` gives `Removed`. No wrapper at all gives
/// `None`.
pub fn classify(nodes: &[Content]) -> Option<Direction> {
    let (mut added, mut removed, mut changed) = (false, false, false);
    scan(nodes, &mut |class| match class {
        "added" => added = true,
        "removed" => removed = true,
        _ => changed = true,
    });
    match (added, removed, changed) {
        (false, false, false) => None,
        (true, false, false) => Some(Direction::Added),
        (false, true, false) => Some(Direction::Removed),
        _ => Some(Direction::Changed),
    }
}

fn scan(nodes: &[Content], found: &mut dyn FnMut(&str)) {
    for node in nodes {
        if let Some(class) = wrapper_class(node) {
            found(class);
        } else if let Content::Element(tree) = node {
            scan(&tree.children, found);
        }
    }
}

/// A rendered comparison of one markup value against the focus value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupRendering {
    Paired { caption: String, nodes: Vec<Content> },
    Solo {
        caption: String,
        class: &'static str,
        nodes: Vec<Content>,
    },
    /// The diff failed; nothing is shown for this comparison
    Empty,
}

impl MarkupRendering {
    pub fn to_html(&self) -> HtmlTree {
        let (caption, class, nodes) = match self {
            MarkupRendering::Paired { caption, nodes } => (caption.as_str(), "paired", nodes),
            MarkupRendering::Solo {
                caption,
                class,
                nodes,
            } => (caption.as_str(), *class, nodes),
            MarkupRendering::Empty => return HtmlTree::new("div").with_class("markup-diff empty"),
        };
        let mut body = HtmlTree::new("div").with_class("body");
        body.children = nodes.clone();
        HtmlTree::new("div")
            .with_class(format!("markup-diff {}", class))
            .with_child(HtmlTree::new("div").with_class("caption").with_text(caption))
            .with_child(body)
    }
}

/// Renders markup values of one element for the grouping engine
///
/// A comparison that fails renders empty and is left uncounted.
pub struct MarkupDiffRenderer<'a> {
    apis: &'a ApiSet,
    key: &'a ElementKey,
}

impl<'a> MarkupDiffRenderer<'a> {
    pub fn new(apis: &'a ApiSet, key: &'a ElementKey) -> Self {
        Self { apis, key }
    }

    fn solo(&self, group: &Group<'_, String>, value: &str, class: &'static str) -> MarkupRendering {
        match clean(value) {
            Ok(nodes) => {
                let mut wrapper = HtmlTree::new("span").with_class(class);
                wrapper.children = nodes;
                MarkupRendering::Solo {
                    caption: self.apis.names_of(&group.apis),
                    class,
                    nodes: merge_adjacent(vec![Content::Element(wrapper)]),
                }
            }
            Err(err) => {
                log_degraded!("clean_markup", err, position = %self.key);
                MarkupRendering::Empty
            }
        }
    }
}

impl PairRenderer<String> for MarkupDiffRenderer<'_> {
    type Output = MarkupRendering;

    fn paired(
        &mut self,
        older: &Group<'_, String>,
        older_value: &String,
        focus: &Group<'_, String>,
        focus_value: &String,
    ) -> (MarkupRendering, Option<Direction>) {
        match diff_markup(older_value, focus_value) {
            Ok(diff) => (
                MarkupRendering::Paired {
                    caption: format!(
                        "{} \u{2192} {}",
                        self.apis.names_of(&older.apis),
                        self.apis.names_of(&focus.apis)
                    ),
                    nodes: diff.nodes,
                },
                diff.direction,
            ),
            Err(err) => {
                log_degraded!("diff_markup", err, position = %self.key);
                (MarkupRendering::Empty, None)
            }
        }
    }

    fn added(
        &mut self,
        _older: &Group<'_, String>,
        focus: &Group<'_, String>,
        focus_value: &String,
    ) -> MarkupRendering {
        self.solo(focus, focus_value, "added")
    }

    fn removed(&mut self, older: &Group<'_, String>, older_value: &String) -> MarkupRendering {
        self.solo(older, older_value, "removed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::render_all;

    #[test]
    fn test_word_insertion_is_added() {
        let diff = diff_markup("<p>Hello world</p>", "<p>Hello there world</p>").unwrap();
        assert_eq!(diff.direction, Some(Direction::Added));
        assert!(render_all(&diff.nodes).contains("<span class=\"added\">there </span>"));
    }

    #[test]
    fn test_word_replacement_is_changed() {
        let diff = diff_markup("<p>a b</p>", "<p>a c</p>").unwrap();
        assert_eq!(diff.direction, Some(Direction::Changed));
    }

    #[test]
    fn test_word_removal_is_removed() {
        let diff = diff_markup("<p>a b</p>", "<p>a</p>").unwrap();
        assert_eq!(diff.direction, Some(Direction::Removed));
    }

    #[test]
    fn test_comment_only_change_has_no_direction() {
        let diff = diff_markup("<p>a b</p><!-- draft -->", "<p>a b</p>").unwrap();
        assert_eq!(diff.direction, None);
    }

    #[test]
    fn test_failed_pair_is_uncounted() {
        let apis = ApiSet::new(vec![
            crate::model::Api::new("v1", ""),
            crate::model::Api::new("v2", ""),
        ])
        .unwrap();
        let key = ElementKey::package(None, "p");
        let map: crate::model::ApiMap<String> = [
            (crate::model::ApiId(0), "<p>x</p>".to_string()),
            (crate::model::ApiId(1), "<b>".repeat(MAX_DEPTH + 2)),
        ]
        .into_iter()
        .collect();
        let mut counted = Vec::new();
        let comparisons = crate::grouping::compare_with_focus(
            &apis,
            &map,
            String::clone,
            &mut MarkupDiffRenderer::new(&apis, &key),
            &mut |d: Direction| counted.push(d),
        );
        assert_eq!(comparisons[0].output, MarkupRendering::Empty);
        assert!(counted.is_empty());
    }

    #[test]
    fn test_too_deep_fails_locally() {
        let deep = "<b>".repeat(MAX_DEPTH + 2);
        let err = diff_markup(&deep, "<p>x</p>").unwrap_err();
        assert_eq!(err, MarkupError::TooDeep { limit: MAX_DEPTH });
    }

    #[test]
    fn test_empty_rendering() {
        let html = MarkupRendering::Empty.to_html().to_html();
        assert_eq!(html, "<div class=\"markup-diff empty\"></div>");
    }
}
