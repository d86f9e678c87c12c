//! Rebuilding an element tree from the annotated atom stream.

use super::atoms::{Ancestor, Side};
use super::clean::{clean, MAX_DEPTH};
use super::compare::{Annotated, Change};
use super::tooltip::tooltip;
use crate::errors::MarkupError;
use crate::html::{is_known_attr, is_known_tag, Content, HtmlTree};

const WRAPPER_CLASSES: [&str; 3] = ["added", "removed", "changed"];

/// Attribute holding a change description until tooltips are attached
const DESCRIPTION_ATTR: &str = "data-change";

/// The class of a diff wrapper element, or `None` for any other node
pub fn wrapper_class(node: &Content) -> Option<&str> {
    match node {
        Content::Element(tree) if tree.tag == "span" => tree
            .class()
            .filter(|class| WRAPPER_CLASSES.contains(class)),
        _ => None,
    }
}

/// Rebuilt nodes plus the recoverable problems met on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuilt {
    pub nodes: Vec<Content>,
    pub warnings: Vec<MarkupError>,
}

struct Builder {
    stack: Vec<((Side, usize), HtmlTree)>,
    roots: Vec<Content>,
    warnings: Vec<MarkupError>,
}

impl Builder {
    fn children(&mut self) -> &mut Vec<Content> {
        match self.stack.last_mut() {
            Some((_, tree)) => &mut tree.children,
            None => &mut self.roots,
        }
    }

    fn close(&mut self) {
        if let Some((_, tree)) = self.stack.pop() {
            self.children().push(Content::Element(tree));
        }
    }

    fn open(&mut self, ancestor: &Ancestor) {
        let tree = if is_known_tag(&ancestor.tag) {
            let mut tree = HtmlTree::new(ancestor.tag.clone());
            for (name, value) in &ancestor.attrs {
                if is_known_attr(name) {
                    tree.attrs.push((name.clone(), value.clone()));
                } else {
                    self.warnings.push(MarkupError::UnknownAttribute {
                        tag: ancestor.tag.clone(),
                        name: name.clone(),
                    });
                }
            }
            tree
        } else {
            self.warnings.push(MarkupError::UnknownTag {
                tag: ancestor.tag.clone(),
            });
            HtmlTree::new("span").with_class("unknown-tag")
        };
        self.stack.push(((ancestor.side, ancestor.id), tree));
    }

    /// Make the open elements match `chain`, reusing the common prefix
    fn enter(&mut self, chain: &[Ancestor]) {
        let common = self
            .stack
            .iter()
            .zip(chain)
            .take_while(|((key, _), a)| *key == (a.side, a.id))
            .count();
        while self.stack.len() > common {
            self.close();
        }
        for ancestor in &chain[common..] {
            self.open(ancestor);
        }
    }

    fn append(&mut self, item: &Annotated) {
        let content = item.atom.to_content();
        let Some(class) = item.change.css_class() else {
            push_merged(self.children(), content);
            return;
        };
        let mut wrapper = HtmlTree::new("span").with_class(class);
        if let Change::Changed { description } = &item.change {
            wrapper.set_attr(DESCRIPTION_ATTR, description.clone());
        }
        wrapper.children.push(content);
        push_merged(self.children(), Content::Element(wrapper));
    }
}

/// Build the merged tree for an annotated stream
///
/// Adjacent wrappers of the same class are merged during construction and
/// again by a final [`merge_adjacent`] pass; change descriptions are
/// attached as inline tooltips.
///
/// # Errors
///
/// Returns `Rebuild` when an atom is nested deeper than [`MAX_DEPTH`].
pub fn rebuild(stream: &[Annotated]) -> Result<Rebuilt, MarkupError> {
    let mut builder = Builder {
        stack: Vec::new(),
        roots: Vec::new(),
        warnings: Vec::new(),
    };
    for item in stream {
        if item.atom.ancestors.len() > MAX_DEPTH {
            return Err(MarkupError::Rebuild {
                message: format!(
                    "atom nested {} levels deep",
                    item.atom.ancestors.len()
                ),
            });
        }
        builder.enter(&item.atom.ancestors);
        builder.append(item);
    }
    builder.enter(&[]);

    let nodes = attach_tooltips(merge_adjacent(builder.roots));
    Ok(Rebuilt {
        nodes,
        warnings: builder.warnings,
    })
}

fn mergeable(last: &Content, node: &Content) -> bool {
    match (last, node) {
        (Content::Text(_), Content::Text(_)) => true,
        (Content::Element(a), Content::Element(b)) => {
            wrapper_class(last).is_some()
                && wrapper_class(last) == wrapper_class(node)
                && a.attr(DESCRIPTION_ATTR) == b.attr(DESCRIPTION_ATTR)
        }
        _ => false,
    }
}

/// Append `node`, splicing it into the previous sibling when both are text
/// or both are wrappers of the same class
fn push_merged(siblings: &mut Vec<Content>, node: Content) {
    if let Some(last) = siblings.last_mut() {
        if mergeable(last, &node) {
            match (last, node) {
                (Content::Text(last), Content::Text(text)) => last.push_str(&text),
                (Content::Element(last), Content::Element(tree)) => {
                    for child in tree.children {
                        push_merged(&mut last.children, child);
                    }
                }
                _ => {}
            }
            return;
        }
    }
    siblings.push(node);
}

/// Drop empty text and empty wrappers, then merge adjacent text and
/// adjacent same-class wrappers, at every level
///
/// The result is a fixed point: merging it again changes nothing.
pub fn merge_adjacent(nodes: Vec<Content>) -> Vec<Content> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            Content::Element(mut tree) => {
                tree.children = merge_adjacent(std::mem::take(&mut tree.children));
                Content::Element(tree)
            }
            text => text,
        };
        let empty = match &node {
            Content::Text(text) => text.is_empty(),
            Content::Element(tree) => wrapper_class(&node).is_some() && tree.children.is_empty(),
        };
        if !empty {
            push_merged(&mut out, node);
        }
    }
    out
}

fn attach_tooltips(nodes: Vec<Content>) -> Vec<Content> {
    nodes
        .into_iter()
        .map(|node| match node {
            Content::Element(mut tree) => {
                let description = tree
                    .attrs
                    .iter()
                    .position(|(name, _)| name == DESCRIPTION_ATTR)
                    .map(|index| tree.attrs.remove(index).1);
                tree.children = attach_tooltips(std::mem::take(&mut tree.children));
                if let Some(description) = description {
                    // descriptions are generated markup and always clean
                    if let Ok(parsed) = clean(&description) {
                        tree.children.push(Content::Element(tooltip(parsed)));
                    }
                }
                Content::Element(tree)
            }
            text => text,
        })
        .collect()
}
