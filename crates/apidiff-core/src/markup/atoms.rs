//! Flattening of a cleaned tree into a stream of diffable atoms.
//!
//! Each atom is one token of text (or one void element) together with the
//! chain of elements enclosing it. Element identity is kept per tree, so two
//! sibling paragraphs stay distinct even though their tags are equal.

use crate::html::{is_void, Content, HtmlTree};
use crate::textdiff::tokenize;

/// Which input an element came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Old,
    New,
}

/// One enclosing element of an atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub side: Side,
    /// Pre-order index of the element within its tree
    pub id: usize,
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl Ancestor {
    /// Whether two ancestors render identically
    pub fn same_shape(&self, other: &Ancestor) -> bool {
        self.tag == other.tag && self.attrs == other.attrs
    }

    pub fn describe(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, value));
        }
        out.push('>');
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomKind {
    Text(String),
    /// A void element such as `<br>` or `<img>`
    Void(HtmlTree),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub kind: AtomKind,
    pub ancestors: Vec<Ancestor>,
}

impl Atom {
    /// Diff key: the text itself, or the rendered void element
    pub fn key(&self) -> String {
        match &self.kind {
            AtomKind::Text(text) => text.clone(),
            AtomKind::Void(tree) => tree.to_html(),
        }
    }

    pub fn to_content(&self) -> Content {
        match &self.kind {
            AtomKind::Text(text) => Content::Text(text.clone()),
            AtomKind::Void(tree) => Content::Element(tree.clone()),
        }
    }
}

struct Flattener {
    side: Side,
    next_id: usize,
    chain: Vec<Ancestor>,
    atoms: Vec<Atom>,
}

impl Flattener {
    fn visit(&mut self, node: &Content) {
        match node {
            Content::Text(text) => {
                for token in tokenize(text) {
                    self.atoms.push(Atom {
                        kind: AtomKind::Text(token.to_string()),
                        ancestors: self.chain.clone(),
                    });
                }
            }
            Content::Element(tree) if tree.children.is_empty() && is_void(&tree.tag) => {
                self.atoms.push(Atom {
                    kind: AtomKind::Void(tree.clone()),
                    ancestors: self.chain.clone(),
                });
            }
            Content::Element(tree) => {
                let id = self.next_id;
                self.next_id += 1;
                self.chain.push(Ancestor {
                    side: self.side,
                    id,
                    tag: tree.tag.clone(),
                    attrs: tree.attrs.clone(),
                });
                for child in &tree.children {
                    self.visit(child);
                }
                self.chain.pop();
            }
        }
    }
}

/// Flatten `nodes` into atoms in document order
pub fn flatten(nodes: &[Content], side: Side) -> Vec<Atom> {
    let mut flattener = Flattener {
        side,
        next_id: 0,
        chain: Vec::new(),
        atoms: Vec::new(),
    };
    for node in nodes {
        flattener.visit(node);
    }
    flattener.atoms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::clean::clean;

    #[test]
    fn test_flatten_words_with_ancestors() {
        let nodes = clean("<p>Hello <b>big</b> world</p>").unwrap();
        let atoms = flatten(&nodes, Side::Old);
        let keys: Vec<_> = atoms.iter().map(Atom::key).collect();
        assert_eq!(keys, vec!["Hello", " ", "big", " ", "world"]);
        assert_eq!(atoms[2].ancestors.len(), 2);
        assert_eq!(atoms[2].ancestors[1].tag, "b");
        assert_eq!(atoms[0].ancestors[0].id, 0);
    }

    #[test]
    fn test_sibling_elements_are_distinct() {
        let nodes = clean("<p>a</p><p>b</p>").unwrap();
        let atoms = flatten(&nodes, Side::New);
        assert_ne!(atoms[0].ancestors[0].id, atoms[1].ancestors[0].id);
        assert!(atoms[0].ancestors[0].same_shape(&atoms[1].ancestors[0]));
    }

    #[test]
    fn test_void_atom() {
        let nodes = clean("a<br>b").unwrap();
        let atoms = flatten(&nodes, Side::Old);
        assert_eq!(atoms.len(), 3);
        assert_eq!(atoms[1].key(), "<br>");
    }
}
