//! Atom-level comparison producing one merged, annotated stream.

use similar::{capture_diff_slices, Algorithm, DiffOp};
use std::collections::HashMap;

use super::atoms::{Ancestor, Atom, Side};
use crate::html::escape_text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Equal,
    Added,
    Removed,
    /// Same text under different formatting; `description` is an HTML
    /// fragment listing the formatting differences
    Changed { description: String },
}

impl Change {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Change::Equal => None,
            Change::Added => Some("added"),
            Change::Removed => Some("removed"),
            Change::Changed { .. } => Some("changed"),
        }
    }
}

/// An atom placed in the merged output, with its enclosing elements
/// expressed in terms of the new tree wherever a counterpart exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    pub atom: Atom,
    pub change: Change,
}

fn same_chain(a: &[Ancestor], b: &[Ancestor]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
}

fn describe_change(old: &[Ancestor], new: &[Ancestor]) -> String {
    let mut items = String::new();
    for gone in old.iter().filter(|a| !new.iter().any(|b| b.same_shape(a))) {
        items.push_str(&format!(
            "<li>removed {}</li>",
            escape_text(&gone.describe())
        ));
    }
    for came in new.iter().filter(|b| !old.iter().any(|a| a.same_shape(b))) {
        items.push_str(&format!("<li>added {}</li>", escape_text(&came.describe())));
    }
    if items.is_empty() {
        items.push_str("<li>element structure</li>");
    }
    format!("Formatting changed:<ul>{}</ul>", items)
}

/// Counterparts of old elements in the new tree
///
/// Matched atoms pair up the elements enclosing them, outermost first,
/// for as long as the tags agree.
fn map_nodes(old: &[Atom], new: &[Atom], ops: &[DiffOp]) -> HashMap<usize, Ancestor> {
    let mut mapped = HashMap::new();
    for op in ops {
        if let DiffOp::Equal {
            old_index,
            new_index,
            len,
        } = *op
        {
            for i in 0..len {
                let (a, b) = (&old[old_index + i], &new[new_index + i]);
                for (x, y) in a.ancestors.iter().zip(b.ancestors.iter()) {
                    if x.tag != y.tag {
                        break;
                    }
                    mapped.entry(x.id).or_insert_with(|| y.clone());
                }
            }
        }
    }
    mapped
}

fn translate(atom: &Atom, mapped: &HashMap<usize, Ancestor>) -> Atom {
    let ancestors = atom
        .ancestors
        .iter()
        .map(|a| match (a.side, mapped.get(&a.id)) {
            (Side::Old, Some(counterpart)) => counterpart.clone(),
            _ => a.clone(),
        })
        .collect();
    Atom {
        kind: atom.kind.clone(),
        ancestors,
    }
}

/// Compare two atom streams
///
/// Removed atoms come before the added atoms replacing them. Atoms kept in
/// place but moved under different formatting are `Changed`.
pub fn compare(old: &[Atom], new: &[Atom]) -> Vec<Annotated> {
    let old_keys: Vec<String> = old.iter().map(Atom::key).collect();
    let new_keys: Vec<String> = new.iter().map(Atom::key).collect();
    let ops = capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys);
    let mapped = map_nodes(old, new, &ops);

    let mut stream = Vec::with_capacity(old.len().max(new.len()));
    let removed = |stream: &mut Vec<Annotated>, range: std::ops::Range<usize>| {
        for atom in &old[range] {
            stream.push(Annotated {
                atom: translate(atom, &mapped),
                change: Change::Removed,
            });
        }
    };
    let added = |stream: &mut Vec<Annotated>, range: std::ops::Range<usize>| {
        for atom in &new[range] {
            stream.push(Annotated {
                atom: atom.clone(),
                change: Change::Added,
            });
        }
    };

    for op in &ops {
        match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                for i in 0..len {
                    let (a, b) = (&old[old_index + i], &new[new_index + i]);
                    let change = if same_chain(&a.ancestors, &b.ancestors) {
                        Change::Equal
                    } else {
                        Change::Changed {
                            description: describe_change(&a.ancestors, &b.ancestors),
                        }
                    };
                    stream.push(Annotated {
                        atom: b.clone(),
                        change,
                    });
                }
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => removed(&mut stream, old_index..old_index + old_len),
            DiffOp::Insert {
                new_index, new_len, ..
            } => added(&mut stream, new_index..new_index + new_len),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                removed(&mut stream, old_index..old_index + old_len);
                added(&mut stream, new_index..new_index + new_len);
            }
        }
    }
    stream
}
