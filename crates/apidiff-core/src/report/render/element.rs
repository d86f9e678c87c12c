//! The section shown for one element: signature, facets, relative
//! positions, notes and documentation diffs.

use super::alternatives::alternatives;
use super::docs::{description_section, doc_comment_section, doc_file_diff};
use super::{glyph, PageView, Scope};
use crate::addressing::anchor_for;
use crate::html::HtmlTree;
use crate::model::{ElementKey, Facet, Position, RelativeKind};
use crate::report::notes::notes_block;
use crate::report::page::Entry;

/// Heading with the result glyph and the element name
pub fn heading(scope: &Scope<'_>, level: &str, entry: &Entry, text: impl Into<String>) -> HtmlTree {
    HtmlTree::new(level)
        .with_child(glyph(entry.result(&scope.ctx.apis)))
        .with_text(" ")
        .with_text(text)
}

/// Signature block in the two-alternative view
pub fn signature(scope: &Scope<'_>, entry: &Entry) -> Option<HtmlTree> {
    entry.values.as_ref()?;
    Some(
        HtmlTree::new("div")
            .with_class("signature")
            .with_child(alternatives(&scope.ctx.apis, &entry.texts())),
    )
}

/// Differing facets other than documentation
pub fn facets(scope: &Scope<'_>, entry: &Entry) -> Option<HtmlTree> {
    let mut list = HtmlTree::new("dl").with_class("facets");
    for map in &entry.facets {
        let facet = map.facet();
        if facet.is_documentation() || facet == Facet::DocFiles {
            continue;
        }
        list.push(HtmlTree::new("dt").with_text(facet.heading()));
        list.push(HtmlTree::new("dd").with_child(alternatives(&scope.ctx.apis, &map.texts())));
    }
    (!list.is_empty()).then_some(list)
}

/// Label of a relative position: its indices beyond the element key
fn relative_label(position: &Position) -> String {
    position
        .chain()
        .iter()
        .map(|(kind, index)| match index {
            Some(index) => index.to_string(),
            None => kind.as_str().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn relative_item(scope: &Scope<'_>, position: &Position, entry: &Entry) -> HtmlTree {
    let mut item = HtmlTree::new("li")
        .with_child(glyph(entry.result(&scope.ctx.apis)))
        .with_text(" ")
        .with_child(
            HtmlTree::new("span")
                .with_class("relative-label")
                .with_text(relative_label(position)),
        );
    if position.relative_kind() == Some(RelativeKind::DocFile) {
        for comparison in doc_file_diff(scope, entry) {
            item.push(HtmlTree::new("div").with_class("comparison").with_child(comparison));
        }
        return item;
    }
    if entry.values.is_some() {
        item.push(HtmlTree::new("span").with_text(": "));
        item.push(alternatives(&scope.ctx.apis, &entry.texts()));
    }
    if let Some(facets) = facets(scope, entry) {
        item.push(facets);
    }
    item
}

/// Relative positions of `key`, one list per kind of the first step
pub fn relatives(scope: &Scope<'_>, view: &PageView<'_>, key: &ElementKey) -> Vec<HtmlTree> {
    let mut sections: Vec<(RelativeKind, HtmlTree)> = Vec::new();
    for (position, entry) in view.relatives_of(key) {
        let Some((kind, _)) = position.chain().first().copied() else {
            continue;
        };
        let item = relative_item(scope, position, entry);
        match sections.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, list)) => list.push(item),
            None => sections.push((kind, HtmlTree::new("ul").with_child(item))),
        }
    }
    sections
        .into_iter()
        .map(|(kind, list)| {
            HtmlTree::new("section")
                .with_class(format!("relatives {}", kind.as_str()))
                .with_child(HtmlTree::new("h4").with_text(kind.heading()))
                .with_child(list)
        })
        .collect()
}

/// Everything shown for one element below its heading
pub fn element_body(
    scope: &mut Scope<'_>,
    view: &PageView<'_>,
    key: &ElementKey,
    entry: &Entry,
) -> Vec<HtmlTree> {
    let mut body = Vec::new();
    body.extend(signature(scope, entry));
    body.extend(facets(scope, entry));

    let anchor = anchor_for(key);
    let notes = scope
        .notes
        .record(&scope.ctx.options, key, &scope.path, anchor.as_deref());
    body.extend(notes_block(&notes));

    body.extend(relatives(scope, view, key));
    body.extend(doc_comment_section(scope, key, entry));
    body.extend(description_section(scope, key, entry));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKey, RelativeIndex};

    #[test]
    fn test_relative_label_uses_indices() {
        let method = ElementKey::executable(
            ElementKey::type_in(ElementKey::package(None, "p"), "C"),
            "m",
            ["int"],
        );
        let position = Position::of(method)
            .parameter(0)
            .relative(RelativeKind::Annotation, Some(RelativeIndex::Name("NonNull".to_string())));
        assert_eq!(relative_label(&position), "0 / NonNull");

        let uid = Position::of(ElementKey::type_in(ElementKey::package(None, "p"), "C"))
            .relative(RelativeKind::SerialVersionUid, None);
        assert_eq!(relative_label(&uid), "serial_version_uid");
    }
}
