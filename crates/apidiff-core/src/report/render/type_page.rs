//! Type page: the type itself, its type parameters, its members grouped as
//! fields, constructors and methods, and links to nested types.

use super::element::{element_body, heading};
use super::summary::summary_table;
use super::{child_list, PageView, Scope};
use crate::addressing::anchor_for;
use crate::html::HtmlTree;
use crate::model::{ElementKey, KeyKind, SymbolKind};
use crate::report::page::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberGroup {
    Fields,
    Constructors,
    Methods,
}

impl MemberGroup {
    fn heading(&self) -> &'static str {
        match self {
            MemberGroup::Fields => "Fields",
            MemberGroup::Constructors => "Constructors",
            MemberGroup::Methods => "Methods",
        }
    }

    fn of(key: &ElementKey, entry: &Entry) -> Option<MemberGroup> {
        match key.kind() {
            KeyKind::Variable => Some(MemberGroup::Fields),
            KeyKind::Executable if entry.symbol_kind() == Some(SymbolKind::Constructor) => {
                Some(MemberGroup::Constructors)
            }
            KeyKind::Executable => Some(MemberGroup::Methods),
            _ => None,
        }
    }
}

/// Display name of a member: `name(params)` for executables
fn member_name(key: &ElementKey) -> String {
    anchor_for(key).unwrap_or_else(|| key.simple_name().to_string())
}

fn type_parameters(
    scope: &mut Scope<'_>,
    view: &PageView<'_>,
    owner: &ElementKey,
) -> Option<HtmlTree> {
    let params: Vec<(&ElementKey, &Entry)> = view
        .members()
        .filter(|(key, _)| key.kind() == KeyKind::TypeParameter && key.enclosing() == Some(owner))
        .collect();
    if params.is_empty() {
        return None;
    }
    let mut list = HtmlTree::new("ul").with_class("type-parameters");
    for (key, entry) in params {
        let mut item = HtmlTree::new("li").with_child(heading(scope, "span", entry, key.simple_name()));
        for block in element_body(scope, view, key, entry) {
            item.push(block);
        }
        list.push(item);
    }
    Some(
        HtmlTree::new("section")
            .with_class("type-parameters")
            .with_child(HtmlTree::new("h4").with_text("Type parameters"))
            .with_child(list),
    )
}

fn member_section(
    scope: &mut Scope<'_>,
    view: &PageView<'_>,
    key: &ElementKey,
    entry: &Entry,
) -> HtmlTree {
    let mut section = HtmlTree::new("section").with_class("member");
    if let Some(anchor) = anchor_for(key) {
        section.set_attr("id", anchor);
    }
    section.push(heading(scope, "h3", entry, member_name(key)));
    for block in element_body(scope, view, key, entry) {
        section.push(block);
    }
    if let Some(params) = type_parameters(scope, view, key) {
        section.push(params);
    }
    section
}

pub fn render(scope: &mut Scope<'_>, view: &PageView<'_>) -> (String, Vec<HtmlTree>) {
    let key = view.key;
    let entry = view.own_entry().cloned().unwrap_or_default();
    let label = entry.symbol_kind().map(|kind| kind.label()).unwrap_or("type");
    let title = format!("{}{} {}", label[..1].to_uppercase(), &label[1..], key.signature_name());

    let mut body = vec![heading(scope, "h1", &entry, title.clone())];
    body.extend(element_body(scope, view, key, &entry));
    body.extend(type_parameters(scope, view, key));

    for group in [MemberGroup::Fields, MemberGroup::Constructors, MemberGroup::Methods] {
        let members: Vec<(&ElementKey, &Entry)> = view
            .members()
            .filter(|(member, entry)| MemberGroup::of(member, entry) == Some(group))
            .collect();
        if members.is_empty() {
            continue;
        }
        let mut section = HtmlTree::new("section")
            .with_class(format!("members {}", group.heading().to_lowercase()))
            .with_child(HtmlTree::new("h2").with_text(group.heading()));
        for (member, member_entry) in members {
            section.push(member_section(scope, view, member, member_entry));
        }
        body.push(section);
    }

    body.extend(child_list(scope, "Nested types", view.children.values()));
    body.push(summary_table(&scope.path, scope.results));
    (title, body)
}
