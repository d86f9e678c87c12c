use super::element::{element_body, heading};
use super::summary::summary_table;
use super::{child_list, PageView, Scope};
use crate::html::HtmlTree;

/// Package page: signature, doc files, types, documentation, summary
///
/// Doc files are relative positions of the package and render with the
/// other relative positions.
pub fn render(scope: &mut Scope<'_>, view: &PageView<'_>) -> (String, Vec<HtmlTree>) {
    let key = view.key;
    let entry = view.own_entry().cloned().unwrap_or_default();
    let title = format!("Package {}", key.signature_name());

    let mut body = vec![heading(scope, "h1", &entry, title.clone())];
    body.extend(element_body(scope, view, key, &entry));
    body.extend(child_list(scope, "Types", view.children.values()));
    body.push(summary_table(&scope.path, scope.results));
    (title, body)
}
