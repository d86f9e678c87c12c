//! HTML rendering of completed pages.
//!
//! Each page kind has its own module; they share the document frame, the
//! element sections and the summary table defined here and in the sibling
//! modules. Renderers only read page data, except for the documentation
//! diffs, which add their counts to the page's result table.

pub mod alternatives;
pub mod docs;
pub mod element;
pub mod index_page;
pub mod module_page;
pub mod package_page;
pub mod stylesheet;
pub mod summary;
pub mod type_page;

use std::collections::BTreeMap;

use crate::addressing::{
    anchor_for, page_path, parent_page_key, path_for, relative_href, INDEX_PATH, STYLESHEET_PATH,
};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::html::{escape_text, HtmlTree};
use crate::model::{ElementKey, KeyKind, Position, ResultKind, ResultTable};
use crate::report::context::ReportContext;
use crate::report::notes::NoteIndex;
use crate::report::page::{ChildLink, Entry, Page};

/// Mutable state a page render may touch
pub struct Scope<'a> {
    pub ctx: &'a ReportContext,
    /// Output path of the page being rendered
    pub path: String,
    pub notes: &'a mut NoteIndex,
    pub results: &'a mut ResultTable,
}

impl Scope<'_> {
    /// Link from this page to the page (and anchor) showing `key`
    pub fn href_for(&self, key: &ElementKey) -> Option<String> {
        let to = path_for(key)?;
        let anchor = anchor_for(key);
        Some(relative_href(&self.path, &to, anchor.as_deref()))
    }

    /// Link to `key`, or plain text when it has no page
    pub fn link_to(&self, key: &ElementKey, text: impl Into<String>) -> HtmlTree {
        match self.href_for(key) {
            Some(href) => HtmlTree::new("a").with_attr("href", href).with_text(text),
            None => HtmlTree::new("span").with_text(text),
        }
    }
}

/// Glyph marking the comparison result of an element
pub fn glyph(result: ResultKind) -> HtmlTree {
    HtmlTree::new("span")
        .with_class(format!("glyph {}", result.css_class()))
        .with_attr("title", result.description())
        .with_text(result.glyph())
}

/// List of links to completed child pages, with their result glyphs
pub fn child_list<'l>(
    scope: &Scope<'_>,
    heading: &str,
    links: impl IntoIterator<Item = &'l ChildLink>,
) -> Option<HtmlTree> {
    let mut list = HtmlTree::new("ul").with_class("children");
    for link in links {
        let mut item = HtmlTree::new("li")
            .with_child(glyph(link.result))
            .with_text(" ");
        if let Some(kind) = link.kind {
            item.push(
                HtmlTree::new("span")
                    .with_class("kind")
                    .with_text(format!("{} ", kind.label())),
            );
        }
        item.push(
            HtmlTree::new("a")
                .with_attr("href", relative_href(&scope.path, &link.path, None))
                .with_text(link.key.signature_name()),
        );
        list.push(item);
    }
    if list.is_empty() {
        return None;
    }
    Some(
        HtmlTree::new("section")
            .with_class("children")
            .with_child(HtmlTree::new("h2").with_text(heading))
            .with_child(list),
    )
}

/// Read-only view of a page's collected data
pub struct PageView<'a> {
    pub key: &'a ElementKey,
    pub entries: &'a BTreeMap<Position, Entry>,
    pub children: &'a BTreeMap<ElementKey, ChildLink>,
}

impl PageView<'_> {
    pub fn own_entry(&self) -> Option<&Entry> {
        self.entries.get(&Position::of(self.key.clone()))
    }

    /// Element positions on the page other than its own, ordered by key
    pub fn members(&self) -> impl Iterator<Item = (&ElementKey, &Entry)> {
        self.entries
            .iter()
            .filter(|(position, _)| position.is_element() && position.element_key() != self.key)
            .map(|(position, entry)| (position.element_key(), entry))
    }

    /// Relative positions rooted at `key`
    pub fn relatives_of<'k>(
        &'k self,
        key: &'k ElementKey,
    ) -> impl Iterator<Item = (&'k Position, &'k Entry)> + 'k {
        self.entries
            .iter()
            .filter(move |(position, _)| !position.is_element() && position.element_key() == key)
    }
}

/// Render a module, package or type page
///
/// # Errors
///
/// Returns `Internal` for the root page, which is rendered by
/// [`index_page::render`], and `UnroutablePosition` when the page key does
/// not own a page.
pub fn render_page(ctx: &ReportContext, notes: &mut NoteIndex, page: &mut Page) -> Result<String> {
    let path = page.path();
    let Page {
        key,
        entries,
        children,
        results,
    } = page;
    let Some(key) = key.as_ref() else {
        return Err(ExError::new(ExErrorKind::Internal)
            .with_op("render_page")
            .with_message("the root page renders on finish"));
    };
    let parent = parent_page_key(key)?;
    let mut scope = Scope {
        ctx,
        path,
        notes,
        results,
    };
    let view = PageView {
        key,
        entries,
        children,
    };
    let (title, body) = match key.kind() {
        KeyKind::Module => module_page::render(&mut scope, &view),
        KeyKind::Package => package_page::render(&mut scope, &view),
        _ => type_page::render(&mut scope, &view),
    };
    Ok(document(ctx, &scope.path, &title, parent.as_ref(), body))
}

/// Wrap a page body in the document frame
///
/// The breadcrumb links to the index and, for nested pages, to the page the
/// current one reports to.
pub fn document(
    ctx: &ReportContext,
    path: &str,
    title: &str,
    parent: Option<&ElementKey>,
    body: Vec<HtmlTree>,
) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{} - {}</title>\n",
        escape_text(title),
        escape_text(&ctx.options.title)
    ));
    out.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        relative_href(path, STYLESHEET_PATH, None)
    ));
    out.push_str("</head>\n<body>\n");

    if path != INDEX_PATH {
        let mut nav = HtmlTree::new("nav").with_class("breadcrumb").with_child(
            HtmlTree::new("a")
                .with_attr("href", relative_href(path, INDEX_PATH, None))
                .with_text(ctx.options.title.clone()),
        );
        if let Some(parent) = parent {
            nav.push(HtmlTree::new("span").with_text(" / "));
            nav.push(
                HtmlTree::new("a")
                    .with_attr("href", relative_href(path, &page_path(Some(parent)), None))
                    .with_text(parent.signature_name()),
            );
        }
        out.push_str(&nav.to_html());
        out.push('\n');
    }

    out.push_str("<main>\n");
    for block in body {
        out.push_str(&block.to_html());
        out.push('\n');
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}
