//! The root index page and the notes index.

use super::summary::summary_table;
use super::{child_list, document, glyph, Scope};
use crate::addressing::{relative_href, INDEX_PATH, NOTES_PATH};
use crate::html::HtmlTree;
use crate::model::ResultKind;
use crate::report::context::ReportContext;
use crate::report::notes::{notes_table, NoteIndex};
use crate::report::page::Page;

fn api_table(ctx: &ReportContext) -> HtmlTree {
    let mut table = HtmlTree::new("table").with_class("apis").with_child(
        HtmlTree::new("tr")
            .with_child(HtmlTree::new("th").with_text("Name"))
            .with_child(HtmlTree::new("th").with_text("Label"))
            .with_child(HtmlTree::new("th")),
    );
    for (id, api) in ctx.apis.iter() {
        let role = if id == ctx.apis.focus() {
            "focus"
        } else if id == ctx.apis.reference() {
            "reference"
        } else {
            ""
        };
        table.push(
            HtmlTree::new("tr")
                .with_child(HtmlTree::new("td").with_text(api.name.clone()))
                .with_child(HtmlTree::new("td").with_text(api.label.clone()))
                .with_child(HtmlTree::new("td").with_class("role").with_text(role)),
        );
    }
    HtmlTree::new("section")
        .with_class("apis")
        .with_child(HtmlTree::new("h2").with_text("Compared APIs"))
        .with_child(table)
}

fn legend() -> HtmlTree {
    let mut list = HtmlTree::new("ul").with_class("legend");
    for result in ResultKind::ALL {
        list.push(
            HtmlTree::new("li")
                .with_child(glyph(result))
                .with_text(format!(" {}", result.description())),
        );
    }
    HtmlTree::new("section")
        .with_class("legend")
        .with_child(HtmlTree::new("h2").with_text("Legend"))
        .with_child(list)
}

/// Render the root index page
pub fn render(ctx: &ReportContext, notes: &mut NoteIndex, root: &Page, all_equal: bool) -> String {
    let mut results = root.results.clone();
    let scope = Scope {
        ctx,
        path: INDEX_PATH.to_string(),
        notes,
        results: &mut results,
    };
    let overall = if all_equal {
        ResultKind::Same
    } else {
        ResultKind::Different
    };

    let mut body = vec![HtmlTree::new("h1")
        .with_child(glyph(overall))
        .with_text(format!(" {}", ctx.options.title))];
    if !ctx.options.description.is_empty() {
        body.push(
            HtmlTree::new("p")
                .with_class("description")
                .with_text(ctx.options.description.clone()),
        );
    }
    body.push(api_table(ctx));
    body.extend(child_list(&scope, "Contents", root.children.values()));
    body.push(legend());
    body.push(summary_table(INDEX_PATH, &root.results));
    body.push(
        HtmlTree::new("p").with_class("notes-link").with_child(
            HtmlTree::new("a")
                .with_attr("href", relative_href(INDEX_PATH, NOTES_PATH, None))
                .with_text("Notes"),
        ),
    );
    if ctx.options.timestamp {
        body.push(HtmlTree::new("p").with_class("timestamp").with_text(format!(
            "Generated {}",
            ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )));
    }
    document(ctx, INDEX_PATH, &ctx.options.title, None, body)
}

/// Render the notes index
pub fn render_notes(ctx: &ReportContext, notes: &NoteIndex) -> String {
    let body = vec![
        HtmlTree::new("h1").with_text("Notes"),
        notes_table(notes),
    ];
    document(ctx, NOTES_PATH, "Notes", None, body)
}
