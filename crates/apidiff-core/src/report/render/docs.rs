//! Documentation diffs: doc comments, API descriptions and doc files.
//!
//! All three go through the grouping engine, so every distinct historical
//! value is compared against the focus value once. Doc comments and
//! descriptions count the reference comparison into the page's result
//! table; doc file changes are already counted as element changes when
//! they are reported.

use super::Scope;
use crate::config::DescriptionMode;
use crate::grouping::{compare_with_focus, GroupComparison};
use crate::html::HtmlTree;
use crate::markup::MarkupDiffRenderer;
use crate::model::{ApiMap, CountDomain, CountKind, Direction, ElementKey, Facet, FacetMap, Item};
use crate::report::page::Entry;
use crate::textdiff::{split_lines, TextDiffRenderer};

fn section(class: &str, heading: &str, comparisons: Vec<HtmlTree>) -> Option<HtmlTree> {
    if comparisons.is_empty() {
        return None;
    }
    let mut section = HtmlTree::new("section")
        .with_class(format!("doc-diff {}", class))
        .with_child(HtmlTree::new("h4").with_text(heading));
    for comparison in comparisons {
        section.push(HtmlTree::new("div").with_class("comparison").with_child(comparison));
    }
    Some(section)
}

fn comparison_html<O>(
    comparisons: Vec<GroupComparison<O>>,
    to_html: impl Fn(&O) -> HtmlTree,
) -> Vec<HtmlTree> {
    comparisons.iter().map(|c| to_html(&c.output)).collect()
}

/// Doc comment diff of `key`, when enabled and reported
pub fn doc_comment_section(
    scope: &mut Scope<'_>,
    key: &ElementKey,
    entry: &Entry,
) -> Option<HtmlTree> {
    if !scope.ctx.options.compare_doc_comments {
        return None;
    }
    let Some(FacetMap::RawDocComments(map)) = entry.facet(Facet::RawDocComments) else {
        return None;
    };
    let apis = &scope.ctx.apis;
    let mut renderer = TextDiffRenderer::new(apis, scope.ctx.layout_options());
    let results = &mut *scope.results;
    let mut sink = |direction: Direction| {
        results.increment(key, CountKind::new(CountDomain::Comment, direction));
    };
    let comparisons = compare_with_focus(apis, map, |text: &String| line_text(text), &mut renderer, &mut sink);
    section(
        "doc-comment",
        Facet::RawDocComments.heading(),
        comparison_html(comparisons, |output| output.to_html()),
    )
}

/// API description diff of `key`, in the configured mode
pub fn description_section(
    scope: &mut Scope<'_>,
    key: &ElementKey,
    entry: &Entry,
) -> Option<HtmlTree> {
    if !scope.ctx.options.compare_api_descriptions {
        return None;
    }
    let Some(FacetMap::ApiDescriptions(map)) = entry.facet(Facet::ApiDescriptions) else {
        return None;
    };
    let apis = &scope.ctx.apis;
    let results = &mut *scope.results;
    let mut sink = |direction: Direction| {
        results.increment(key, CountKind::new(CountDomain::Description, direction));
    };
    let rendered = match scope.ctx.options.description_mode {
        DescriptionMode::Markup => {
            let mut renderer = MarkupDiffRenderer::new(apis, key);
            let comparisons = compare_with_focus(
                apis,
                map,
                |text: &String| normalize_markup(text),
                &mut renderer,
                &mut sink,
            );
            comparison_html(comparisons, |output| output.to_html())
        }
        DescriptionMode::Text => {
            let mut renderer = TextDiffRenderer::new(apis, scope.ctx.layout_options());
            let comparisons = compare_with_focus(apis, map, |text: &String| line_text(text), &mut renderer, &mut sink);
            comparison_html(comparisons, |output| output.to_html())
        }
    };
    section("description", Facet::ApiDescriptions.heading(), rendered)
}

/// Text equality is line equality, whatever the line terminators
fn line_text(text: &str) -> String {
    split_lines(text).join("\n")
}

/// Markup equality ignores runs of whitespace
fn normalize_markup(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Content of a doc file per instance
///
/// Reported facet values take precedence over the registered items.
pub fn doc_file_contents(entry: &Entry) -> ApiMap<String> {
    if let Some(FacetMap::DocFiles(map)) = entry.facet(Facet::DocFiles) {
        return map.map(|file| file.content.clone());
    }
    match &entry.values {
        Some(values) => values.map(|item| match item {
            Item::DocFile(file) => file.content.clone(),
            other => other.display_text().to_string(),
        }),
        None => ApiMap::new(),
    }
}

/// Text diff of one doc file's content across instances
pub fn doc_file_diff(scope: &Scope<'_>, entry: &Entry) -> Vec<HtmlTree> {
    let contents = doc_file_contents(entry);
    let apis = &scope.ctx.apis;
    let mut renderer = TextDiffRenderer::new(apis, scope.ctx.layout_options());
    let mut uncounted = |_: Direction| {};
    let comparisons =
        compare_with_focus(apis, &contents, String::clone, &mut renderer, &mut uncounted);
    comparison_html(comparisons, |output| output.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportOptions;
    use crate::model::{Api, ApiId, ApiSet, CountKind, ResultTable};
    use crate::report::context::ReportContext;
    use crate::report::notes::NoteIndex;

    fn ctx(options: ReportOptions) -> ReportContext {
        let apis = ApiSet::new(vec![Api::new("v1", ""), Api::new("v2", "")]).unwrap();
        ReportContext::new(apis, options)
    }

    fn key() -> ElementKey {
        ElementKey::type_in(ElementKey::package(None, "p"), "C")
    }

    fn entry_with(facet: FacetMap) -> Entry {
        Entry {
            facets: vec![facet],
            ..Entry::default()
        }
    }

    fn texts(a: &str, b: &str) -> ApiMap<String> {
        [(ApiId(0), a.to_string()), (ApiId(1), b.to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_doc_comment_counts_changed() {
        let ctx = ctx(ReportOptions::default());
        let mut notes = NoteIndex::new();
        let mut results = ResultTable::new();
        let mut scope = Scope {
            ctx: &ctx,
            path: "p/C.html".to_string(),
            notes: &mut notes,
            results: &mut results,
        };
        let entry = entry_with(FacetMap::RawDocComments(texts("A\nB\nC", "A\nX\nC")));
        let html = doc_comment_section(&mut scope, &key(), &entry).unwrap().to_html();
        assert!(html.contains("text-diff"));
        assert_eq!(results.row(&key()).unwrap().get(CountKind::CommentChanged), 1);
    }

    #[test]
    fn test_markup_description_counts_added() {
        let ctx = ctx(ReportOptions::default());
        let mut notes = NoteIndex::new();
        let mut results = ResultTable::new();
        let mut scope = Scope {
            ctx: &ctx,
            path: "p/C.html".to_string(),
            notes: &mut notes,
            results: &mut results,
        };
        let entry = entry_with(FacetMap::ApiDescriptions(texts(
            "<p>Hello world</p>",
            "<p>Hello there world</p>",
        )));
        let html = description_section(&mut scope, &key(), &entry).unwrap().to_html();
        assert!(html.contains("<span class=\"added\">there </span>"));
        let row = results.row(&key()).unwrap();
        assert_eq!(row.get(CountKind::DescriptionAdded), 1);
        assert_eq!(row.get(CountKind::DescriptionChanged), 0);
    }

    #[test]
    fn test_terminator_only_difference_is_not_counted() {
        let ctx = ctx(ReportOptions::default());
        let mut notes = NoteIndex::new();
        let mut results = ResultTable::new();
        let mut scope = Scope {
            ctx: &ctx,
            path: "p/C.html".to_string(),
            notes: &mut notes,
            results: &mut results,
        };
        let entry = entry_with(FacetMap::RawDocComments(texts("A\r\nB\n", "A\nB")));
        assert!(doc_comment_section(&mut scope, &key(), &entry).is_none());
        assert!(results.row(&key()).is_none());
    }

    #[test]
    fn test_failed_markup_description_is_not_counted() {
        let ctx = ctx(ReportOptions::default());
        let mut notes = NoteIndex::new();
        let mut results = ResultTable::new();
        let mut scope = Scope {
            ctx: &ctx,
            path: "p/C.html".to_string(),
            notes: &mut notes,
            results: &mut results,
        };
        let deep = "<b>".repeat(crate::markup::MAX_DEPTH + 2);
        let entry = entry_with(FacetMap::ApiDescriptions(texts("<p>x</p>", &deep)));
        let html = description_section(&mut scope, &key(), &entry).unwrap().to_html();
        assert!(html.contains("markup-diff empty"));
        assert!(results.row(&key()).is_none());
    }

    #[test]
    fn test_disabled_doc_comments_are_skipped() {
        let ctx = ctx(ReportOptions {
            compare_doc_comments: false,
            ..ReportOptions::default()
        });
        let mut notes = NoteIndex::new();
        let mut results = ResultTable::new();
        let mut scope = Scope {
            ctx: &ctx,
            path: "p/C.html".to_string(),
            notes: &mut notes,
            results: &mut results,
        };
        let entry = entry_with(FacetMap::RawDocComments(texts("a", "b")));
        assert!(doc_comment_section(&mut scope, &key(), &entry).is_none());
        assert!(results.is_empty());
    }
}
