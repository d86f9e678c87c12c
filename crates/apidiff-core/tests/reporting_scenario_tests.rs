#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apidiff_core::config::{DescriptionMode, Note, ReportOptions};
use apidiff_core::grouping::{focus_group_index, group_by};
use apidiff_core::model::{
    ApiId, CountDomain, CountKind, Direction, ElementKey, Item, Position, SymbolKind,
};
use apidiff_core::report::Reporter;
use apidiff_core::textdiff::{diff_text, DeltaKind, LayoutOptions};
use apidiff_core::ExErrorKind;
use common::{list, registry, registry_with, symbol_in, texts, util};

fn open_package_and_type(reporter: &mut impl Reporter, ids: &[usize]) {
    reporter
        .comparing(
            &Position::of(util()),
            symbol_in(ids, SymbolKind::Package, "java.util", "package java.util"),
        )
        .unwrap();
    reporter
        .comparing(
            &Position::of(list()),
            symbol_in(ids, SymbolKind::Interface, "List", "public interface List<E>"),
        )
        .unwrap();
}

#[test]
fn test_method_gains_deprecated_annotation() {
    let mut registry = registry(2);
    open_package_and_type(&mut registry, &[0, 1]);

    let add = ElementKey::executable(list(), "add", ["E"]);
    let deprecated = ElementKey::type_in(ElementKey::package(None, "java.lang"), "Deprecated");
    let method = Position::of(add.clone());
    let annotation = method.clone().annotation(deprecated);

    registry
        .comparing(
            &method,
            symbol_in(&[0, 1], SymbolKind::Method, "add", "boolean add(E e)"),
        )
        .unwrap();
    registry
        .comparing(
            &annotation,
            [(ApiId(1), Item::Text("@Deprecated".to_string()))]
                .into_iter()
                .collect(),
        )
        .unwrap();
    registry
        .report_missing(&annotation, &[ApiId(0)].into_iter().collect())
        .unwrap();
    registry.completed(&annotation, false).unwrap();
    registry.completed(&method, false).unwrap();

    let type_page = registry.route_for(&Position::of(list())).unwrap();
    let row = *registry.page(type_page).unwrap().results.row(&add).unwrap();
    assert_eq!(row.get(CountKind::ElementChanged), 1);
    assert_eq!(row.total(), 1);

    registry.completed(&Position::of(list()), false).unwrap();
    let html = registry.writer().get("java/util/List.html").unwrap().to_string();
    assert!(html.contains("id=\"add(E)\""));
    assert!(html.contains("class=\"glyph different\""));
    assert!(html.contains(">(missing)</span>"));
    assert!(html.contains(">@Deprecated</span>"));

    let package_page = registry.route_for(&Position::of(util())).unwrap();
    let rolled = *registry.page(package_page).unwrap().results.row(&list()).unwrap();
    assert_eq!(rolled.get(CountKind::ElementChanged), 1);

    registry.completed(&Position::of(util()), false).unwrap();
    registry.finish(false).unwrap();
    let index = registry.writer().get("index.html").unwrap();
    assert!(index.contains("href=\"java/util/package-summary.html\""));
}

#[test]
fn test_field_missing_from_middle_instance() {
    let apis = common::apis(3);
    let values = texts(&[(0, "x"), (2, "x")]);
    let groups = group_by(&apis, &values, String::clone);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].apis, vec![ApiId(0), ApiId(2)]);
    assert!(groups[1].is_absent());
    assert_eq!(focus_group_index(&apis, &groups), Some(0));

    // v2 is the reference, so the field counts as added
    let mut registry = registry(3);
    open_package_and_type(&mut registry, &[0, 1, 2]);
    let size = Position::of(ElementKey::variable(list(), "size"));
    registry
        .comparing(&size, symbol_in(&[0, 2], SymbolKind::Field, "size", "int size"))
        .unwrap();
    registry
        .report_missing(&size, &[ApiId(1)].into_iter().collect())
        .unwrap();
    registry.completed(&size, false).unwrap();

    let type_page = registry.route_for(&Position::of(list())).unwrap();
    let page = registry.page(type_page).unwrap();
    let row = page.results.row(size.element_key()).unwrap();
    assert_eq!(row.get(CountKind::ElementAdded), 1);
}

#[test]
fn test_missing_from_non_reference_is_not_counted() {
    let mut registry = registry(3);
    open_package_and_type(&mut registry, &[0, 1, 2]);
    let size = Position::of(ElementKey::variable(list(), "size"));
    registry
        .report_missing(&size, &[ApiId(0)].into_iter().collect())
        .unwrap();

    let type_page = registry.route_for(&Position::of(list())).unwrap();
    assert!(registry.page(type_page).unwrap().results.is_empty());
}

#[test]
fn test_doc_comment_line_change() {
    let layout = LayoutOptions {
        context: 1,
        line_numbers: false,
    };
    let diff = diff_text("v1", "A\nB\nC", "v2", "A\nX\nC", layout);
    let changes: Vec<_> = diff
        .deltas
        .iter()
        .filter(|d| d.kind != DeltaKind::Equal)
        .collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, DeltaKind::Change);
    assert_eq!(changes[0].source.lines, vec!["B".to_string()]);
    assert_eq!(changes[0].target.lines, vec!["X".to_string()]);
    assert_eq!(diff.columns.reference.text_lines(), 3);
    assert_eq!(diff.direction, Some(Direction::Changed));

    let mut registry = registry(2);
    open_package_and_type(&mut registry, &[0, 1]);
    registry
        .report_different_raw_doc_comments(
            &Position::of(list()),
            texts(&[(0, "A\nB\nC"), (1, "A\nX\nC")]),
        )
        .unwrap();
    registry.completed(&Position::of(list()), false).unwrap();

    let html = registry.writer().get("java/util/List.html").unwrap();
    assert!(html.contains("doc-diff doc-comment"));

    let package_page = registry.route_for(&Position::of(util())).unwrap();
    let rolled = *registry.page(package_page).unwrap().results.row(&list()).unwrap();
    assert_eq!(rolled.get(CountKind::CommentChanged), 1);
    assert_eq!(rolled.get(CountKind::ElementChanged), 0);
}

#[test]
fn test_description_insertion_counts_as_added() {
    let mut registry = registry(2);
    open_package_and_type(&mut registry, &[0, 1]);
    registry
        .report_different_api_descriptions(
            &Position::of(list()),
            texts(&[(0, "<p>Hello world</p>"), (1, "<p>Hello there world</p>")]),
        )
        .unwrap();
    registry.completed(&Position::of(list()), false).unwrap();

    let html = registry.writer().get("java/util/List.html").unwrap();
    assert!(html.contains("there"));

    let package_page = registry.route_for(&Position::of(util())).unwrap();
    let rolled = *registry.page(package_page).unwrap().results.row(&list()).unwrap();
    let added = CountKind::new(CountDomain::Description, Direction::Added);
    assert_eq!(rolled.get(added), 1);
    assert_eq!(rolled.total(), 1);
}

#[test]
fn test_disabled_descriptions_are_not_counted() {
    let options = ReportOptions {
        compare_api_descriptions: false,
        description_mode: DescriptionMode::Text,
        ..ReportOptions::default()
    };
    let mut registry = registry_with(2, options);
    open_package_and_type(&mut registry, &[0, 1]);
    registry
        .report_different_api_descriptions(
            &Position::of(list()),
            texts(&[(0, "old"), (1, "new")]),
        )
        .unwrap();
    registry.completed(&Position::of(list()), false).unwrap();

    let package_page = registry.route_for(&Position::of(util())).unwrap();
    let page = registry.page(package_page).unwrap();
    assert!(page.results.row(&list()).is_none());
}

#[test]
fn test_notes_are_indexed() {
    let options = ReportOptions {
        notes: vec![Note {
            name: "java.util.List".to_string(),
            uri: "https://example.org/JDK-42".to_string(),
            description: "sequenced collections".to_string(),
        }],
        ..ReportOptions::default()
    };
    let mut registry = registry_with(2, options);
    open_package_and_type(&mut registry, &[0, 1]);
    registry.completed(&Position::of(list()), true).unwrap();
    registry.completed(&Position::of(util()), true).unwrap();
    registry.finish(true).unwrap();

    let notes = registry.writer().get("notes.html").unwrap();
    assert!(notes.contains("href=\"https://example.org/JDK-42\""));
    assert!(notes.contains("href=\"java/util/List.html\""));
    let page = registry.writer().get("java/util/List.html").unwrap();
    assert!(page.contains("JDK-42"));
}

#[test]
fn test_broken_key_chain_aborts() {
    let mut registry = registry(2);
    let broken = ElementKey::type_in(ElementKey::executable(list(), "m", Vec::<String>::new()), "Local");
    let err = registry
        .comparing(
            &Position::of(broken),
            symbol_in(&[0, 1], SymbolKind::Class, "Local", "class Local"),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::BrokenKeyChain);
}
