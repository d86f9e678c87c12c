//! Per-page summary table: one row per counted element, the nine count
//! kinds plus a total, and a footer with the page totals.

use crate::addressing::{anchor_for, path_for, relative_href};
use crate::html::{Content, HtmlTree};
use crate::model::{CountDomain, CountKind, Counts, Direction, ElementKey, ResultTable};

fn domain_label(domain: CountDomain) -> &'static str {
    match domain {
        CountDomain::Element => "Elements",
        CountDomain::Comment => "Comments",
        CountDomain::Description => "Descriptions",
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Added => "added",
        Direction::Changed => "changed",
        Direction::Removed => "removed",
    }
}

fn count_cells(row: &mut HtmlTree, counts: &Counts, cell: &str) {
    for kind in CountKind::ALL {
        let value = counts.get(kind);
        let mut td = HtmlTree::new(cell).with_class(direction_label(kind.direction()));
        if value > 0 {
            td.push(Content::text(value.to_string()));
        }
        row.push(td);
    }
    row.push(
        HtmlTree::new(cell)
            .with_class("total")
            .with_text(counts.total().to_string()),
    );
}

fn row_label(from: &str, key: &ElementKey) -> HtmlTree {
    let text = key.signature_name();
    match path_for(key) {
        Some(to) => HtmlTree::new("a")
            .with_attr("href", relative_href(from, &to, anchor_for(key).as_deref()))
            .with_text(text),
        None => HtmlTree::new("span").with_text(text),
    }
}

/// Summary table for the page at `from`
pub fn summary_table(from: &str, results: &ResultTable) -> HtmlTree {
    let mut section = HtmlTree::new("section")
        .with_class("summary")
        .with_child(HtmlTree::new("h2").with_text("Summary"));
    if results.is_empty() {
        section.push(HtmlTree::new("p").with_text("No differences were counted."));
        return section;
    }

    let mut groups = HtmlTree::new("tr").with_child(HtmlTree::new("th").with_attr("rowspan", "2"));
    for domain in [CountDomain::Element, CountDomain::Comment, CountDomain::Description] {
        groups.push(
            HtmlTree::new("th")
                .with_attr("colspan", "3")
                .with_text(domain_label(domain)),
        );
    }
    groups.push(
        HtmlTree::new("th")
            .with_attr("rowspan", "2")
            .with_text("Total"),
    );
    let mut directions = HtmlTree::new("tr");
    for kind in CountKind::ALL {
        directions.push(HtmlTree::new("th").with_text(direction_label(kind.direction())));
    }

    let mut body = HtmlTree::new("tbody");
    for (key, counts) in results.rows() {
        let mut row =
            HtmlTree::new("tr").with_child(HtmlTree::new("td").with_child(row_label(from, key)));
        count_cells(&mut row, counts, "td");
        body.push(row);
    }

    let mut footer = HtmlTree::new("tr").with_child(HtmlTree::new("th").with_text("Total"));
    count_cells(&mut footer, &results.totals(), "th");

    section.push(
        HtmlTree::new("table")
            .with_class("summary-table")
            .with_child(HtmlTree::new("thead").with_child(groups).with_child(directions))
            .with_child(body)
            .with_child(HtmlTree::new("tfoot").with_child(footer)),
    );
    section
}
