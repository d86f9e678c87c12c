//! Notes matched against element signature names during a run.

use crate::addressing::{relative_href, NOTES_PATH};
use crate::config::{Note, ReportOptions};
use crate::html::HtmlTree;
use crate::model::ElementKey;

/// A note together with the place it was shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteUse {
    pub note: Note,
    pub signature: String,
    pub page: String,
    pub anchor: Option<String>,
}

/// Every note use recorded so far, in rendering order
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    uses: Vec<NoteUse>,
}

impl NoteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the notes matching `key` and return them for inline display
    pub fn record(
        &mut self,
        options: &ReportOptions,
        key: &ElementKey,
        page: &str,
        anchor: Option<&str>,
    ) -> Vec<Note> {
        let signature = key.signature_name();
        let notes: Vec<Note> = options.notes_for(&signature).cloned().collect();
        for note in &notes {
            self.uses.push(NoteUse {
                note: note.clone(),
                signature: signature.clone(),
                page: page.to_string(),
                anchor: anchor.map(str::to_string),
            });
        }
        notes
    }

    pub fn uses(&self) -> &[NoteUse] {
        &self.uses
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }
}

/// Inline block listing the notes of one element
pub fn notes_block(notes: &[Note]) -> Option<HtmlTree> {
    if notes.is_empty() {
        return None;
    }
    let mut list = HtmlTree::new("ul");
    for note in notes {
        let mut item = HtmlTree::new("li").with_child(
            HtmlTree::new("a")
                .with_attr("href", note.uri.clone())
                .with_text(note.name.clone()),
        );
        if !note.description.is_empty() {
            item.push(HtmlTree::new("span").with_text(format!(" {}", note.description)));
        }
        list.push(item);
    }
    Some(
        HtmlTree::new("div")
            .with_class("notes")
            .with_child(HtmlTree::new("span").with_class("notes-label").with_text("Notes:"))
            .with_child(list),
    )
}

/// Body of the notes index page
pub fn notes_table(index: &NoteIndex) -> HtmlTree {
    if index.is_empty() {
        return HtmlTree::new("p").with_text("No notes matched any compared element.");
    }
    let mut table = HtmlTree::new("table").with_class("notes-index").with_child(
        HtmlTree::new("tr")
            .with_child(HtmlTree::new("th").with_text("Note"))
            .with_child(HtmlTree::new("th").with_text("Element"))
            .with_child(HtmlTree::new("th").with_text("Description")),
    );
    for used in index.uses() {
        let href = relative_href(NOTES_PATH, &used.page, used.anchor.as_deref());
        table.push(
            HtmlTree::new("tr")
                .with_child(
                    HtmlTree::new("td").with_child(
                        HtmlTree::new("a")
                            .with_attr("href", used.note.uri.clone())
                            .with_text(used.note.name.clone()),
                    ),
                )
                .with_child(
                    HtmlTree::new("td").with_child(
                        HtmlTree::new("a")
                            .with_attr("href", href)
                            .with_text(used.signature.clone()),
                    ),
                )
                .with_child(HtmlTree::new("td").with_text(used.note.description.clone())),
        );
    }
    table
}
