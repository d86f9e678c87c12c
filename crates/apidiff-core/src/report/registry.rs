//! Page registry: routes every callback to the page owning its position,
//! renders each page once its own key completes and rolls its counts up to
//! the page it reports to.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use crate::addressing::{page_key_for, parent_page_key, INDEX_PATH, NOTES_PATH, STYLESHEET_PATH};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::{ApiId, ApiMap, CountKind, ElementKey, FacetMap, Item, Position};
use crate::report::context::ReportContext;
use crate::report::notes::NoteIndex;
use crate::report::page::Page;
use crate::report::render::{index_page, render_page, stylesheet::STYLESHEET};
use crate::report::reporter::Reporter;
use crate::report::writer::ReportWriter;
use crate::{log_op_end, log_op_error, log_op_start};

/// Handle to a page in the registry
///
/// Stable for the whole run: routing the same page key again always yields
/// the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(usize);

#[derive(Debug)]
enum Slot {
    Open(Page),
    Rendered { path: String },
}

/// The report engine's [`Reporter`]
pub struct PageRegistry<W: ReportWriter> {
    ctx: ReportContext,
    writer: W,
    index: BTreeMap<ElementKey, PageId>,
    slots: Vec<Slot>,
    root: Page,
    notes: NoteIndex,
    finished: bool,
}

impl<W: ReportWriter> PageRegistry<W> {
    pub fn new(ctx: ReportContext, writer: W) -> Self {
        Self {
            ctx,
            writer,
            index: BTreeMap::new(),
            slots: Vec::new(),
            root: Page::new(None),
            notes: NoteIndex::new(),
            finished: false,
        }
    }

    pub fn context(&self) -> &ReportContext {
        &self.ctx
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// The page that owns `position`, created on first use
    ///
    /// # Errors
    ///
    /// Returns `BrokenKeyChain` when the position's key chain is malformed.
    pub fn route_for(&mut self, position: &Position) -> Result<PageId> {
        let key = page_key_for(position.element_key())
            .map_err(|e| e.with_position(position.to_string()))?;
        Ok(self.route_key(key))
    }

    fn route_key(&mut self, key: ElementKey) -> PageId {
        if let Some(id) = self.index.get(&key) {
            return *id;
        }
        let id = PageId(self.slots.len());
        self.slots.push(Slot::Open(Page::new(Some(key.clone()))));
        self.index.insert(key, id);
        id
    }

    /// The page behind `id`, or `None` once it has been rendered
    pub fn page(&self, id: PageId) -> Option<&Page> {
        match self.slots.get(id.0)? {
            Slot::Open(page) => Some(page),
            Slot::Rendered { .. } => None,
        }
    }

    pub fn is_rendered(&self, key: &ElementKey) -> bool {
        self.index
            .get(key)
            .and_then(|id| self.slots.get(id.0))
            .is_some_and(|slot| matches!(slot, Slot::Rendered { .. }))
    }

    /// Aggregated counts of the root index, by top-level page key
    pub fn root(&self) -> &Page {
        &self.root
    }

    fn ensure_running(&self, op: &str) -> Result<()> {
        if self.finished {
            return Err(ExError::new(ExErrorKind::RunAlreadyFinished)
                .with_op(op)
                .with_run_id(self.ctx.run_id.clone()));
        }
        Ok(())
    }

    fn open_page(&mut self, id: PageId, op: &str, position: &Position) -> Result<&mut Page> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Open(page)) => Ok(page),
            Some(Slot::Rendered { path }) => Err(ExError::new(ExErrorKind::PageAlreadyRendered)
                .with_op(op)
                .with_position(position.to_string())
                .with_path(path.clone())),
            None => Err(ExError::new(ExErrorKind::Internal)
                .with_op(op)
                .with_message(format!("no page slot {}", id.0))),
        }
    }

    /// Route and open the page owning `position` for an event
    fn page_for(&mut self, op: &str, position: &Position) -> Result<&mut Page> {
        self.ensure_running(op)?;
        let id = self.route_for(position)?;
        self.open_page(id, op, position)
    }

    /// Render a page whose own key completed and fold it into its parent
    fn complete_page(&mut self, id: PageId, position: &Position) -> Result<()> {
        let mut page = match std::mem::replace(
            &mut self.slots[id.0],
            Slot::Rendered {
                path: String::new(),
            },
        ) {
            Slot::Open(page) => page,
            rendered => {
                self.slots[id.0] = rendered;
                return Err(ExError::new(ExErrorKind::PageAlreadyRendered)
                    .with_op("completed")
                    .with_position(position.to_string()));
            }
        };
        let path = page.path();
        self.slots[id.0] = Slot::Rendered { path: path.clone() };

        log_op_start!("render_page", page = %path);
        let start = Instant::now();
        let written = render_page(&self.ctx, &mut self.notes, &mut page)
            .and_then(|html| self.writer.write(&path, &html));
        if let Err(e) = written {
            let e = e.with_path(path.clone()).with_run_id(self.ctx.run_id.clone());
            log_op_error!(
                "render_page",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                page = %path
            );
            return Err(e);
        }
        log_op_end!(
            "render_page",
            duration_ms = start.elapsed().as_millis() as u64,
            page = %path
        );

        let Some(link) = page.child_link(&self.ctx.apis) else {
            return Err(ExError::new(ExErrorKind::Internal)
                .with_op("completed")
                .with_path(path)
                .with_message("rendered page has no key"));
        };
        match parent_page_key(&link.key)? {
            None => self.root.add_child(link, &page.results),
            Some(parent_key) => {
                let parent_id = self.route_key(parent_key);
                self.open_page(parent_id, "completed", position)?
                    .add_child(link, &page.results);
            }
        }
        Ok(())
    }

    fn write_file(&mut self, path: &str, contents: &str) -> Result<()> {
        self.writer
            .write(path, contents)
            .map_err(|e| e.with_path(path).with_run_id(self.ctx.run_id.clone()))
    }

    fn write_index(&mut self, all_equal: bool) -> Result<()> {
        log_op_start!("render_page", page = INDEX_PATH);
        let start = Instant::now();
        let index = index_page::render(&self.ctx, &mut self.notes, &self.root, all_equal);
        let notes = index_page::render_notes(&self.ctx, &self.notes);
        let written = self
            .write_file(INDEX_PATH, &index)
            .and_then(|()| self.write_file(NOTES_PATH, &notes))
            .and_then(|()| self.write_file(STYLESHEET_PATH, STYLESHEET));
        match written {
            Ok(()) => {
                log_op_end!(
                    "render_page",
                    duration_ms = start.elapsed().as_millis() as u64,
                    page = INDEX_PATH
                );
                Ok(())
            }
            Err(e) => {
                log_op_error!(
                    "render_page",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    page = INDEX_PATH
                );
                Err(e)
            }
        }
    }
}

impl<W: ReportWriter> Reporter for PageRegistry<W> {
    fn comparing(&mut self, position: &Position, values: ApiMap<Item>) -> Result<()> {
        self.page_for("comparing", position)?
            .insert_values(position, values)
    }

    fn completed(&mut self, position: &Position, equal: bool) -> Result<()> {
        self.ensure_running("completed")?;
        let id = self.route_for(position)?;
        let page = self.open_page(id, "completed", position)?;
        page.entry_mut(position).equal = Some(equal);
        if page.is_own(position) {
            self.complete_page(id, position)?;
        }
        Ok(())
    }

    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>) -> Result<()> {
        let reference_missing = missing.contains(&self.ctx.apis.reference());
        let focus_missing = missing.contains(&self.ctx.apis.focus());
        let count = if position.is_element() {
            match (reference_missing, focus_missing) {
                (true, false) => Some(CountKind::ElementAdded),
                (false, true) => Some(CountKind::ElementRemoved),
                _ => None,
            }
        } else if reference_missing != focus_missing {
            Some(CountKind::ElementChanged)
        } else {
            None
        };

        let page = self.page_for("report_missing", position)?;
        page.entry_mut(position).missing.extend(missing.iter().copied());
        if let Some(kind) = count {
            page.results.increment(position.element_key(), kind);
        }
        Ok(())
    }

    fn report_different(&mut self, position: &Position, values: FacetMap) -> Result<()> {
        // documentation is counted when its diff renders
        let changed = !values.facet().is_documentation()
            && values.differs(self.ctx.apis.reference(), self.ctx.apis.focus());

        let page = self.page_for("report_different", position)?;
        page.entry_mut(position).facets.push(values);
        if changed {
            page.results
                .increment(position.element_key(), CountKind::ElementChanged);
        }
        Ok(())
    }

    fn finish(&mut self, all_equal: bool) -> Result<()> {
        self.ensure_running("finish")?;
        let open: Vec<String> = self
            .slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Open(page) => Some(page.path()),
                Slot::Rendered { .. } => None,
            })
            .collect();
        if let Some(first) = open.first() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("finish")
                .with_path(first.clone())
                .with_run_id(self.ctx.run_id.clone())
                .with_message(format!("{} page(s) never completed", open.len())));
        }
        self.finished = true;
        self.write_index(all_equal)
    }
}
