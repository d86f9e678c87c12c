//! Per-page accumulation of reported positions.

use std::collections::{BTreeMap, BTreeSet};

use crate::addressing::page_path;
use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::{
    ApiId, ApiMap, ApiSet, ElementKey, Facet, FacetMap, Item, Position, ResultKind, ResultTable,
    SymbolKind,
};

/// Everything reported for one position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub values: Option<ApiMap<Item>>,
    pub equal: Option<bool>,
    pub missing: BTreeSet<ApiId>,
    pub facets: Vec<FacetMap>,
}

impl Entry {
    /// Instances carrying the position
    pub fn present(&self, apis: &ApiSet) -> BTreeSet<ApiId> {
        match &self.values {
            Some(values) => values.apis(),
            None => apis.ids().filter(|id| !self.missing.contains(id)).collect(),
        }
    }

    pub fn result(&self, apis: &ApiSet) -> ResultKind {
        let equal = self.equal.unwrap_or(true) && self.facets.is_empty();
        ResultKind::classify(apis, &self.present(apis), equal)
    }

    pub fn facet(&self, facet: Facet) -> Option<&FacetMap> {
        self.facets.iter().find(|map| map.facet() == facet)
    }

    /// Display text of every present value
    pub fn texts(&self) -> ApiMap<String> {
        self.values
            .as_ref()
            .map(|values| values.map(|item| item.display_text().to_string()))
            .unwrap_or_default()
    }

    /// Declaration kind, taken from the newest instance that has one
    pub fn symbol_kind(&self) -> Option<SymbolKind> {
        self.values
            .as_ref()?
            .iter()
            .rev()
            .find_map(|(_, item)| item.as_symbol().map(|symbol| symbol.kind))
    }
}

/// What a parent page shows about a completed child page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildLink {
    pub key: ElementKey,
    pub result: ResultKind,
    pub kind: Option<SymbolKind>,
    pub path: String,
}

/// One output page being assembled
///
/// The root page has no key.
#[derive(Debug, Clone)]
pub struct Page {
    pub key: Option<ElementKey>,
    pub entries: BTreeMap<Position, Entry>,
    pub children: BTreeMap<ElementKey, ChildLink>,
    pub results: ResultTable,
}

impl Page {
    pub fn new(key: Option<ElementKey>) -> Self {
        Self {
            key,
            entries: BTreeMap::new(),
            children: BTreeMap::new(),
            results: ResultTable::new(),
        }
    }

    pub fn path(&self) -> String {
        page_path(self.key.as_ref())
    }

    /// Whether `position` is the position of this page's own key
    pub fn is_own(&self, position: &Position) -> bool {
        position.is_element() && self.key.as_ref() == Some(position.element_key())
    }

    pub fn own_entry(&self) -> Option<&Entry> {
        let key = self.key.as_ref()?;
        self.entries.get(&Position::of(key.clone()))
    }

    pub fn entry_mut(&mut self, position: &Position) -> &mut Entry {
        self.entries.entry(position.clone()).or_default()
    }

    /// # Errors
    ///
    /// Returns `DuplicatePosition` when values were already registered.
    pub fn insert_values(&mut self, position: &Position, values: ApiMap<Item>) -> Result<()> {
        let entry = self.entry_mut(position);
        if entry.values.is_some() {
            return Err(ExError::new(ExErrorKind::DuplicatePosition)
                .with_op("comparing")
                .with_position(position.to_string()));
        }
        entry.values = Some(values);
        Ok(())
    }

    /// Fold a finished child page into this one
    pub fn add_child(&mut self, link: ChildLink, results: &ResultTable) {
        self.results.add(&link.key, &results.totals());
        self.children.insert(link.key.clone(), link);
    }

    /// How this page appears in its parent
    pub fn child_link(&self, apis: &ApiSet) -> Option<ChildLink> {
        let key = self.key.clone()?;
        let entry = self.own_entry().cloned().unwrap_or_default();
        Some(ChildLink {
            result: entry.result(apis),
            kind: entry.symbol_kind(),
            path: self.path(),
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Api;

    fn apis() -> ApiSet {
        ApiSet::new(vec![Api::new("v1", ""), Api::new("v2", "")]).unwrap()
    }

    fn object() -> ElementKey {
        ElementKey::type_in(ElementKey::package(None, "java.lang"), "Object")
    }

    #[test]
    fn test_duplicate_values_rejected() {
        let mut page = Page::new(Some(object()));
        let position = Position::of(object());
        page.insert_values(&position, ApiMap::new()).unwrap();
        let err = page.insert_values(&position, ApiMap::new()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::DuplicatePosition);
    }

    #[test]
    fn test_entry_result_from_missing() {
        let apis = apis();
        let entry = Entry {
            missing: [ApiId(0)].into_iter().collect(),
            equal: Some(true),
            ..Entry::default()
        };
        assert_eq!(entry.result(&apis), ResultKind::Added);
    }
}
