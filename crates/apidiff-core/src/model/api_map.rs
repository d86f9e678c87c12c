use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use super::api::{ApiId, ApiSet};

/// Per-instance values for one position
///
/// Absence of an instance means the position does not exist in that
/// instance. Iteration follows instance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMap<T> {
    entries: BTreeMap<ApiId, T>,
}

impl<T> Default for ApiMap<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> ApiMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, api: ApiId, value: T) -> Option<T> {
        self.entries.insert(api, value)
    }

    pub fn get(&self, api: ApiId) -> Option<&T> {
        self.entries.get(&api)
    }

    pub fn contains(&self, api: ApiId) -> bool {
        self.entries.contains_key(&api)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ApiId, T> {
        self.entries.iter()
    }

    pub fn apis(&self) -> BTreeSet<ApiId> {
        self.entries.keys().copied().collect()
    }

    /// Whether every instance in `apis` has a value
    pub fn is_complete(&self, apis: &ApiSet) -> bool {
        self.entries.len() == apis.len()
    }

    /// Instances of `apis` without a value here
    pub fn missing(&self, apis: &ApiSet) -> BTreeSet<ApiId> {
        apis.ids().filter(|id| !self.contains(*id)).collect()
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> ApiMap<U> {
        ApiMap {
            entries: self.entries.iter().map(|(k, v)| (*k, f(v))).collect(),
        }
    }
}

impl<T> FromIterator<(ApiId, T)> for ApiMap<T> {
    fn from_iter<I: IntoIterator<Item = (ApiId, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ApiMap<T> {
    type Item = (&'a ApiId, &'a T);
    type IntoIter = btree_map::Iter<'a, ApiId, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
