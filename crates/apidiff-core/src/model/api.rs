use serde::{Deserialize, Serialize};

use crate::errors::{ExError, ExErrorKind, Result};

/// One compared API instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Api {
    /// Short unique name, used as the key in recorded event logs
    pub name: String,

    /// Human-readable label shown in page headers and column captions
    #[serde(default)]
    pub label: String,
}

impl Api {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }

    /// The label, or the name when no label was given
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// Index of an API instance within its [`ApiSet`]
///
/// Ordering follows instance order, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiId(pub usize);

/// The ordered list of compared API instances, oldest to newest
///
/// The last instance is the focus; the one before it is the reference used
/// for two-way add/remove attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSet {
    apis: Vec<Api>,
}

impl ApiSet {
    /// Build an API set
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when fewer than two instances are given or two
    /// instances share a name.
    pub fn new(apis: Vec<Api>) -> Result<Self> {
        if apis.len() < 2 {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("api_set")
                .with_message(format!(
                    "at least two API instances are required, got {}",
                    apis.len()
                )));
        }
        for (i, api) in apis.iter().enumerate() {
            if apis[..i].iter().any(|other| other.name == api.name) {
                return Err(ExError::new(ExErrorKind::InvalidInput)
                    .with_op("api_set")
                    .with_message(format!("duplicate API name `{}`", api.name)));
            }
        }
        Ok(Self { apis })
    }

    pub fn len(&self) -> usize {
        self.apis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }

    pub fn get(&self, id: ApiId) -> &Api {
        &self.apis[id.0]
    }

    /// All ids in instance order
    pub fn ids(&self) -> impl Iterator<Item = ApiId> + '_ {
        (0..self.apis.len()).map(ApiId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ApiId, &Api)> + '_ {
        self.apis.iter().enumerate().map(|(i, api)| (ApiId(i), api))
    }

    /// The newest instance
    pub fn focus(&self) -> ApiId {
        ApiId(self.apis.len() - 1)
    }

    /// The second-newest instance
    pub fn reference(&self) -> ApiId {
        ApiId(self.apis.len() - 2)
    }

    /// Resolve an API by name
    ///
    /// # Errors
    ///
    /// Returns `UnknownApi` when no instance has that name.
    pub fn resolve(&self, name: &str) -> Result<ApiId> {
        self.apis
            .iter()
            .position(|api| api.name == name)
            .map(ApiId)
            .ok_or_else(|| {
                ExError::new(ExErrorKind::UnknownApi)
                    .with_op("resolve_api")
                    .with_message(format!("unknown API `{}`", name))
            })
    }

    /// Comma-separated display names of the given instances
    pub fn names_of<'a>(&self, ids: impl IntoIterator<Item = &'a ApiId>) -> String {
        ids.into_iter()
            .map(|id| self.get(*id).display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> ApiSet {
        ApiSet::new(vec![
            Api::new("v1", "API v1"),
            Api::new("v2", ""),
            Api::new("v3", "API v3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_focus_and_reference() {
        let apis = three();
        assert_eq!(apis.focus(), ApiId(2));
        assert_eq!(apis.reference(), ApiId(1));
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let apis = three();
        assert_eq!(apis.get(ApiId(1)).display_name(), "v2");
        assert_eq!(apis.names_of(&[ApiId(0), ApiId(2)]), "API v1, API v3");
    }

    #[test]
    fn test_rejects_single_api() {
        let err = ApiSet::new(vec![Api::new("v1", "")]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = ApiSet::new(vec![Api::new("v1", ""), Api::new("v1", "")]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_resolve_unknown() {
        let err = three().resolve("v9").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnknownApi);
    }
}
