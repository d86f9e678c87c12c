//! Recorded Symbol Provider sessions.
//!
//! An [`EventLog`] is the JSON form of one comparison run: the declared API
//! instances followed by the callbacks in the order the provider issued them.
//! Per-instance values are keyed by API name and resolved against the
//! declared instances when the log is replayed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::api::{Api, ApiId, ApiSet};
use super::api_map::ApiMap;
use super::facet::FacetMap;
use super::item::{DocFile, Item};
use super::position::Position;
use crate::errors::Result;

/// Values keyed by API name
pub type NamedValues<T> = BTreeMap<String, T>;

/// Values of one `different` event, tagged by facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetValues {
    Modifiers(NamedValues<Vec<String>>),
    Kinds(NamedValues<String>),
    Types(NamedValues<String>),
    ThrownTypes(NamedValues<Vec<String>>),
    Superinterfaces(NamedValues<Vec<String>>),
    PermittedSubclasses(NamedValues<Vec<String>>),
    Annotations(NamedValues<String>),
    AnnotationValues(NamedValues<String>),
    Directives(NamedValues<String>),
    RawDocComments(NamedValues<String>),
    ApiDescriptions(NamedValues<String>),
    DocFiles(NamedValues<DocFile>),
    Values(NamedValues<String>),
}

impl FacetValues {
    /// Resolve API names into a typed facet map
    ///
    /// # Errors
    ///
    /// Returns `UnknownApi` when a value is keyed by an undeclared API.
    pub fn resolve(&self, apis: &ApiSet) -> Result<FacetMap> {
        Ok(match self {
            FacetValues::Modifiers(v) => FacetMap::Modifiers(resolve_map(apis, v)?),
            FacetValues::Kinds(v) => FacetMap::Kinds(resolve_map(apis, v)?),
            FacetValues::Types(v) => FacetMap::Types(resolve_map(apis, v)?),
            FacetValues::ThrownTypes(v) => FacetMap::ThrownTypes(resolve_map(apis, v)?),
            FacetValues::Superinterfaces(v) => FacetMap::Superinterfaces(resolve_map(apis, v)?),
            FacetValues::PermittedSubclasses(v) => {
                FacetMap::PermittedSubclasses(resolve_map(apis, v)?)
            }
            FacetValues::Annotations(v) => FacetMap::Annotations(resolve_map(apis, v)?),
            FacetValues::AnnotationValues(v) => FacetMap::AnnotationValues(resolve_map(apis, v)?),
            FacetValues::Directives(v) => FacetMap::Directives(resolve_map(apis, v)?),
            FacetValues::RawDocComments(v) => FacetMap::RawDocComments(resolve_map(apis, v)?),
            FacetValues::ApiDescriptions(v) => FacetMap::ApiDescriptions(resolve_map(apis, v)?),
            FacetValues::DocFiles(v) => FacetMap::DocFiles(resolve_map(apis, v)?),
            FacetValues::Values(v) => FacetMap::Values(resolve_map(apis, v)?),
        })
    }
}

/// One recorded callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent {
    Comparing {
        position: Position,
        values: NamedValues<Item>,
    },
    Completed {
        position: Position,
        equal: bool,
    },
    Missing {
        position: Position,
        missing: Vec<String>,
    },
    Different {
        position: Position,
        values: FacetValues,
    },
}

impl ReportEvent {
    pub fn position(&self) -> &Position {
        match self {
            ReportEvent::Comparing { position, .. }
            | ReportEvent::Completed { position, .. }
            | ReportEvent::Missing { position, .. }
            | ReportEvent::Different { position, .. } => position,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReportEvent::Comparing { .. } => "comparing",
            ReportEvent::Completed { .. } => "completed",
            ReportEvent::Missing { .. } => "missing",
            ReportEvent::Different { .. } => "different",
        }
    }
}

/// A recorded session: declared instances plus callbacks in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    pub apis: Vec<Api>,
    #[serde(default)]
    pub events: Vec<ReportEvent>,
    /// Overall result passed to `finish`; when omitted, derived from the
    /// top-level `completed` events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_equal: Option<bool>,
}

impl EventLog {
    /// Parse a log from JSON text
    ///
    /// # Errors
    ///
    /// Returns `Serialization` when the text is not a valid log.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Resolve a name-keyed map against the declared instances
///
/// # Errors
///
/// Returns `UnknownApi` for an undeclared name.
pub fn resolve_map<T: Clone>(apis: &ApiSet, values: &NamedValues<T>) -> Result<ApiMap<T>> {
    values
        .iter()
        .map(|(name, value)| apis.resolve(name).map(|id| (id, value.clone())))
        .collect()
}

/// Resolve a list of API names into a set of ids
///
/// # Errors
///
/// Returns `UnknownApi` for an undeclared name.
pub fn resolve_names(apis: &ApiSet, names: &[String]) -> Result<BTreeSet<ApiId>> {
    names.iter().map(|name| apis.resolve(name)).collect()
}
