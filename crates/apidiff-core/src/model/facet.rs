//! Facet-specific difference reports.

use super::api::ApiId;
use super::api_map::ApiMap;
use super::item::DocFile;

/// The property of a position a `reportDifferent*` callback is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Modifiers,
    Kinds,
    Types,
    ThrownTypes,
    Superinterfaces,
    PermittedSubclasses,
    Annotations,
    AnnotationValues,
    Directives,
    RawDocComments,
    ApiDescriptions,
    DocFiles,
    Values,
}

impl Facet {
    pub fn heading(&self) -> &'static str {
        match self {
            Facet::Modifiers => "Modifiers",
            Facet::Kinds => "Kind",
            Facet::Types => "Type",
            Facet::ThrownTypes => "Thrown types",
            Facet::Superinterfaces => "Superinterfaces",
            Facet::PermittedSubclasses => "Permitted subclasses",
            Facet::Annotations => "Annotations",
            Facet::AnnotationValues => "Annotation values",
            Facet::Directives => "Directives",
            Facet::RawDocComments => "Documentation comment",
            Facet::ApiDescriptions => "API description",
            Facet::DocFiles => "Documentation files",
            Facet::Values => "Value",
        }
    }

    /// Facets rendered through the doc comment and description diffs rather
    /// than counted as element changes
    pub fn is_documentation(&self) -> bool {
        matches!(self, Facet::RawDocComments | Facet::ApiDescriptions)
    }
}

/// Per-instance values of one facet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetMap {
    Modifiers(ApiMap<Vec<String>>),
    Kinds(ApiMap<String>),
    Types(ApiMap<String>),
    ThrownTypes(ApiMap<Vec<String>>),
    Superinterfaces(ApiMap<Vec<String>>),
    PermittedSubclasses(ApiMap<Vec<String>>),
    Annotations(ApiMap<String>),
    AnnotationValues(ApiMap<String>),
    Directives(ApiMap<String>),
    RawDocComments(ApiMap<String>),
    ApiDescriptions(ApiMap<String>),
    DocFiles(ApiMap<DocFile>),
    Values(ApiMap<String>),
}

impl FacetMap {
    pub fn facet(&self) -> Facet {
        match self {
            FacetMap::Modifiers(_) => Facet::Modifiers,
            FacetMap::Kinds(_) => Facet::Kinds,
            FacetMap::Types(_) => Facet::Types,
            FacetMap::ThrownTypes(_) => Facet::ThrownTypes,
            FacetMap::Superinterfaces(_) => Facet::Superinterfaces,
            FacetMap::PermittedSubclasses(_) => Facet::PermittedSubclasses,
            FacetMap::Annotations(_) => Facet::Annotations,
            FacetMap::AnnotationValues(_) => Facet::AnnotationValues,
            FacetMap::Directives(_) => Facet::Directives,
            FacetMap::RawDocComments(_) => Facet::RawDocComments,
            FacetMap::ApiDescriptions(_) => Facet::ApiDescriptions,
            FacetMap::DocFiles(_) => Facet::DocFiles,
            FacetMap::Values(_) => Facet::Values,
        }
    }

    /// Every value rendered as display text
    pub fn texts(&self) -> ApiMap<String> {
        match self {
            FacetMap::Modifiers(map)
            | FacetMap::ThrownTypes(map)
            | FacetMap::Superinterfaces(map)
            | FacetMap::PermittedSubclasses(map) => map.map(|values| values.join(" ")),
            FacetMap::Kinds(map)
            | FacetMap::Types(map)
            | FacetMap::Annotations(map)
            | FacetMap::AnnotationValues(map)
            | FacetMap::Directives(map)
            | FacetMap::RawDocComments(map)
            | FacetMap::ApiDescriptions(map)
            | FacetMap::Values(map) => map.clone(),
            FacetMap::DocFiles(map) => map.map(|file| file.content.clone()),
        }
    }

    /// Whether both instances carry the facet and their values differ
    pub fn differs(&self, a: ApiId, b: ApiId) -> bool {
        fn check<T: PartialEq>(map: &ApiMap<T>, a: ApiId, b: ApiId) -> bool {
            matches!((map.get(a), map.get(b)), (Some(x), Some(y)) if x != y)
        }
        match self {
            FacetMap::Modifiers(map)
            | FacetMap::ThrownTypes(map)
            | FacetMap::Superinterfaces(map)
            | FacetMap::PermittedSubclasses(map) => check(map, a, b),
            FacetMap::Kinds(map)
            | FacetMap::Types(map)
            | FacetMap::Annotations(map)
            | FacetMap::AnnotationValues(map)
            | FacetMap::Directives(map)
            | FacetMap::RawDocComments(map)
            | FacetMap::ApiDescriptions(map)
            | FacetMap::Values(map) => check(map, a, b),
            FacetMap::DocFiles(map) => check(map, a, b),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.texts().is_empty()
    }
}
