//! Positions: an element key optionally extended by a chain of sub-facets.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::key::ElementKey;

/// Kind of a relative sub-position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeKind {
    Annotation,
    AnnotationValue,
    Parameter,
    TypeParameter,
    RecordComponent,
    ThrownType,
    Superinterface,
    PermittedSubclass,
    SerializedField,
    SerializationMethod,
    DocFile,
    ModuleDirective,
    SerializedForm,
    SerialVersionUid,
}

impl RelativeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeKind::Annotation => "annotation",
            RelativeKind::AnnotationValue => "annotation_value",
            RelativeKind::Parameter => "parameter",
            RelativeKind::TypeParameter => "type_parameter",
            RelativeKind::RecordComponent => "record_component",
            RelativeKind::ThrownType => "thrown_type",
            RelativeKind::Superinterface => "superinterface",
            RelativeKind::PermittedSubclass => "permitted_subclass",
            RelativeKind::SerializedField => "serialized_field",
            RelativeKind::SerializationMethod => "serialization_method",
            RelativeKind::DocFile => "doc_file",
            RelativeKind::ModuleDirective => "module_directive",
            RelativeKind::SerializedForm => "serialized_form",
            RelativeKind::SerialVersionUid => "serial_version_uid",
        }
    }

    /// Section heading used when rendering positions of this kind
    pub fn heading(&self) -> &'static str {
        match self {
            RelativeKind::Annotation => "Annotations",
            RelativeKind::AnnotationValue => "Annotation values",
            RelativeKind::Parameter => "Parameters",
            RelativeKind::TypeParameter => "Type parameters",
            RelativeKind::RecordComponent => "Record components",
            RelativeKind::ThrownType => "Thrown types",
            RelativeKind::Superinterface => "Superinterfaces",
            RelativeKind::PermittedSubclass => "Permitted subclasses",
            RelativeKind::SerializedField => "Serialized fields",
            RelativeKind::SerializationMethod => "Serialization methods",
            RelativeKind::DocFile => "Documentation files",
            RelativeKind::ModuleDirective => "Directives",
            RelativeKind::SerializedForm => "Serialized form",
            RelativeKind::SerialVersionUid => "serialVersionUID",
        }
    }
}

/// Disambiguator of a relative position among its siblings
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeIndex {
    Int(u32),
    Name(String),
    Key(ElementKey),
}

impl fmt::Display for RelativeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeIndex::Int(i) => write!(f, "{}", i),
            RelativeIndex::Name(name) => write!(f, "{}", name),
            RelativeIndex::Key(key) => write!(f, "{}", key),
        }
    }
}

/// Location of one comparable facet of a symbol
///
/// The chain of relative positions always ends at exactly one element key,
/// so [`Position::element_key`] is total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Element(ElementKey),
    Relative {
        parent: Box<Position>,
        kind: RelativeKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<RelativeIndex>,
    },
}

impl Position {
    pub fn of(key: ElementKey) -> Self {
        Position::Element(key)
    }

    /// Extend this position by one relative step
    pub fn relative(self, kind: RelativeKind, index: Option<RelativeIndex>) -> Self {
        Position::Relative {
            parent: Box::new(self),
            kind,
            index,
        }
    }

    pub fn annotation(self, annotation_type: ElementKey) -> Self {
        self.relative(RelativeKind::Annotation, Some(RelativeIndex::Key(annotation_type)))
    }

    pub fn parameter(self, index: u32) -> Self {
        self.relative(RelativeKind::Parameter, Some(RelativeIndex::Int(index)))
    }

    pub fn doc_file(self, name: impl Into<String>) -> Self {
        self.relative(RelativeKind::DocFile, Some(RelativeIndex::Name(name.into())))
    }

    pub fn directive(self, index: u32) -> Self {
        self.relative(RelativeKind::ModuleDirective, Some(RelativeIndex::Int(index)))
    }

    pub fn element_key(&self) -> &ElementKey {
        match self {
            Position::Element(key) => key,
            Position::Relative { parent, .. } => parent.element_key(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Position::Element(_))
    }

    /// Kind of the outermost relative step, or `None` for an element position
    pub fn relative_kind(&self) -> Option<RelativeKind> {
        match self {
            Position::Element(_) => None,
            Position::Relative { kind, .. } => Some(*kind),
        }
    }

    pub fn parent(&self) -> Option<&Position> {
        match self {
            Position::Element(_) => None,
            Position::Relative { parent, .. } => Some(parent),
        }
    }

    /// Relative steps from the element key outward
    pub fn chain(&self) -> Vec<(RelativeKind, Option<&RelativeIndex>)> {
        let mut steps = Vec::new();
        let mut current = self;
        while let Position::Relative {
            parent,
            kind,
            index,
        } = current
        {
            steps.push((*kind, index.as_ref()));
            current = parent;
        }
        steps.reverse();
        steps
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.element_key()
            .cmp(other.element_key())
            .then_with(|| self.chain().cmp(&other.chain()))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Element(key) => write!(f, "{}", key),
            Position::Relative {
                parent,
                kind,
                index,
            } => {
                write!(f, "{}/{}", parent, kind.as_str())?;
                if let Some(index) = index {
                    write!(f, "[{}]", index)?;
                }
                Ok(())
            }
        }
    }
}

impl From<ElementKey> for Position {
    fn from(key: ElementKey) -> Self {
        Position::Element(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method() -> ElementKey {
        let pkg = ElementKey::package(None, "p");
        let t = ElementKey::type_in(pkg, "C");
        ElementKey::executable(t, "m", Vec::<String>::new())
    }

    #[test]
    fn test_element_key_is_total() {
        let deprecated = ElementKey::type_in(ElementKey::package(None, "java.lang"), "Deprecated");
        let pos = Position::of(method()).parameter(0).annotation(deprecated);
        assert_eq!(pos.element_key(), &method());
        assert!(!pos.is_element());
        assert_eq!(pos.relative_kind(), Some(RelativeKind::Annotation));
    }

    #[test]
    fn test_element_position_sorts_before_its_relatives() {
        let element = Position::of(method());
        let param = Position::of(method()).parameter(0);
        let param1 = Position::of(method()).parameter(1);
        assert!(element < param);
        assert!(param < param1);
    }

    #[test]
    fn test_ordering_is_by_key_first() {
        let pkg = ElementKey::package(None, "p");
        let t = ElementKey::type_in(pkg, "C");
        let a = Position::of(ElementKey::variable(t.clone(), "a")).directive(9);
        let b = Position::of(ElementKey::variable(t, "b"));
        assert!(a < b);
    }

    #[test]
    fn test_display() {
        let pos = Position::of(method()).parameter(2);
        assert_eq!(pos.to_string(), "p.C#m()/parameter[2]");
    }
}
