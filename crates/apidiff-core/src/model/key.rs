//! Instance-independent identity of API elements.
//!
//! An [`ElementKey`] names a symbol without reference to any particular API
//! instance, so the same key can be looked up in every compared instance.
//! Keys own their enclosing key, which makes equality, hashing and ordering
//! purely structural.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of an [`ElementKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyKind {
    Module,
    Package,
    Type,
    Executable,
    Variable,
    TypeParameter,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Module => "module",
            KeyKind::Package => "package",
            KeyKind::Type => "type",
            KeyKind::Executable => "executable",
            KeyKind::Variable => "variable",
            KeyKind::TypeParameter => "type-parameter",
        }
    }
}

/// Structural identifier for a symbol
///
/// Ordering is by variant first, then by the enclosing key and name, which
/// gives a deterministic order for summary tables and member listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKey {
    Module {
        name: String,
    },
    Package {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        module: Option<Box<ElementKey>>,
        name: String,
    },
    /// A class, interface, enum, record or annotation type; `enclosing` is
    /// a package or, for nested types, another type
    Type {
        enclosing: Box<ElementKey>,
        name: String,
    },
    /// A method or constructor, identified by its parameter types
    Executable {
        enclosing: Box<ElementKey>,
        name: String,
        #[serde(default)]
        params: Vec<String>,
    },
    /// A field, enum constant or record component
    Variable {
        enclosing: Box<ElementKey>,
        name: String,
    },
    TypeParameter {
        enclosing: Box<ElementKey>,
        name: String,
    },
}

impl ElementKey {
    pub fn module(name: impl Into<String>) -> Self {
        ElementKey::Module { name: name.into() }
    }

    pub fn package(module: Option<ElementKey>, name: impl Into<String>) -> Self {
        ElementKey::Package {
            module: module.map(Box::new),
            name: name.into(),
        }
    }

    pub fn type_in(enclosing: ElementKey, name: impl Into<String>) -> Self {
        ElementKey::Type {
            enclosing: Box::new(enclosing),
            name: name.into(),
        }
    }

    pub fn executable<S: Into<String>>(
        enclosing: ElementKey,
        name: impl Into<String>,
        params: impl IntoIterator<Item = S>,
    ) -> Self {
        ElementKey::Executable {
            enclosing: Box::new(enclosing),
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn variable(enclosing: ElementKey, name: impl Into<String>) -> Self {
        ElementKey::Variable {
            enclosing: Box::new(enclosing),
            name: name.into(),
        }
    }

    pub fn type_parameter(enclosing: ElementKey, name: impl Into<String>) -> Self {
        ElementKey::TypeParameter {
            enclosing: Box::new(enclosing),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            ElementKey::Module { .. } => KeyKind::Module,
            ElementKey::Package { .. } => KeyKind::Package,
            ElementKey::Type { .. } => KeyKind::Type,
            ElementKey::Executable { .. } => KeyKind::Executable,
            ElementKey::Variable { .. } => KeyKind::Variable,
            ElementKey::TypeParameter { .. } => KeyKind::TypeParameter,
        }
    }

    /// The key this one is declared in; `None` for modules and for packages
    /// outside any module
    pub fn enclosing(&self) -> Option<&ElementKey> {
        match self {
            ElementKey::Module { .. } => None,
            ElementKey::Package { module, .. } => module.as_deref(),
            ElementKey::Type { enclosing, .. }
            | ElementKey::Executable { enclosing, .. }
            | ElementKey::Variable { enclosing, .. }
            | ElementKey::TypeParameter { enclosing, .. } => Some(enclosing),
        }
    }

    /// The unqualified name
    pub fn simple_name(&self) -> &str {
        match self {
            ElementKey::Module { name }
            | ElementKey::Package { name, .. }
            | ElementKey::Type { name, .. }
            | ElementKey::Executable { name, .. }
            | ElementKey::Variable { name, .. }
            | ElementKey::TypeParameter { name, .. } => name,
        }
    }

    /// Fully qualified, human-readable name used for headings and notes
    ///
    /// `java.base`, `java.util`, `java.util.Map.Entry`,
    /// `java.util.List#add(int,E)`, `java.lang.Integer#MAX_VALUE`,
    /// `java.util.List<E>`.
    pub fn signature_name(&self) -> String {
        match self {
            ElementKey::Module { name } => name.clone(),
            ElementKey::Package { name, .. } => {
                if name.is_empty() {
                    "<unnamed>".to_string()
                } else {
                    name.clone()
                }
            }
            ElementKey::Type { enclosing, name } => match enclosing.as_ref() {
                ElementKey::Package { name: pkg, .. } if pkg.is_empty() => name.clone(),
                other => format!("{}.{}", other.signature_name(), name),
            },
            ElementKey::Executable {
                enclosing,
                name,
                params,
            } => format!(
                "{}#{}({})",
                enclosing.signature_name(),
                name,
                params.join(",")
            ),
            ElementKey::Variable { enclosing, name } => {
                format!("{}#{}", enclosing.signature_name(), name)
            }
            ElementKey::TypeParameter { enclosing, name } => {
                format!("{}<{}>", enclosing.signature_name(), name)
            }
        }
    }

    /// The package this key lives in, if any
    pub fn package_key(&self) -> Option<&ElementKey> {
        match self {
            ElementKey::Module { .. } => None,
            ElementKey::Package { .. } => Some(self),
            _ => self.enclosing().and_then(ElementKey::package_key),
        }
    }

    /// The module this key lives in, if any
    pub fn module_key(&self) -> Option<&ElementKey> {
        match self {
            ElementKey::Module { .. } => Some(self),
            _ => self.enclosing().and_then(ElementKey::module_key),
        }
    }

    /// Whether this key is a member of a type rendered inline on the type's page
    pub fn is_member(&self) -> bool {
        matches!(
            self.kind(),
            KeyKind::Executable | KeyKind::Variable | KeyKind::TypeParameter
        )
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ElementKey {
        let module = ElementKey::module("java.base");
        let pkg = ElementKey::package(Some(module), "java.util");
        ElementKey::type_in(pkg, "List")
    }

    #[test]
    fn test_signature_names() {
        let list = list();
        assert_eq!(list.signature_name(), "java.util.List");
        let add = ElementKey::executable(list.clone(), "add", ["int", "E"]);
        assert_eq!(add.signature_name(), "java.util.List#add(int,E)");
        let entry = ElementKey::type_in(list.clone(), "Entry");
        assert_eq!(entry.signature_name(), "java.util.List.Entry");
        let e = ElementKey::type_parameter(list, "E");
        assert_eq!(e.signature_name(), "java.util.List<E>");
    }

    #[test]
    fn test_structural_equality() {
        let a = ElementKey::executable(list(), "add", ["int", "E"]);
        let b = ElementKey::executable(list(), "add", ["int", "E"]);
        let c = ElementKey::executable(list(), "add", ["E"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_package_and_module_lookup() {
        let field = ElementKey::variable(list(), "size");
        assert_eq!(field.package_key().map(|k| k.simple_name()), Some("java.util"));
        assert_eq!(field.module_key().map(|k| k.simple_name()), Some("java.base"));
    }

    #[test]
    fn test_unnamed_package_type() {
        let pkg = ElementKey::package(None, "");
        let t = ElementKey::type_in(pkg, "Main");
        assert_eq!(t.signature_name(), "Main");
    }

    #[test]
    fn test_serde_shape() {
        let key = ElementKey::module("java.base");
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "module", "name": "java.base"}));
        let back: ElementKey = serde_json::from_value(json).unwrap();
        assert_eq!(back, key);
    }
}
