use serde::{Deserialize, Serialize};

/// Declaration kind of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Module,
    Package,
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
    Constructor,
    Method,
    Field,
    EnumConstant,
    RecordComponent,
    Parameter,
    TypeParameter,
}

impl SymbolKind {
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Module => "module",
            SymbolKind::Package => "package",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Enum => "enum",
            SymbolKind::Record => "record",
            SymbolKind::AnnotationType => "annotation type",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Method => "method",
            SymbolKind::Field => "field",
            SymbolKind::EnumConstant => "enum constant",
            SymbolKind::RecordComponent => "record component",
            SymbolKind::Parameter => "parameter",
            SymbolKind::TypeParameter => "type parameter",
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Interface
                | SymbolKind::Enum
                | SymbolKind::Record
                | SymbolKind::AnnotationType
        )
    }
}

/// A symbol as supplied by one API instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Rendered declaration text, e.g. `public final class String`
    #[serde(default)]
    pub signature: String,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Vec::new(),
            signature: signature.into(),
        }
    }

    /// The declaration text, or the name when the provider gave none
    pub fn display_signature(&self) -> &str {
        if self.signature.is_empty() {
            &self.name
        } else {
            &self.signature
        }
    }
}

/// A documentation file shipped with a package or module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocFile {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

/// Value registered for one (position, instance) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Symbol(Symbol),
    Text(String),
    DocFile(DocFile),
}

impl Item {
    /// Text shown for this value in signature blocks and alternative views
    pub fn display_text(&self) -> &str {
        match self {
            Item::Symbol(symbol) => symbol.display_signature(),
            Item::Text(text) => text,
            Item::DocFile(file) => &file.name,
        }
    }

    /// Equality surrogate used when grouping instances
    pub fn equality_key(&self) -> String {
        match self {
            Item::Symbol(symbol) => format!(
                "{}|{}|{}",
                symbol.kind.label(),
                symbol.modifiers.join(" "),
                symbol.display_signature()
            ),
            Item::Text(text) => text.clone(),
            Item::DocFile(file) => format!("{}\n{}", file.name, file.content),
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Item::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_falls_back_to_name() {
        let item = Item::Symbol(Symbol::new(SymbolKind::Field, "size", ""));
        assert_eq!(item.display_text(), "size");
    }

    #[test]
    fn test_equality_key_includes_modifiers() {
        let mut a = Symbol::new(SymbolKind::Method, "m", "void m()");
        let b = a.clone();
        a.modifiers.push("static".to_string());
        assert_ne!(
            Item::Symbol(a).equality_key(),
            Item::Symbol(b).equality_key()
        );
    }

    #[test]
    fn test_item_json_shape() {
        let item: Item = serde_json::from_str(r#"{"text": "@Deprecated"}"#).unwrap();
        assert_eq!(item, Item::Text("@Deprecated".to_string()));
    }
}
