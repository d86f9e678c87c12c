//! Report options.
//!
//! Loaded from TOML (every field optional) and then overridden by CLI flags.

use serde::{Deserialize, Serialize};

use crate::errors::{ExError, ExErrorKind, Result};

pub const DEFAULT_CONTEXT_LINES: usize = 5;

/// How generated API descriptions are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionMode {
    /// Structural comparison of the HTML markup
    #[default]
    Markup,
    /// Line and token comparison of the raw text
    Text,
}

/// An externally documented note attached to matching elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Element signature name the note applies to, e.g. `java.util.List#add(int,E)`
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub title: String,
    pub description: String,
    pub compare_doc_comments: bool,
    pub compare_api_descriptions: bool,
    pub description_mode: DescriptionMode,
    pub context_lines: usize,
    pub line_numbers: bool,
    pub notes: Vec<Note>,
    /// Show the generation time on the index page
    pub timestamp: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "API Comparison".to_string(),
            description: String::new(),
            compare_doc_comments: true,
            compare_api_descriptions: true,
            description_mode: DescriptionMode::Markup,
            context_lines: DEFAULT_CONTEXT_LINES,
            line_numbers: false,
            notes: Vec::new(),
            timestamp: true,
        }
    }
}

impl ReportOptions {
    /// Parse options from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` for malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: ReportOptions = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    ///
    /// Returns `Config` when a note has an empty name or URI.
    pub fn validate(&self) -> Result<()> {
        if let Some(note) = self
            .notes
            .iter()
            .find(|n| n.name.is_empty() || n.uri.is_empty())
        {
            return Err(ExError::new(ExErrorKind::Config)
                .with_op("validate_options")
                .with_message(format!(
                    "note `{}` needs both a name and a uri",
                    note.name
                )));
        }
        Ok(())
    }

    pub fn notes_for<'a>(&'a self, signature_name: &'a str) -> impl Iterator<Item = &'a Note> + 'a {
        self.notes.iter().filter(move |n| n.name == signature_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReportOptions::from_toml_str("").unwrap();
        assert_eq!(options.context_lines, 5);
        assert!(options.compare_doc_comments);
        assert!(!options.line_numbers);
        assert_eq!(options.description_mode, DescriptionMode::Markup);
    }

    #[test]
    fn test_parse_full() {
        let text = r#"
            title = "JDK 21 vs 22"
            context_lines = 2
            description_mode = "text"
            line_numbers = true

            [[notes]]
            name = "java.lang.Thread#stop()"
            uri = "https://example.com/jep-471"
            description = "Thread.stop removal"
        "#;
        let options = ReportOptions::from_toml_str(text).unwrap();
        assert_eq!(options.title, "JDK 21 vs 22");
        assert_eq!(options.context_lines, 2);
        assert_eq!(options.description_mode, DescriptionMode::Text);
        assert_eq!(options.notes_for("java.lang.Thread#stop()").count(), 1);
    }

    #[test]
    fn test_invalid_note() {
        let text = r#"
            [[notes]]
            name = "x"
            uri = ""
        "#;
        let err = ReportOptions::from_toml_str(text).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Config);
    }

    #[test]
    fn test_malformed_toml() {
        let err = ReportOptions::from_toml_str("context_lines = \"many\"").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Config);
    }
}
