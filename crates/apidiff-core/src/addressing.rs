//! Mapping from element keys to output pages, anchors and links.
//!
//! Modules, packages and types each get a page. Executables and variables are
//! rendered on their enclosing type's page under an anchor; type parameters
//! have no page and no anchor and are only rendered inline.

use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::key::{ElementKey, KeyKind};

/// Path of the top-level index page
pub const INDEX_PATH: &str = "index.html";

/// Path of the run-wide notes index
pub const NOTES_PATH: &str = "notes.html";

/// Path of the built-in stylesheet
pub const STYLESHEET_PATH: &str = "resources/apidiff.css";

/// Check that every enclosing link of `key` is well formed
///
/// # Errors
///
/// Returns `BrokenKeyChain` when a key is enclosed by a key of the wrong
/// kind, e.g. a method directly inside a package.
pub fn validate_chain(key: &ElementKey) -> Result<()> {
    let mut current = key;
    while let Some(enclosing) = current.enclosing() {
        let allowed = match current.kind() {
            KeyKind::Module => false,
            KeyKind::Package => enclosing.kind() == KeyKind::Module,
            KeyKind::Type => matches!(enclosing.kind(), KeyKind::Package | KeyKind::Type),
            KeyKind::Executable | KeyKind::Variable => enclosing.kind() == KeyKind::Type,
            KeyKind::TypeParameter => {
                matches!(enclosing.kind(), KeyKind::Type | KeyKind::Executable)
            }
        };
        if !allowed {
            return Err(ExError::new(ExErrorKind::BrokenKeyChain)
                .with_op("validate_chain")
                .with_key(key.signature_name())
                .with_message(format!(
                    "{} `{}` cannot be enclosed by {} `{}`",
                    current.kind().as_str(),
                    current.simple_name(),
                    enclosing.kind().as_str(),
                    enclosing.simple_name()
                )));
        }
        current = enclosing;
    }
    if matches!(current.kind(), KeyKind::Module | KeyKind::Package) {
        Ok(())
    } else {
        Err(ExError::new(ExErrorKind::BrokenKeyChain)
            .with_op("validate_chain")
            .with_key(key.signature_name())
            .with_message(format!(
                "chain ends at {} `{}` instead of a module or package",
                current.kind().as_str(),
                current.simple_name()
            )))
    }
}

/// The key of the page that renders `key`
///
/// # Errors
///
/// Returns `BrokenKeyChain` if the key's chain is malformed.
pub fn page_key_for(key: &ElementKey) -> Result<ElementKey> {
    validate_chain(key)?;
    let mut current = key;
    while current.is_member() {
        // a valid chain always reaches a type before running out
        current = current.enclosing().ok_or_else(|| {
            ExError::new(ExErrorKind::UnroutablePosition)
                .with_op("page_key_for")
                .with_key(key.signature_name())
        })?;
    }
    Ok(current.clone())
}

/// The key of the page a completed page reports to, or `None` for the root
///
/// Modules and packages outside a module report to the root index; packages
/// report to their module; types report to their package or, when nested,
/// to their enclosing type.
///
/// # Errors
///
/// Returns `UnroutablePosition` when `page_key` does not own a page.
pub fn parent_page_key(page_key: &ElementKey) -> Result<Option<ElementKey>> {
    match page_key.kind() {
        KeyKind::Module | KeyKind::Package | KeyKind::Type => {
            Ok(page_key.enclosing().cloned())
        }
        KeyKind::Executable | KeyKind::Variable | KeyKind::TypeParameter => {
            Err(ExError::new(ExErrorKind::UnroutablePosition)
                .with_op("parent_page_key")
                .with_key(page_key.signature_name())
                .with_message("members do not own a page"))
        }
    }
}

/// Stable relative output path of the page showing `key`
///
/// Type parameters have no page and yield `None`.
pub fn path_for(key: &ElementKey) -> Option<String> {
    match key {
        ElementKey::Module { name } => Some(format!("{}/module-summary.html", name)),
        ElementKey::Package { .. } => Some(format!("{}package-summary.html", package_dir(key))),
        ElementKey::Type { .. } => {
            let mut names = Vec::new();
            let mut current = key;
            while let ElementKey::Type { enclosing, name } = current {
                names.push(name.as_str());
                current = enclosing;
            }
            names.reverse();
            Some(format!("{}{}.html", package_dir(current), names.join(".")))
        }
        ElementKey::Executable { enclosing, .. } | ElementKey::Variable { enclosing, .. } => {
            path_for(enclosing)
        }
        ElementKey::TypeParameter { .. } => None,
    }
}

/// Directory prefix (with trailing `/`, or empty) of a package's pages
fn package_dir(key: &ElementKey) -> String {
    let mut dir = String::new();
    if let Some(ElementKey::Module { name }) = key.module_key() {
        dir.push_str(name);
        dir.push('/');
    }
    if let ElementKey::Package { name, .. } = key {
        for segment in name.split('.').filter(|s| !s.is_empty()) {
            dir.push_str(segment);
            dir.push('/');
        }
    }
    dir
}

/// In-page fragment id for members; `None` means the page root
pub fn anchor_for(key: &ElementKey) -> Option<String> {
    match key {
        ElementKey::Executable { name, params, .. } => {
            Some(format!("{}({})", name, params.join(",")))
        }
        ElementKey::Variable { name, .. } => Some(name.clone()),
        _ => None,
    }
}

/// Link from the page at `from` to the page at `to`, optionally to an anchor
pub fn relative_href(from: &str, to: &str, anchor: Option<&str>) -> String {
    let mut href = if from == to && anchor.is_some() {
        String::new()
    } else {
        let from_dirs: Vec<&str> = from.split('/').collect();
        let from_dirs = &from_dirs[..from_dirs.len().saturating_sub(1)];
        let to_parts: Vec<&str> = to.split('/').collect();
        let to_dirs = &to_parts[..to_parts.len().saturating_sub(1)];

        let common = from_dirs
            .iter()
            .zip(to_dirs.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut href = "../".repeat(from_dirs.len() - common);
        href.push_str(&to_parts[common..].join("/"));
        href
    };
    if let Some(anchor) = anchor {
        href.push('#');
        href.push_str(anchor);
    }
    href
}

/// Path of the page for an optional page key; `None` is the root index
pub fn page_path(page_key: Option<&ElementKey>) -> String {
    page_key
        .and_then(path_for)
        .unwrap_or_else(|| INDEX_PATH.to_string())
}
