use apidiff_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every fatal condition of a report run maps to one of these kinds, and each
/// kind maps to a stable error code that tests and the CLI can rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    UnknownApi,
    Config,

    // Addressing / routing
    UnroutablePosition,
    BrokenKeyChain,

    // Protocol
    DuplicatePosition,
    PageAlreadyRendered,
    RunAlreadyFinished,

    // Rendering (recoverable, reported through the degraded channel)
    MarkupClean,
    MarkupDiff,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownApi => "ERR_UNKNOWN_API",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::UnroutablePosition => "ERR_UNROUTABLE_POSITION",
            ExErrorKind::BrokenKeyChain => "ERR_BROKEN_KEY_CHAIN",
            ExErrorKind::DuplicatePosition => "ERR_DUPLICATE_POSITION",
            ExErrorKind::PageAlreadyRendered => "ERR_PAGE_ALREADY_RENDERED",
            ExErrorKind::RunAlreadyFinished => "ERR_RUN_ALREADY_FINISHED",
            ExErrorKind::MarkupClean => "ERR_MARKUP_CLEAN",
            ExErrorKind::MarkupDiff => "ERR_MARKUP_DIFF",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind must stop the whole run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExErrorKind::MarkupClean | ExErrorKind::MarkupDiff)
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context a reader needs to find the
/// first fatal cause: the operation, the element key or position involved,
/// and the output path for I/O failures.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    position: Option<String>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            position: None,
            path: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add element key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add position context
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Add output path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add run id context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(position) = &self.position {
            write!(f, " (position: {})", position)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

impl From<toml::de::Error> for ExError {
    fn from(err: toml::de::Error) -> Self {
        ExError::new(ExErrorKind::Config).with_message(err.to_string())
    }
}

// ========== End Error Facility ==========

/// Failures local to the markup (tree) diff of a single item
///
/// These never abort a run: the renderer substitutes an empty rendering for
/// the item and reports the failure through the degraded log channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Element nesting exceeds the supported depth
    #[error("Markup nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    /// The tokenizer could not make progress on the input
    #[error("Markup tokenizer failed: {message}")]
    Tokenizer { message: String },

    /// The annotated stream could not be rebuilt into a tree
    #[error("Cannot rebuild diff tree: {message}")]
    Rebuild { message: String },

    /// Rebuilt element has a tag outside the supported set
    #[error("Unknown tag <{tag}> replaced by a generic span")]
    UnknownTag { tag: String },

    /// Rebuilt element carries an attribute outside the supported set
    #[error("Unknown attribute `{name}` on <{tag}> dropped")]
    UnknownAttribute { tag: String, name: String },
}

impl From<MarkupError> for ExError {
    fn from(err: MarkupError) -> Self {
        match err {
            MarkupError::TooDeep { .. } | MarkupError::Tokenizer { .. } => {
                ExError::new(ExErrorKind::MarkupClean)
                    .with_op("clean_markup")
                    .with_message(err.to_string())
            }
            MarkupError::Rebuild { .. }
            | MarkupError::UnknownTag { .. }
            | MarkupError::UnknownAttribute { .. } => ExError::new(ExErrorKind::MarkupDiff)
                .with_op("rebuild_diff_tree")
                .with_message(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExErrorKind::UnroutablePosition.code(), "ERR_UNROUTABLE_POSITION");
        assert_eq!(ExErrorKind::Io.code(), "ERR_IO");
        assert_eq!(ExErrorKind::DuplicatePosition.code(), "ERR_DUPLICATE_POSITION");
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::Io)
            .with_op("write_page")
            .with_path("java.base/java/lang/Object.html")
            .with_message("disk full");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_IO]"));
        assert!(text.contains("write_page"));
        assert!(text.contains("disk full"));
        assert!(text.contains("java/lang/Object.html"));
    }

    #[test]
    fn test_markup_errors_are_not_fatal() {
        let err: ExError = MarkupError::TooDeep { limit: 4 }.into();
        assert_eq!(err.kind(), ExErrorKind::MarkupClean);
        assert!(!err.kind().is_fatal());
        assert!(ExErrorKind::BrokenKeyChain.is_fatal());
    }
}
