//! Error types for Docsage.

use crate::action::ActionKind;
use serde::Serialize;
use thiserror::Error;

/// A shared error type for the Docsage session core.
///
/// Usage errors (`NotFound`, `NoDocument`, `Busy`, `InvalidInput`) are returned
/// to callers as `Err`. `CollaboratorFailure` is never returned as `Err` by the
/// session operations; it travels inside an `ActionOutcome::Failed` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DocsageError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An action was requested without an active document
    #[error("No document is selected")]
    NoDocument,

    /// An action was requested while another one is in flight
    #[error("Another action is already running: {running}")]
    Busy { running: ActionKind },

    /// Caller supplied input that cannot be acted on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An external AI collaborator failed
    #[error("{kind} collaborator failed: {message}")]
    CollaboratorFailure { kind: ActionKind, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },
}

impl DocsageError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a CollaboratorFailure error
    pub fn collaborator(kind: ActionKind, message: impl Into<String>) -> Self {
        Self::CollaboratorFailure {
            kind,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Check if this is a NoDocument error
    pub fn is_no_document(&self) -> bool {
        matches!(self, Self::NoDocument)
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a collaborator failure
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::CollaboratorFailure { .. })
    }

    /// Returns true for errors that a correct presentation layer should have
    /// prevented (disabled controls, validated input).
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NoDocument | Self::Busy { .. } | Self::InvalidInput(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DocsageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DocsageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DocsageError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DocsageError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DocsageError>`.
pub type Result<T> = std::result::Result<T, DocsageError>;
