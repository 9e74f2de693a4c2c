//! Error types for the dropmenu component.
//!
//! Invalid attribute assignments are the only user-facing failure; everything
//! else is configuration loading or misuse of a destroyed menu.

use thiserror::Error;

use crate::models::ItemId;

/// Main error type for the dropmenu crates.
#[derive(Debug, Error)]
pub enum MenuError {
    /// An `items` assignment was rejected by validation.
    #[error("Invalid items: {message}")]
    InvalidItems {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the caller.
        hint: Option<String>,
    },

    /// No item with the given ID is owned by the menu.
    #[error("Unknown menu item: {id}")]
    UnknownItem {
        /// ID that failed to resolve.
        id: ItemId,
    },

    /// The menu was already destroyed.
    #[error("Menu has been destroyed")]
    Destroyed,

    /// Configuration error.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the caller.
        hint: Option<String>,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unexpected internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
    },

    /// File system error while reading configuration or writing logs.
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message.
        message: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl MenuError {
    // ========== Constructors ==========

    /// Create an invalid items error.
    pub fn invalid_items(message: impl Into<String>) -> Self {
        Self::InvalidItems {
            message: message.into(),
            hint: Some("Items must be an array of item descriptors or menu item nodes".to_string()),
        }
    }

    /// Create an unknown item error.
    pub fn unknown_item(id: ItemId) -> Self {
        Self::UnknownItem { id }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), hint: None, source: None }
    }

    /// Create a new configuration error with custom hint.
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config { message: message.into(), hint: Some(hint.into()), source: None }
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    // ========== Accessors ==========

    /// Get the actionable hint, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidItems { hint, .. } | Self::Config { hint, .. } => hint.as_deref(),
            Self::Io { .. } => Some("Check file permissions and that the path exists"),
            Self::UnknownItem { .. } | Self::Destroyed | Self::Internal { .. } => None,
        }
    }

    /// Whether this error was raised by attribute validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidItems { .. })
    }
}

// ========== Error Conversions ==========

/// Convert from std::io::Error to MenuError.
impl From<std::io::Error> for MenuError {
    fn from(err: std::io::Error) -> Self {
        MenuError::Io { message: err.to_string(), source: err }
    }
}

/// Convert from serde_json::Error to MenuError.
impl From<serde_json::Error> for MenuError {
    fn from(err: serde_json::Error) -> Self {
        MenuError::Config {
            message: format!("JSON error: {err}"),
            hint: Some(format!("Check line {} column {}", err.line(), err.column())),
            source: Some(Box::new(err)),
        }
    }
}
