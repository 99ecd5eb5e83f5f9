//! Error types for resolver configuration and collaborators

use thiserror::Error;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Configuration errors surfaced at resolver construction or handler
/// registration. These are fatal to setup and never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    /// A delimiter that cannot bracket a placeholder occurrence
    #[error("Delimiter '{delimiter}' is invalid: {reason}")]
    InvalidDelimiter {
        /// The offending delimiter character
        delimiter: char,
        /// Why it was rejected
        reason: String,
    },

    /// A tag whose characters would break the derived pattern
    #[error("Tag '{tag}' is invalid: tags must be ASCII alphanumerics or '_'")]
    InvalidTag {
        /// The offending tag string
        tag: String,
    },
}

impl ResolverError {
    /// Create an invalid delimiter error
    pub fn invalid_delimiter(delimiter: char, reason: impl Into<String>) -> Self {
        Self::InvalidDelimiter {
            delimiter,
            reason: reason.into(),
        }
    }

    /// Create an invalid tag error
    pub fn invalid_tag(tag: impl Into<String>) -> Self {
        Self::InvalidTag { tag: tag.into() }
    }
}

/// Failures from the outbound HTTP collaborator
#[derive(Error, Debug)]
pub enum HttpError {
    /// The request method is not one the dispatcher supports
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// The offending method token
        method: String,
    },

    /// Transport-level failure (connect, timeout, read)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
