//! Error types for reading and writing saved bug collections.

use thiserror::Error;

/// Errors that can occur while loading or saving a bug collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The stream ended before the precheck header window was filled.
    #[error("stream truncated: expected {expected} header bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    /// The header window has no `<BugCollection>` line.
    #[error("content does not look like a saved bug collection")]
    NotBugCollection,

    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Element name with no matching handler or registered translator.
    #[error("Unknown element type: {0}")]
    UnknownElement(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Invalid element or attribute value.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },
}

impl CollectionError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create an unknown element error.
    pub fn unknown_element(name: impl Into<String>) -> Self {
        Self::UnknownElement(name.into())
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "attribute",
            name: name.into(),
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "attribute",
            message: message.into(),
        }
    }
}
