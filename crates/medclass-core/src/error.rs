//! Error types for medclass

/// Result type alias using medclass's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for medclass operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation referenced an unregistered classifier name
    #[error("no such classifier {0}")]
    NotFound(String),

    /// A prediction referenced a criterion with no owning classifier
    #[error("no such classification criterion {0}")]
    InvalidCriterion(String),

    /// A prediction identifier could not be parsed
    #[error("invalid prediction identifier: {0}")]
    InvalidFormat(String),

    /// A classifier's own logic failed
    #[error("classifier error: {0}")]
    Classifier(String),

    /// A record decoder could not parse an item's bytes
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new invalid-criterion error
    pub fn invalid_criterion(criterion: impl Into<String>) -> Self {
        Self::InvalidCriterion(criterion.into())
    }

    /// Create a new invalid-format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
