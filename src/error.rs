//! Error types for chain operations.

use thiserror::Error;

/// Main error type for chain operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Key not exist: {0}")]
    KeyNotExist(String),

    #[error("Key already exist: {0}")]
    KeyAlreadyExist(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),
}

impl ChainError {
    pub(crate) fn decode(e: serde_json::Error) -> Self {
        ChainError::Decode(e.to_string())
    }

    pub(crate) fn encode(e: serde_json::Error) -> Self {
        ChainError::Encode(e.to_string())
    }
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ChainError::KeyNotExist("name".into()).to_string(),
            "Key not exist: name"
        );
        assert_eq!(
            ChainError::KeyAlreadyExist("name".into()).to_string(),
            "Key already exist: name"
        );
    }

    #[test]
    fn test_decode_from_serde() {
        let err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        assert!(matches!(ChainError::decode(err), ChainError::Decode(_)));
    }
}
