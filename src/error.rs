//! Error types for descy
//!
//! Almost nothing in a run is fatal: malformed markup, lookup misses and store
//! problems all degrade and are reported as [events](crate::events). The
//! errors here cover the cases a caller has to act on.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for descy operations
#[derive(Error, Debug)]
pub enum DescyError {
    /// The input document could not be read
    #[error("failed to read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The annotated document could not be written back
    #[error("failed to write document {path}: {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Definition store could not be loaded or saved
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An ignore list could not be read
    #[error("failed to read ignore list {path}: {source}")]
    IgnoreList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A frequency list could not be read or parsed
    #[error("invalid frequency list {path}: {reason}")]
    FrequencyList { path: PathBuf, reason: String },

    /// The compiled-in word frequency model could not be loaded
    #[error("failed to load word frequency corpus: {0}")]
    Corpus(String),

    /// The remote lookup client could not be built
    #[error("lookup client error: {0}")]
    Lookup(String),
}

/// Errors raised by the definition store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access definition store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("definition store {path} is not a JSON object of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize definitions: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to replace definition store {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Result type alias for descy operations
pub type Result<T> = std::result::Result<T, DescyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DescyError::FrequencyList {
            path: PathBuf::from("freq.txt"),
            reason: "line 3: missing value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid frequency list freq.txt: line 3: missing value"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DescyError = StoreError::Serialize(source).into();
        assert!(err.to_string().starts_with("failed to serialize definitions"));
    }
}
