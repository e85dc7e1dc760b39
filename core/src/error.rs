use thiserror::Error;

use crate::index::DocId;

/// Fatal error conditions surfaced by the retrieval core.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Search was invoked before any successful build.
    #[error("no index has been built yet")]
    NotInitialized,
}

/// Reasons a record is rejected during a build.
///
/// Rejections are collected into the build report and never raised
/// per-document; the build keeps going.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDocument {
    #[error("document has no id")]
    MissingId,

    #[error("duplicate document id {0}")]
    DuplicateId(DocId),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InvalidDocument::DuplicateId(7);
        assert_eq!(err.to_string(), "duplicate document id 7");
        assert_eq!(
            EngineError::NotInitialized.to_string(),
            "no index has been built yet"
        );
    }
}
