//! Errors surfaced by note collection operations.
//!
//! Derivations (tasks, graph) never fail; only mutations and imports do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Note not found: {id}")]
    NotFound { id: String },

    #[error("Duplicate note id: {id}")]
    DuplicateId { id: String },

    #[error("History index {index} out of range for note {id} ({len} entries)")]
    HistoryIndexOutOfRange { id: String, index: usize, len: usize },

    #[error("Import failed: {reason}")]
    Import { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NoteError::NotFound { id: "n1".into() };
        assert_eq!(err.to_string(), "Note not found: n1");

        let err = NoteError::HistoryIndexOutOfRange {
            id: "n1".into(),
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "History index 4 out of range for note n1 (2 entries)"
        );
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: NoteError = parse.unwrap_err().into();
        assert!(matches!(err, NoteError::Serialization(_)));
    }
}
