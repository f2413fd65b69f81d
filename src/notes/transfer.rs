//! Import / export of the note collection as JSON
//!
//! The export envelope is `{ "version": 1, "exportedAt": ..., "notes": [...] }`.
//! Imports also accept a bare array of notes.

use super::error::{NoteError, NoteResult};
use super::models::{normalize_tags, Note};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current export format version
pub const EXPORT_VERSION: u32 = 1;

/// Export envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteExport {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub notes: Vec<Note>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Envelope(NoteExport),
    Bare(Vec<Note>),
}

/// Serialize notes into the export envelope (pretty-printed)
pub fn export_notes(notes: &[Note]) -> NoteResult<String> {
    let export = NoteExport {
        version: EXPORT_VERSION,
        exported_at: Utc::now(),
        notes: notes.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Parse an export envelope or a bare note array.
///
/// Tags of every imported note are normalized into a set.
pub fn parse_import(json: &str) -> NoteResult<Vec<Note>> {
    let payload: ImportPayload = serde_json::from_str(json)?;
    let notes = match payload {
        ImportPayload::Envelope(export) => {
            if export.version > EXPORT_VERSION {
                return Err(NoteError::Import {
                    reason: format!(
                        "unsupported export version {} (max {})",
                        export.version, EXPORT_VERSION
                    ),
                });
            }
            export.notes
        }
        ImportPayload::Bare(notes) => notes,
    };
    check_unique_ids(&notes)?;
    Ok(notes.into_iter().map(normalize_note_tags).collect())
}

/// Trim, drop empty and deduplicate the tags of a note coming from outside
pub fn normalize_note_tags(mut note: Note) -> Note {
    note.tags = normalize_tags(std::mem::take(&mut note.tags));
    note
}

/// Reject collections that would violate id uniqueness
pub fn check_unique_ids(notes: &[Note]) -> NoteResult<()> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        if !seen.insert(note.id.as_str()) {
            return Err(NoteError::DuplicateId {
                id: note.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_then_import_envelope() {
        let notes = vec![
            Note::with_id("a", "A", "- [ ] one").tagged(["x"]),
            Note::with_id("b", "B", "[[A]]"),
        ];
        let json = export_notes(&notes).unwrap();
        assert!(json.contains("\"exportedAt\""));

        let back = parse_import(&json).unwrap();
        assert_eq!(back, notes);
    }

    #[test]
    fn test_import_bare_array() {
        let json = r#"[{
            "id": "a",
            "title": "A",
            "content": "hello",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }]"#;
        let notes = parse_import(json).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "hello");
    }

    #[test]
    fn test_import_rejects_future_version() {
        let json = r#"{"version": 99, "exportedAt": "2024-01-01T00:00:00Z", "notes": []}"#;
        assert!(matches!(
            parse_import(json),
            Err(NoteError::Import { .. })
        ));
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(
            parse_import("{\"nope\": true}"),
            Err(NoteError::Serialization(_))
        ));
    }

    #[test]
    fn test_import_normalizes_tags() {
        let json = r#"[{
            "id": "a",
            "title": "A",
            "content": "",
            "tags": ["x", "x", " x ", "", "y"],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }]"#;
        let notes = parse_import(json).unwrap();
        assert_eq!(notes[0].tags, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(
            crate::notes::tag_counts(&notes),
            vec![("x".to_string(), 1), ("y".to_string(), 1)]
        );
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let notes = vec![Note::with_id("a", "1", ""), Note::with_id("a", "2", "")];
        let json = serde_json::to_string(&notes).unwrap();
        assert!(matches!(
            parse_import(&json),
            Err(NoteError::DuplicateId { .. })
        ));
    }
}
