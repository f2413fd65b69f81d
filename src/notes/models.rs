//! Note models and DTOs
//!
//! A note is the only stored entity of the application: tasks and graph
//! edges are derived from its title, content and tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default cap for the per-note content history.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

// ============================================================================
// History
// ============================================================================

/// A pre-mutation snapshot of a note's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Content as it was before the mutation
    pub content: String,
    /// `updated_at` of the note at the time the snapshot was taken
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Main Note Struct
// ============================================================================

/// A markdown note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque identifier, immutable for the lifetime of the note
    pub id: String,
    /// Display title, also the target of `[[wiki links]]`
    pub title: String,
    /// Multi-line markdown content
    #[serde(default)]
    pub content: String,
    /// Tags for categorization (treated as a set)
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// When the note was last mutated
    pub updated_at: DateTime<Utc>,
    /// Pinned notes are listed first
    #[serde(default)]
    pub pinned: bool,
    /// Content snapshots, most recent first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Note {
    /// Create a new note with a fresh id
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, content)
    }

    /// Create a new note with an explicit id
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags: vec![],
            created_at: now,
            updated_at: now,
            pinned: false,
            history: vec![],
        }
    }

    /// Builder-style tag assignment (normalized)
    pub fn tagged<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    /// Whether the note carries the given tag (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Content length in Unicode scalar values
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Title normalized for link resolution
    pub fn title_key(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Trim and lower-case a title so that `[[my note]]` matches "My Note".
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Trim tags, drop empty ones and remove duplicates, keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag: String = tag.into();
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to create a note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub pinned: Option<bool>,
}

/// Partial update of a note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Filters for searching notes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteFilters {
    /// Case-insensitive substring searched in title and content
    pub search: Option<String>,
    /// Every listed tag must be present on the note
    pub tags: Option<Vec<String>>,
    /// Only pinned notes
    pub pinned_only: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_creation() {
        let note = Note::new("Groceries", "- [ ] Buy milk");

        assert!(!note.id.is_empty());
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.created_at, note.updated_at);
        assert!(note.history.is_empty());
        assert!(!note.pinned);
    }

    #[test]
    fn test_normalize_tags_dedups_and_trims() {
        let tags = normalize_tags(vec![" work ", "home", "work", "", "  "]);
        assert_eq!(tags, vec!["work".to_string(), "home".to_string()]);
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  My Note "), "my note");
        assert_eq!(normalize_title("ÉTÉ"), "été");
    }

    #[test]
    fn test_content_chars_counts_scalars() {
        let note = Note::with_id("n1", "t", "héllo");
        assert_eq!(note.content_chars(), 5);
    }

    #[test]
    fn test_note_serde_uses_camel_case() {
        let note = Note::with_id("n1", "Title", "body").tagged(["x"]);
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());

        let back: Note = serde_json::from_value(json).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn test_note_deserialize_defaults() {
        let json = r#"{
            "id": "n1",
            "title": "Bare",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert!(!note.pinned);
        assert!(note.history.is_empty());
    }
}
