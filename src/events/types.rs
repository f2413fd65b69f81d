//! Note change event types

use serde::{Deserialize, Serialize};

/// The mutation performed on the note collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    Created,
    Updated,
    Deleted,
    Imported,
}

/// An event emitted after a successful mutation of the note collection.
///
/// Hosts use these as the trigger for `DerivedCache::recompute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// The action performed
    pub action: NoteAction,
    /// Affected note id (`None` for collection-wide imports)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    /// Optional payload (e.g. imported note count)
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
    /// ISO 8601 timestamp
    pub timestamp: String,
}

impl NoteEvent {
    /// Create an event for a single note with the current timestamp
    pub fn new(action: NoteAction, note_id: impl Into<String>) -> Self {
        Self {
            action,
            note_id: Some(note_id.into()),
            payload: serde_json::Value::Null,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a collection-wide event
    pub fn collection(action: NoteAction) -> Self {
        Self {
            action,
            note_id: None,
            payload: serde_json::Value::Null,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Set the payload
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Receiver of note events. Emitting must never fail or block.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: NoteEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_action_snake_case() {
        assert_eq!(
            serde_json::to_string(&NoteAction::Imported).unwrap(),
            "\"imported\""
        );
    }

    #[test]
    fn test_note_event_serde_roundtrip() {
        let event = NoteEvent::new(NoteAction::Updated, "note-1")
            .with_payload(serde_json::json!({"title": "Groceries"}));

        let json = serde_json::to_string(&event).unwrap();
        let back: NoteEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(back.action, NoteAction::Updated);
        assert_eq!(back.note_id.as_deref(), Some("note-1"));
        assert_eq!(back.payload["title"], "Groceries");
    }

    #[test]
    fn test_null_payload_and_missing_id_omitted() {
        let event = NoteEvent::collection(NoteAction::Imported);
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("\"payload\""));
        assert!(!json.contains("\"note_id\""));
    }
}
