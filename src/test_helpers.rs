//! Test helper factories
//!
//! Convenience functions for creating notes and managers with sensible
//! defaults.
#![allow(dead_code)]

use crate::events::EventLog;
use crate::notes::{MemoryNoteStore, Note, NoteManager};
use chrono::NaiveDate;
use std::sync::Arc;

// ============================================================================
// Note factories
// ============================================================================

/// Note with a fixed id, title and content
pub fn test_note(id: &str, title: &str, content: &str) -> Note {
    Note::with_id(id, title, content)
}

/// Note carrying the given tags
pub fn test_note_tagged(id: &str, title: &str, tags: &[&str]) -> Note {
    Note::with_id(id, title, "").tagged(tags.iter().copied())
}

/// Task line with an optional due date
pub fn task_line(text: &str, done: bool, due: Option<NaiveDate>) -> String {
    let mark = if done { 'x' } else { ' ' };
    match due {
        Some(d) => format!("- [{}] {} @{{{}}}", mark, text, d.format("%Y-%m-%d")),
        None => format!("- [{}] {}", mark, text),
    }
}

/// A calendar day, panicking on an invalid date
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

// ============================================================================
// Manager builders
// ============================================================================

/// Manager over an in-memory store seeded with `notes`
pub fn manager_with(notes: Vec<Note>) -> NoteManager {
    NoteManager::new(Arc::new(MemoryNoteStore::with_notes(notes)))
}

/// Manager wired to an `EventLog`, returned alongside for assertions
pub fn manager_with_events(notes: Vec<Note>) -> (NoteManager, Arc<EventLog>) {
    let log = Arc::new(EventLog::new());
    let manager = manager_with(notes).with_event_emitter(log.clone());
    (manager, log)
}
