//! NoteStore trait definition and in-memory implementation
//!
//! The store is a dumb keyed repository: it does not know about history,
//! timestamps or events. Those rules live in [`super::NoteManager`].

use super::error::{NoteError, NoteResult};
use super::models::Note;
use std::collections::HashMap;
use std::sync::RwLock;

/// Abstract interface for the note collection.
///
/// The host application owns persistence; anything that can list, fetch,
/// write and remove notes by id can back the engine.
pub trait NoteStore: Send + Sync {
    /// All notes, in insertion order
    fn list(&self) -> Vec<Note>;

    /// Get a note by id
    fn get(&self, id: &str) -> Option<Note>;

    /// Insert or replace a note keyed by its id
    fn put(&self, note: Note);

    /// Remove a note, returning it
    fn remove(&self, id: &str) -> NoteResult<Note>;

    /// Replace the whole collection
    fn replace_all(&self, notes: Vec<Note>);
}

/// In-memory `NoteStore` preserving insertion order.
#[derive(Default)]
pub struct MemoryNoteStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    order: Vec<String>,
    notes: HashMap<String, Note>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with notes (later duplicates replace earlier ones)
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let store = Self::new();
        store.replace_all(notes);
        store
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl NoteStore for MemoryNoteStore {
    fn list(&self) -> Vec<Note> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.notes.get(id).cloned())
            .collect()
    }

    fn get(&self, id: &str) -> Option<Note> {
        self.read().notes.get(id).cloned()
    }

    fn put(&self, note: Note) {
        let mut inner = self.write();
        if !inner.notes.contains_key(&note.id) {
            inner.order.push(note.id.clone());
        }
        inner.notes.insert(note.id.clone(), note);
    }

    fn remove(&self, id: &str) -> NoteResult<Note> {
        let mut inner = self.write();
        let note = inner
            .notes
            .remove(id)
            .ok_or_else(|| NoteError::NotFound { id: id.to_string() })?;
        inner.order.retain(|existing| existing != id);
        Ok(note)
    }

    fn replace_all(&self, notes: Vec<Note>) {
        let mut inner = self.write();
        inner.order.clear();
        inner.notes.clear();
        for note in notes {
            if !inner.notes.contains_key(&note.id) {
                inner.order.push(note.id.clone());
            }
            inner.notes.insert(note.id.clone(), note);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_list_preserves_order() {
        let store = MemoryNoteStore::new();
        store.put(Note::with_id("b", "B", ""));
        store.put(Note::with_id("a", "A", ""));

        let ids: Vec<_> = store.list().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(store.get("a").unwrap().title, "A");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_put_replaces_in_place() {
        let store = MemoryNoteStore::new();
        store.put(Note::with_id("a", "A", ""));
        store.put(Note::with_id("b", "B", ""));
        store.put(Note::with_id("a", "A2", ""));

        let notes = store.list();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "A2");
    }

    #[test]
    fn test_remove() {
        let store = MemoryNoteStore::with_notes(vec![Note::with_id("a", "A", "")]);
        assert_eq!(store.remove("a").unwrap().id, "a");
        assert!(store.is_empty());
        assert!(matches!(
            store.remove("a"),
            Err(NoteError::NotFound { .. })
        ));
    }
}
