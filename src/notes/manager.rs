//! Note Manager - CRUD operations for notes
//!
//! Every mutation of the note collection goes through here so that the
//! history rule, timestamp progression and change events are applied
//! uniformly. Task toggling writes back through [`NoteManager::update_note`].

use super::error::{NoteError, NoteResult};
use super::lifecycle::NoteLifecycle;
use super::models::*;
use super::store::NoteStore;
use crate::events::{EventEmitter, NoteAction, NoteEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// How an import combines with the existing collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Drop the current collection and keep only the imported notes
    #[default]
    Replace,
    /// Keep existing notes; for ids present on both sides the more recently
    /// updated version wins
    Merge,
}

/// Manager for note operations
pub struct NoteManager {
    store: Arc<dyn NoteStore>,
    lifecycle: NoteLifecycle,
    event_emitter: Option<Arc<dyn EventEmitter>>,
}

impl NoteManager {
    /// Create a new NoteManager
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            lifecycle: NoteLifecycle::default(),
            event_emitter: None,
        }
    }

    /// Attach an event emitter (builder pattern).
    pub fn with_event_emitter(mut self, emitter: Arc<dyn EventEmitter>) -> Self {
        self.event_emitter = Some(emitter);
        self
    }

    /// Use custom lifecycle rules (builder pattern).
    pub fn with_lifecycle(mut self, lifecycle: NoteLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Emit an event (no-op if event_emitter is None)
    fn emit(&self, event: NoteEvent) {
        if let Some(emitter) = &self.event_emitter {
            emitter.emit(event);
        }
    }

    /// Snapshot of the collection in store order, the input of every derivation
    pub fn notes(&self) -> Vec<Note> {
        self.store.list()
    }

    /// Notes for display: pinned first, then most recently updated first
    pub fn list_notes(&self) -> Vec<Note> {
        let mut notes = self.store.list();
        notes.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        notes
    }

    /// Get a note by id
    pub fn get_note(&self, id: &str) -> Option<Note> {
        self.store.get(id)
    }

    /// Create a new note
    pub fn create_note(&self, req: CreateNoteRequest) -> Note {
        let mut note = Note::new(req.title, req.content);
        note.tags = normalize_tags(req.tags.unwrap_or_default());
        note.pinned = req.pinned.unwrap_or(false);

        self.store.put(note.clone());
        debug!(note_id = %note.id, "Note created");
        self.emit(NoteEvent::new(NoteAction::Created, note.id.clone()));
        note
    }

    /// Replace a note with a full new version.
    ///
    /// Applies the history rule and bumps `updated_at`. The note must exist.
    pub fn update_note(&self, note: Note) -> NoteResult<Note> {
        let previous = self
            .store
            .get(&note.id)
            .ok_or_else(|| NoteError::NotFound {
                id: note.id.clone(),
            })?;

        let mut next = note;
        next.tags = normalize_tags(std::mem::take(&mut next.tags));
        let updated = self.lifecycle.apply_update(&previous, next);

        self.store.put(updated.clone());
        debug!(
            note_id = %updated.id,
            history = updated.history.len(),
            "Note updated"
        );
        self.emit(NoteEvent::new(NoteAction::Updated, updated.id.clone()));
        Ok(updated)
    }

    /// Update selected fields of a note
    pub fn apply_update(&self, id: &str, req: UpdateNoteRequest) -> NoteResult<Note> {
        let mut note = self
            .store
            .get(id)
            .ok_or_else(|| NoteError::NotFound { id: id.to_string() })?;

        if let Some(title) = req.title {
            note.title = title;
        }
        if let Some(content) = req.content {
            note.content = content;
        }
        if let Some(tags) = req.tags {
            note.tags = tags;
        }
        self.update_note(note)
    }

    /// Pin or unpin a note. Not a content change: `updated_at` is untouched.
    pub fn set_pinned(&self, id: &str, pinned: bool) -> NoteResult<Note> {
        let mut note = self
            .store
            .get(id)
            .ok_or_else(|| NoteError::NotFound { id: id.to_string() })?;
        note.pinned = pinned;
        self.store.put(note.clone());
        self.emit(NoteEvent::new(NoteAction::Updated, id));
        Ok(note)
    }

    /// Restore a content snapshot from the note's history
    pub fn restore_version(&self, id: &str, index: usize) -> NoteResult<Note> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| NoteError::NotFound { id: id.to_string() })?;
        let restored = self.lifecycle.restore(&current, index)?;
        self.store.put(restored.clone());
        self.emit(NoteEvent::new(NoteAction::Updated, id));
        Ok(restored)
    }

    /// Delete a note
    pub fn delete_note(&self, id: &str) -> NoteResult<Note> {
        let note = self.store.remove(id)?;
        debug!(note_id = %id, "Note deleted");
        self.emit(NoteEvent::new(NoteAction::Deleted, id));
        Ok(note)
    }

    /// Import a batch of notes. Returns the size of the resulting collection.
    pub fn import_notes(&self, notes: Vec<Note>, mode: ImportMode) -> NoteResult<usize> {
        super::transfer::check_unique_ids(&notes)?;
        let imported = notes.len();
        let notes: Vec<Note> = notes
            .into_iter()
            .map(super::transfer::normalize_note_tags)
            .collect();

        let merged = match mode {
            ImportMode::Replace => notes,
            ImportMode::Merge => {
                let mut current = self.store.list();
                let mut position: HashMap<String, usize> = current
                    .iter()
                    .enumerate()
                    .map(|(i, n)| (n.id.clone(), i))
                    .collect();
                for note in notes {
                    match position.get(&note.id) {
                        Some(&i) => {
                            if note.updated_at > current[i].updated_at {
                                current[i] = note;
                            }
                        }
                        None => {
                            position.insert(note.id.clone(), current.len());
                            current.push(note);
                        }
                    }
                }
                current
            }
        };

        let total = merged.len();
        self.store.replace_all(merged);
        debug!(imported, total, ?mode, "Notes imported");
        self.emit(
            NoteEvent::collection(NoteAction::Imported)
                .with_payload(serde_json::json!({ "imported": imported, "total": total })),
        );
        Ok(total)
    }
}
