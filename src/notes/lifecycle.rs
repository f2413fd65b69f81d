//! Note Lifecycle Management
//!
//! Handles the history snapshot rule and timestamp progression applied to
//! every note replacement.

use super::error::{NoteError, NoteResult};
use super::models::{HistoryEntry, Note, DEFAULT_HISTORY_LIMIT};
use chrono::{DateTime, Duration, Utc};

/// Lifecycle rules for note updates
#[derive(Debug, Clone)]
pub struct NoteLifecycle {
    /// Maximum number of history snapshots kept per note
    history_limit: usize,
}

impl Default for NoteLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteLifecycle {
    pub fn new() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Create with a custom history cap
    pub fn with_history_limit(history_limit: usize) -> Self {
        Self { history_limit }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Apply a full replacement `next` on top of the stored `previous` note.
    ///
    /// - `id` and `created_at` always come from `previous`
    /// - history is owned by the lifecycle: the caller's copy is ignored
    /// - a snapshot of the previous content is pushed only when the trimmed
    ///   content changed
    /// - `updated_at` is strictly greater than the previous value
    pub fn apply_update(&self, previous: &Note, mut next: Note) -> Note {
        next.id = previous.id.clone();
        next.created_at = previous.created_at;
        next.history = previous.history.clone();

        if content_changed(&previous.content, &next.content) {
            next.history.insert(
                0,
                HistoryEntry {
                    content: previous.content.clone(),
                    updated_at: previous.updated_at,
                },
            );
            next.history.truncate(self.history_limit);
        }

        next.updated_at = next_timestamp(previous.updated_at);
        next
    }

    /// Restore the history snapshot at `index` as a regular content update.
    pub fn restore(&self, current: &Note, index: usize) -> NoteResult<Note> {
        let entry = current
            .history
            .get(index)
            .ok_or_else(|| NoteError::HistoryIndexOutOfRange {
                id: current.id.clone(),
                index,
                len: current.history.len(),
            })?;

        let mut next = current.clone();
        next.content = entry.content.clone();
        Ok(self.apply_update(current, next))
    }
}

/// Whether a content edit is worth a history snapshot (whitespace-only
/// changes at the edges do not count).
pub fn content_changed(before: &str, after: &str) -> bool {
    before.trim() != after.trim()
}

/// Next `updated_at` value: now, or one millisecond past `previous` when the
/// clock has not moved forward.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
