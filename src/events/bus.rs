//! In-process event log for note change events

use super::{EventEmitter, NoteEvent};
use std::sync::Mutex;
use tracing::debug;

/// Emitter that buffers events until the host drains them.
///
/// Fire-and-forget: emitting never blocks on consumers and never panics.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<NoteEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events, oldest first
    pub fn drain(&self) -> Vec<NoteEvent> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *events)
    }

    /// Number of buffered events
    pub fn pending(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl EventEmitter for EventLog {
    fn emit(&self, event: NoteEvent) {
        debug!(
            action = ?event.action,
            note_id = event.note_id.as_deref().unwrap_or("*"),
            "NoteEvent emitted"
        );
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
