//! Note change events
//!
//! This module provides:
//! - `NoteEvent` — typed events emitted after every collection mutation
//! - `EventEmitter` — the injection seam used by `NoteManager`
//! - `EventLog` — buffering emitter the host drains to schedule recomputation

mod bus;
mod types;

pub use bus::EventLog;
pub use types::{EventEmitter, NoteAction, NoteEvent};
