//! Notes module
//!
//! The note collection is the single source of truth of the application.
//! This module owns its data model, the injectable `NoteStore` repository,
//! the `NoteManager` that applies the history and timestamp rules on every
//! mutation, and JSON import/export.

pub mod error;
pub mod hashing;
pub mod lifecycle;
pub mod manager;
pub mod models;
pub mod query;
pub mod store;
pub mod transfer;

pub use error::{NoteError, NoteResult};
pub use lifecycle::NoteLifecycle;
pub use manager::{ImportMode, NoteManager};
pub use models::*;
pub use query::{search_notes, tag_counts};
pub use store::{MemoryNoteStore, NoteStore};
pub use transfer::{export_notes, parse_import, NoteExport};
