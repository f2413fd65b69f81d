//! Task extraction module
//!
//! Derives a flat task list from checkbox lines across all notes, groups it
//! into due-date buckets, and toggles tasks by rewriting their source line.
//!
//! ## Modules
//!
//! - [`models`] — `Task`, `TaskBucket`, `GroupedTasks`, `ToggleOutcome`
//! - [`parser`] — the checkbox line grammar
//! - [`extractor`] — notes → tasks
//! - [`grouping`] — tasks → buckets relative to today
//! - [`toggle`] — write a flipped checkbox back through `NoteManager`

pub mod extractor;
pub mod grouping;
pub mod models;
pub mod parser;
pub mod toggle;

pub use extractor::{extract_note_tasks, extract_tasks, sort_open_first};
pub use grouping::{bucket_for, group_tasks, group_tasks_local};
pub use models::{GroupedTasks, Task, TaskBucket, ToggleOutcome};
pub use parser::{parse_task_line, ParsedLine};
pub use toggle::{toggle_in_content, toggle_task};
