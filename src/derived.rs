//! Memoized derived views over the note collection.
//!
//! Tasks and the graph are pure functions of the notes. [`DerivedCache`]
//! keeps the last result of each together with a fingerprint of the inputs
//! it depends on, and rebuilds a view only when its fingerprint moves.
//! Tags and pins do not affect tasks; pins do not affect the graph.

use crate::graph::{build_graph, GraphConfig, NoteGraph};
use crate::notes::hashing::{hash_graph_inputs, hash_task_inputs};
use crate::notes::Note;
use crate::tasks::{extract_tasks, Task};
use serde::Serialize;
use tracing::debug;

/// Which views a [`DerivedCache::recompute`] call rebuilt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecomputeReport {
    pub tasks_rebuilt: bool,
    pub graph_rebuilt: bool,
}

impl RecomputeReport {
    pub fn any(&self) -> bool {
        self.tasks_rebuilt || self.graph_rebuilt
    }
}

#[derive(Debug, Default)]
pub struct DerivedCache {
    config: GraphConfig,
    tasks: Vec<Task>,
    graph: NoteGraph,
    task_fingerprint: Option<String>,
    graph_fingerprint: Option<String>,
}

impl DerivedCache {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Bring both views up to date with `notes`.
    pub fn recompute(&mut self, notes: &[Note]) -> RecomputeReport {
        let mut report = RecomputeReport::default();

        let task_fp = hash_task_inputs(notes);
        if self.task_fingerprint.as_deref() != Some(task_fp.as_str()) {
            self.tasks = extract_tasks(notes);
            self.task_fingerprint = Some(task_fp);
            report.tasks_rebuilt = true;
        }

        let graph_fp = hash_graph_inputs(notes);
        if self.graph_fingerprint.as_deref() != Some(graph_fp.as_str()) {
            self.graph = build_graph(notes, &self.config);
            self.graph_fingerprint = Some(graph_fp);
            report.graph_rebuilt = true;
        }

        debug!(
            tasks_rebuilt = report.tasks_rebuilt,
            graph_rebuilt = report.graph_rebuilt,
            "Derived views recomputed"
        );
        report
    }

    /// Replace the graph config; the graph is rebuilt on the next recompute.
    pub fn set_config(&mut self, config: GraphConfig) {
        if config != self.config {
            self.config = config;
            self.graph_fingerprint = None;
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn graph(&self) -> &NoteGraph {
        &self.graph
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_note, test_note_tagged};

    fn notes() -> Vec<Note> {
        vec![
            test_note("a", "A", "- [ ] one\n[[B]]").tagged(["x"]),
            test_note_tagged("b", "B", &["x"]),
        ]
    }

    #[test]
    fn test_first_recompute_builds_everything() {
        let mut cache = DerivedCache::default();
        let report = cache.recompute(&notes());
        assert!(report.tasks_rebuilt && report.graph_rebuilt);
        assert_eq!(cache.tasks().len(), 1);
        assert_eq!(cache.graph().link_count(), 2);
    }

    #[test]
    fn test_cached_tasks_are_open_first() {
        let mut cache = DerivedCache::default();
        cache.recompute(&[test_note("n", "N", "- [x] done\n- [ ] open")]);

        let done: Vec<bool> = cache.tasks().iter().map(|t| t.done).collect();
        assert_eq!(done, vec![false, true]);
        assert_eq!(cache.tasks()[0].line_index, 1);
    }

    #[test]
    fn test_unchanged_notes_hit_cache() {
        let mut cache = DerivedCache::default();
        let notes = notes();
        cache.recompute(&notes);
        assert!(!cache.recompute(&notes).any());
    }

    #[test]
    fn test_pin_and_history_changes_skip_rebuild() {
        let mut cache = DerivedCache::default();
        let mut notes = notes();
        cache.recompute(&notes);

        notes[0].pinned = true;
        notes[1].updated_at = notes[1].updated_at + chrono::Duration::seconds(5);
        assert!(!cache.recompute(&notes).any());
    }

    #[test]
    fn test_tag_change_rebuilds_graph_only() {
        let mut cache = DerivedCache::default();
        let mut notes = notes();
        cache.recompute(&notes);

        notes[1].tags = vec!["y".into()];
        let report = cache.recompute(&notes);
        assert!(!report.tasks_rebuilt);
        assert!(report.graph_rebuilt);
        assert_eq!(cache.graph().link_count(), 1);
    }

    #[test]
    fn test_title_change_rebuilds_tasks() {
        let mut cache = DerivedCache::default();
        let mut notes = notes();
        cache.recompute(&notes);

        notes[0].title = "Renamed".into();
        let report = cache.recompute(&notes);
        assert!(report.tasks_rebuilt);
        assert_eq!(cache.tasks()[0].note_title, "Renamed");
    }

    #[test]
    fn test_config_change_invalidates_graph() {
        let mut cache = DerivedCache::default();
        let notes = notes();
        cache.recompute(&notes);

        cache.set_config(GraphConfig {
            include_tag_links: false,
            ..Default::default()
        });
        let report = cache.recompute(&notes);
        assert!(report.graph_rebuilt);
        assert!(!report.tasks_rebuilt);
        assert_eq!(cache.graph().link_count(), 1);
    }
}
