//! Task extraction over the whole note collection.

use super::models::Task;
use super::parser::parse_task_line;
use crate::notes::Note;
use tracing::debug;

/// Extract tasks from every note as one flat list: open tasks first, then
/// done ones, each group in note order then line order.
///
/// Pure: the same notes always yield the same tasks.
pub fn extract_tasks(notes: &[Note]) -> Vec<Task> {
    let mut tasks: Vec<Task> = notes.iter().flat_map(extract_note_tasks).collect();
    sort_open_first(&mut tasks);
    debug!(notes = notes.len(), tasks = tasks.len(), "Tasks extracted");
    tasks
}

/// Extract the tasks of a single note.
///
/// Lines are split on `\n` only, so `line_index` addresses the same line a
/// toggle will rewrite.
pub fn extract_note_tasks(note: &Note) -> Vec<Task> {
    note.content
        .split('\n')
        .enumerate()
        .filter_map(|(line_index, line)| {
            let parsed = parse_task_line(line)?;
            Some(Task {
                id: Task::make_id(&note.id, line_index),
                text: parsed.text,
                done: parsed.done,
                note_id: note.id.clone(),
                note_title: note.title.clone(),
                raw_line: line.to_string(),
                line_index,
                due_date: parsed.due_date,
            })
        })
        .collect()
}

/// Order for flat-list consumers: open tasks before done ones, otherwise
/// extraction order (stable).
pub fn sort_open_first(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.done);
}
