//! Toggling a task writes the flipped checkbox back into its note.
//!
//! There is no task store: the note content is the only state, and the
//! write goes through `NoteManager::update_note` so history and timestamps
//! follow the usual rules.

use super::models::{Task, ToggleOutcome};
use super::parser::toggle_marker;
use crate::notes::{NoteManager, NoteResult};
use tracing::debug;

/// Locate the line a task refers to.
///
/// Prefers `line_index` when it still holds `raw_line`; otherwise the first
/// line exactly equal to `raw_line`.
pub fn locate_line(lines: &[&str], line_index: usize, raw_line: &str) -> Option<usize> {
    if lines.get(line_index) == Some(&raw_line) {
        return Some(line_index);
    }
    lines.iter().position(|line| *line == raw_line)
}

/// Flip the checkbox of the referenced line inside `content`.
///
/// Returns the new content, the index of the rewritten line and the new done
/// state, or `None` if the line cannot be found or is not a task line.
pub fn toggle_in_content(
    content: &str,
    line_index: usize,
    raw_line: &str,
) -> Option<(String, usize, bool)> {
    let mut lines: Vec<&str> = content.split('\n').collect();
    let index = locate_line(&lines, line_index, raw_line)?;
    let (toggled, done) = toggle_marker(lines[index])?;
    lines[index] = &toggled;
    Some((lines.join("\n"), index, done))
}

/// Toggle a task's completion state in its owning note.
///
/// A task whose note or line has gone away is a no-op, reported through the
/// returned [`ToggleOutcome`].
pub fn toggle_task(manager: &NoteManager, task: &Task) -> NoteResult<ToggleOutcome> {
    let Some(mut note) = manager.get_note(&task.note_id) else {
        debug!(task_id = %task.id, "Toggle skipped: note missing");
        return Ok(ToggleOutcome::NoteMissing);
    };

    let Some((content, line_index, done)) =
        toggle_in_content(&note.content, task.line_index, &task.raw_line)
    else {
        debug!(task_id = %task.id, "Toggle skipped: line not found");
        return Ok(ToggleOutcome::LineNotFound);
    };

    if line_index != task.line_index {
        debug!(
            task_id = %task.id,
            from = task.line_index,
            to = line_index,
            "Stale task index recovered by scan"
        );
    }

    note.content = content;
    manager.update_note(note)?;
    Ok(ToggleOutcome::Toggled { line_index, done })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::Note;
    use crate::tasks::extract_note_tasks;
    use crate::test_helpers;

    fn manager_with(note: Note) -> NoteManager {
        test_helpers::manager_with(vec![note])
    }

    #[test]
    fn test_toggle_round_trip_restores_line() {
        let original = "intro\n- [ ] write report @{2024-04-01}\noutro";
        let mgr = manager_with(Note::with_id("n", "N", original));

        let task = extract_note_tasks(&mgr.get_note("n").unwrap()).remove(0);
        let outcome = toggle_task(&mgr, &task).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Toggled {
                line_index: 1,
                done: true
            }
        );
        let toggled = mgr.get_note("n").unwrap();
        assert_eq!(
            toggled.content,
            "intro\n- [x] write report @{2024-04-01}\noutro"
        );

        let task = extract_note_tasks(&toggled).remove(0);
        assert!(task.done);
        toggle_task(&mgr, &task).unwrap();
        assert_eq!(mgr.get_note("n").unwrap().content, original);
    }

    #[test]
    fn test_toggle_pushes_history_and_bumps_timestamp() {
        let mgr = manager_with(Note::with_id("n", "N", "- [ ] a"));
        let before = mgr.get_note("n").unwrap();
        let task = extract_note_tasks(&before).remove(0);

        toggle_task(&mgr, &task).unwrap();
        let after = mgr.get_note("n").unwrap();
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.history.len(), 1);
        assert_eq!(after.history[0].content, "- [ ] a");
    }

    #[test]
    fn test_stale_index_recovers_by_scan() {
        let mgr = manager_with(Note::with_id("n", "N", "- [ ] first\n- [ ] second"));
        let task = extract_note_tasks(&mgr.get_note("n").unwrap()).remove(1);
        assert_eq!(task.line_index, 1);

        // Insert two lines above the task after it was extracted
        let mut note = mgr.get_note("n").unwrap();
        note.content = "# Header\n\n- [ ] first\n- [ ] second".into();
        mgr.update_note(note).unwrap();

        let outcome = toggle_task(&mgr, &task).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Toggled {
                line_index: 3,
                done: true
            }
        );
        assert_eq!(
            mgr.get_note("n").unwrap().content,
            "# Header\n\n- [ ] first\n- [x] second"
        );
    }

    #[test]
    fn test_missing_line_is_noop() {
        let mgr = manager_with(Note::with_id("n", "N", "- [ ] keep me"));
        let mut task = extract_note_tasks(&mgr.get_note("n").unwrap()).remove(0);
        task.raw_line = "- [ ] deleted meanwhile".into();
        task.line_index = 7;

        let before = mgr.get_note("n").unwrap();
        assert_eq!(
            toggle_task(&mgr, &task).unwrap(),
            ToggleOutcome::LineNotFound
        );
        assert_eq!(mgr.get_note("n").unwrap(), before);
    }

    #[test]
    fn test_missing_note_is_noop() {
        let mgr = manager_with(Note::with_id("n", "N", "- [ ] a"));
        let mut task = extract_note_tasks(&mgr.get_note("n").unwrap()).remove(0);
        task.note_id = "gone".into();
        assert_eq!(
            toggle_task(&mgr, &task).unwrap(),
            ToggleOutcome::NoteMissing
        );
    }

    #[test]
    fn test_duplicate_lines_prefers_recorded_index() {
        let content = "- [ ] same\n- [ ] same";
        let (toggled, index, _) = toggle_in_content(content, 1, "- [ ] same").unwrap();
        assert_eq!(index, 1);
        assert_eq!(toggled, "- [ ] same\n- [x] same");
    }

    #[test]
    fn test_preserves_trailing_newline_and_other_lines() {
        let content = "a\n- [x] done\n\n";
        let (toggled, _, done) = toggle_in_content(content, 1, "- [x] done").unwrap();
        assert!(!done);
        assert_eq!(toggled, "a\n- [ ] done\n\n");
    }
}
