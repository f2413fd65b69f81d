//! Checkbox line grammar
//!
//! ```text
//! <ws>*- [<marker>] <text>[<ws>*@{YYYY-MM-DD}]
//! marker := ' ' | 'x'
//! ```
//!
//! The match is anchored to the whole line. A line that does not fit is not
//! a task. A due-date annotation that does not fit the shape is left in the
//! text; one that fits but is not a calendar date is stripped and the task
//! has no due date.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*- \[( |x)\] (.*?)(?:\s*@\{([0-9]{4}-[0-9]{2}-[0-9]{2})\})?$")
        .expect("task line pattern is valid")
});

/// Fields recognized on a task line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub done: bool,
    pub text: String,
    pub due_date: Option<NaiveDate>,
}

/// Cheap guard run before the regex
#[inline]
pub fn looks_like_task(line: &str) -> bool {
    line.trim_start().starts_with("- [")
}

/// Parse one line of note content
pub fn parse_task_line(line: &str) -> Option<ParsedLine> {
    if !looks_like_task(line) {
        return None;
    }
    let caps = TASK_LINE.captures(line)?;

    let done = caps.get(1).map(|m| m.as_str()) == Some("x");
    let text = caps.get(2)?;

    // A well-shaped annotation is always stripped; it only yields a due date
    // when it names a real calendar day.
    let due_date = caps
        .get(3)
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok());

    Some(ParsedLine {
        done,
        text: text.as_str().to_string(),
        due_date,
    })
}

/// Flip the checkbox marker of a task line, leaving every other character
/// untouched. Returns `None` if the line is not a task.
pub fn toggle_marker(line: &str) -> Option<(String, bool)> {
    let parsed = parse_task_line(line)?;
    let marker_at = line.len() - line.trim_start().len() + "- [".len();
    let new_marker = if parsed.done { " " } else { "x" };

    let mut toggled = line.to_string();
    toggled.replace_range(marker_at..marker_at + 1, new_marker);
    Some((toggled, !parsed.done))
}
