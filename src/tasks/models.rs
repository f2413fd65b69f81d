//! Task models
//!
//! Tasks are never stored: they are derived from checkbox lines of note
//! content and rebuilt whenever the owning note's content or title changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Task
// ============================================================================

/// One checkbox line inside a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// `<note_id>-<line_index>`; stable only while lines above do not move
    pub id: String,
    /// Display text, due-date annotation stripped
    pub text: String,
    /// Whether the checkbox is ticked
    pub done: bool,
    /// Owning note
    pub note_id: String,
    /// Title of the owning note at extraction time
    pub note_title: String,
    /// The exact source line
    pub raw_line: String,
    /// Index of the line in the note's content split on `\n`
    pub line_index: usize,
    /// Due date from a trailing `@{YYYY-MM-DD}` annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Build the composite task id
    pub fn make_id(note_id: &str, line_index: usize) -> String {
        format!("{}-{}", note_id, line_index)
    }
}

// ============================================================================
// Buckets
// ============================================================================

/// Due-date relative grouping of tasks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskBucket {
    Overdue,
    Today,
    Upcoming,
    NoDate,
    Completed,
}

impl TaskBucket {
    /// All buckets in display order
    pub const ALL: [TaskBucket; 5] = [
        TaskBucket::Overdue,
        TaskBucket::Today,
        TaskBucket::Upcoming,
        TaskBucket::NoDate,
        TaskBucket::Completed,
    ];
}

impl fmt::Display for TaskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue => write!(f, "overdue"),
            Self::Today => write!(f, "today"),
            Self::Upcoming => write!(f, "upcoming"),
            Self::NoDate => write!(f, "no_date"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TaskBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overdue" => Ok(Self::Overdue),
            "today" => Ok(Self::Today),
            "upcoming" => Ok(Self::Upcoming),
            "no_date" => Ok(Self::NoDate),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown task bucket: {}", s)),
        }
    }
}

/// Tasks grouped by bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTasks {
    /// Not done, due before today, ascending by due date
    pub overdue: Vec<Task>,
    /// Not done, due today
    pub today: Vec<Task>,
    /// Not done, due after today, ascending by due date
    pub upcoming: Vec<Task>,
    /// Not done, no due date
    pub no_date: Vec<Task>,
    /// Every done task
    pub completed: Vec<Task>,
}

impl GroupedTasks {
    /// Tasks of one bucket
    pub fn bucket(&self, bucket: TaskBucket) -> &[Task] {
        match bucket {
            TaskBucket::Overdue => &self.overdue,
            TaskBucket::Today => &self.today,
            TaskBucket::Upcoming => &self.upcoming,
            TaskBucket::NoDate => &self.no_date,
            TaskBucket::Completed => &self.completed,
        }
    }

    /// Per-bucket counts, in display order
    pub fn counts(&self) -> Vec<(TaskBucket, usize)> {
        TaskBucket::ALL
            .iter()
            .map(|b| (*b, self.bucket(*b).len()))
            .collect()
    }

    /// Number of tasks still open
    pub fn open_count(&self) -> usize {
        self.overdue.len() + self.today.len() + self.upcoming.len() + self.no_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_count() == 0 && self.completed.is_empty()
    }
}

// ============================================================================
// Toggle
// ============================================================================

/// Result of a toggle request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The marker was flipped on `line_index`; `done` is the new state
    Toggled { line_index: usize, done: bool },
    /// The owning note does not exist anymore
    NoteMissing,
    /// Neither the recorded index nor a scan found the raw line
    LineNotFound,
}

impl ToggleOutcome {
    pub fn is_toggled(&self) -> bool {
        matches!(self, Self::Toggled { .. })
    }
}
