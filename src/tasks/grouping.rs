//! Due-date bucketing of tasks relative to "today".
//!
//! Dates are compared as calendar days: a task due on the current local date
//! is `Today` regardless of the time of day.

use super::models::{GroupedTasks, Task, TaskBucket};
use chrono::{Local, NaiveDate};
use std::cmp::Ordering;

/// Bucket of a single task
pub fn bucket_for(task: &Task, today: NaiveDate) -> TaskBucket {
    if task.done {
        return TaskBucket::Completed;
    }
    match task.due_date {
        None => TaskBucket::NoDate,
        Some(due) => match due.cmp(&today) {
            Ordering::Less => TaskBucket::Overdue,
            Ordering::Equal => TaskBucket::Today,
            Ordering::Greater => TaskBucket::Upcoming,
        },
    }
}

/// Group tasks into buckets. Overdue and upcoming are sorted ascending by due
/// date (stable, so ties keep extraction order); the other buckets keep
/// input order.
pub fn group_tasks(tasks: &[Task], today: NaiveDate) -> GroupedTasks {
    let mut grouped = GroupedTasks::default();
    for task in tasks {
        let target = match bucket_for(task, today) {
            TaskBucket::Overdue => &mut grouped.overdue,
            TaskBucket::Today => &mut grouped.today,
            TaskBucket::Upcoming => &mut grouped.upcoming,
            TaskBucket::NoDate => &mut grouped.no_date,
            TaskBucket::Completed => &mut grouped.completed,
        };
        target.push(task.clone());
    }
    grouped.overdue.sort_by_key(|t| t.due_date);
    grouped.upcoming.sort_by_key(|t| t.due_date);
    grouped
}

/// Group tasks against the current local date
pub fn group_tasks_local(tasks: &[Task]) -> GroupedTasks {
    group_tasks(tasks, Local::now().date_naive())
}
