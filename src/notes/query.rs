//! Read-only queries over the note collection: search and tag statistics.

use super::models::{Note, NoteFilters};
use std::collections::HashMap;

/// Filter notes by text, tags and pin state, preserving input order.
pub fn search_notes<'a>(notes: &'a [Note], filters: &NoteFilters) -> Vec<&'a Note> {
    let needle = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let pinned_only = filters.pinned_only.unwrap_or(false);

    notes
        .iter()
        .filter(|note| !pinned_only || note.pinned)
        .filter(|note| match &filters.tags {
            Some(tags) => tags.iter().all(|t| note.has_tag(t)),
            None => true,
        })
        .filter(|note| match &needle {
            Some(needle) => {
                note.title.to_lowercase().contains(needle)
                    || note.content.to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect()
}

/// Number of notes per tag, most used first (ties broken alphabetically).
pub fn tag_counts(notes: &[Note]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for note in notes {
        for tag in &note.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
