//! Wiki-link (`[[Title]]`) extraction and title resolution.
//!
//! Titles resolve case-insensitively after trimming. When several notes share
//! a normalized title, the first one in input order wins.

use crate::notes::{normalize_title, Note};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `[[...]]` with no brackets inside; matches are non-overlapping.
static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]]*?)\]\]").expect("wiki link pattern is valid")
});

/// Raw inner text of every `[[...]]` occurrence, in order of appearance.
pub fn extract_wiki_links(content: &str) -> Vec<&str> {
    WIKI_LINK
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Normalized title → note id lookup
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    by_title: HashMap<String, String>,
}

impl TitleIndex {
    pub fn build(notes: &[Note]) -> Self {
        let mut by_title = HashMap::with_capacity(notes.len());
        for note in notes {
            let key = note.title_key();
            if key.is_empty() {
                continue;
            }
            by_title.entry(key).or_insert_with(|| note.id.clone());
        }
        Self { by_title }
    }

    /// Id of the note a link title refers to. Empty titles never resolve.
    pub fn resolve(&self, title: &str) -> Option<&str> {
        let key = normalize_title(title);
        if key.is_empty() {
            return None;
        }
        self.by_title.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

/// A `[[link]]` whose title matches no note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedLink {
    pub note_id: String,
    pub title: String,
}

/// Ids of notes (other than `id`) that link to `id`, in note order.
pub fn backlinks(notes: &[Note], id: &str) -> Vec<String> {
    let index = TitleIndex::build(notes);
    notes
        .iter()
        .filter(|note| note.id != id)
        .filter(|note| {
            extract_wiki_links(&note.content)
                .into_iter()
                .any(|title| index.resolve(title) == Some(id))
        })
        .map(|note| note.id.clone())
        .collect()
}

/// Every non-empty link title that resolves to no note, once per note.
pub fn unresolved_links(notes: &[Note]) -> Vec<UnresolvedLink> {
    let index = TitleIndex::build(notes);
    let mut out = Vec::new();
    for note in notes {
        let mut seen: Vec<String> = Vec::new();
        for title in extract_wiki_links(&note.content) {
            let trimmed = title.trim();
            if trimmed.is_empty() || index.resolve(trimmed).is_some() {
                continue;
            }
            let key = normalize_title(trimmed);
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            out.push(UnresolvedLink {
                note_id: note.id.clone(),
                title: trimmed.to_string(),
            });
        }
    }
    out
}
