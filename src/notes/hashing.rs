//! Input fingerprints for memoized recomputation
//!
//! Each derivation hashes exactly the note fields it reads, so an edit that
//! cannot change its output (e.g. a tag edit for tasks) keeps the cached
//! result.

use super::models::Note;
use sha2::{Digest, Sha256};

/// Fingerprint of everything task extraction reads: id, title, content.
///
/// Title is included because tasks carry a denormalized `note_title`.
pub fn hash_task_inputs(notes: &[Note]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"tasks:");
    for note in notes {
        update_field(&mut hasher, &note.id);
        update_field(&mut hasher, &note.title);
        update_field(&mut hasher, &note.content);
        hasher.update(b";");
    }
    hex::encode(hasher.finalize())
}

/// Fingerprint of everything graph derivation reads: id, title, content, tags.
///
/// Tags are hashed sorted since they are a set.
pub fn hash_graph_inputs(notes: &[Note]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"graph:");
    for note in notes {
        update_field(&mut hasher, &note.id);
        update_field(&mut hasher, &note.title);
        update_field(&mut hasher, &note.content);

        let mut tags: Vec<&str> = note.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags.dedup();
        hasher.update(b"[");
        for tag in tags {
            update_field(&mut hasher, tag);
        }
        hasher.update(b"];");
    }
    hex::encode(hasher.finalize())
}

/// Length-prefixed field so that ("ab", "c") and ("a", "bc") never collide
fn update_field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
