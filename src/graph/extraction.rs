//! Notes → [`NoteGraph`] extraction.
//!
//! ## Two edge kinds
//!
//! - **Tag links**: one undirected link per unordered pair of distinct notes
//!   sharing at least one tag, however many tags they share
//! - **Explicit links**: one directed link per `(source, target)` pair where
//!   the source contains a `[[Title]]` resolving to the target; self links
//!   are skipped

use super::links::{extract_wiki_links, TitleIndex};
use super::models::{GraphConfig, GraphLink, GraphNode, NoteGraph};
use crate::notes::Note;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Build the note graph. Pure: identical notes and config give an identical
/// graph.
pub fn build_graph(notes: &[Note], config: &GraphConfig) -> NoteGraph {
    let nodes = build_nodes(notes, config);

    let mut links = Vec::new();
    if config.include_tag_links {
        links.extend(tag_links(notes));
    }
    if config.include_explicit_links {
        links.extend(explicit_links(notes));
    }

    let graph = NoteGraph::from_parts(nodes, links);
    debug!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        "Note graph built"
    );
    graph
}

/// One node per distinct note id, first occurrence wins
fn build_nodes(notes: &[Note], config: &GraphConfig) -> Vec<GraphNode> {
    let mut seen = HashSet::with_capacity(notes.len());
    notes
        .iter()
        .filter(|note| seen.insert(note.id.as_str()))
        .map(|note| GraphNode {
            id: note.id.clone(),
            title: note.title.clone(),
            radius: config.node_radius(note.content_chars()),
        })
        .collect()
}

/// Undirected links between notes sharing a tag.
///
/// Tags are visited in sorted order, so link order does not depend on
/// `HashMap` iteration.
pub fn tag_links(notes: &[Note]) -> Vec<GraphLink> {
    let mut by_tag: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for note in notes {
        for tag in &note.tags {
            let ids = by_tag.entry(tag.as_str()).or_default();
            if !ids.contains(&note.id.as_str()) {
                ids.push(note.id.as_str());
            }
        }
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut links = Vec::new();
    for ids in by_tag.values() {
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                if a == b {
                    continue;
                }
                let pair = if a <= b { (*a, *b) } else { (*b, *a) };
                if seen.insert(pair) {
                    links.push(GraphLink::tag(pair.0, pair.1));
                }
            }
        }
    }
    links
}

/// Directed links from `[[Title]]` references
pub fn explicit_links(notes: &[Note]) -> Vec<GraphLink> {
    let index = TitleIndex::build(notes);
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut links = Vec::new();

    for note in notes {
        for title in extract_wiki_links(&note.content) {
            let Some(target) = index.resolve(title) else {
                continue;
            };
            if target == note.id {
                continue;
            }
            if seen.insert((note.id.as_str(), target)) {
                links.push(GraphLink::explicit(&note.id, target));
            }
        }
    }
    links
}
