//! Note graph data models.
//!
//! ## Output types
//! - [`GraphNode`] — one node per note, sized by content length
//! - [`GraphLink`] — typed edge (`tag` or `explicit`)
//! - [`NoteGraph`] — petgraph wrapper with ID ↔ NodeIndex mapping and the
//!   adjacency set behind [`NoteGraph::are_connected`]
//!
//! ## Configuration
//! - [`GraphConfig`] — node sizing and which edge kinds to derive

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Nodes and links
// ============================================================================

/// Kind of relationship between two notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Both notes carry a common tag (undirected)
    Tag,
    /// The source note contains a `[[link]]` to the target (directed)
    Explicit,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag => write!(f, "tag"),
            Self::Explicit => write!(f, "explicit"),
        }
    }
}

/// A note as seen by the graph view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Note id
    pub id: String,
    pub title: String,
    /// Visual weight, a step function of content length
    pub radius: f64,
}

/// An edge of the note graph.
///
/// Tag links are stored with `source < target` so the same pair always
/// yields the same link regardless of input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

impl GraphLink {
    /// Undirected tag link between `a` and `b`
    pub fn tag(a: &str, b: &str) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        Self {
            source: source.to_string(),
            target: target.to_string(),
            link_type: LinkType::Tag,
        }
    }

    /// Directed wiki link `source -> target`
    pub fn explicit(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            link_type: LinkType::Explicit,
        }
    }

    /// Deduplication key: `a-b` (sorted) for tag links, `source->target` for
    /// explicit links
    pub fn key(&self) -> String {
        match self.link_type {
            LinkType::Tag => format!("{}-{}", self.source, self.target),
            LinkType::Explicit => format!("{}->{}", self.source, self.target),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Tuning parameters for graph derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Radius of a note with empty content
    pub base_radius: f64,
    /// Radius added per step
    pub radius_step: f64,
    /// Characters of content per step
    pub chars_per_step: usize,
    /// Maximum number of steps
    pub max_steps: usize,
    /// Derive edges from shared tags
    pub include_tag_links: bool,
    /// Derive edges from `[[wiki links]]`
    pub include_explicit_links: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_radius: 4.0,
            radius_step: 1.0,
            chars_per_step: 200,
            max_steps: 8,
            include_tag_links: true,
            include_explicit_links: true,
        }
    }
}

impl GraphConfig {
    /// Node radius for a content length (in chars). Non-decreasing and capped
    /// at `base_radius + radius_step * max_steps`.
    pub fn node_radius(&self, content_chars: usize) -> f64 {
        let steps = content_chars
            .checked_div(self.chars_per_step)
            .unwrap_or(0)
            .min(self.max_steps);
        self.base_radius + self.radius_step * steps as f64
    }
}

// ============================================================================
// NoteGraph
// ============================================================================

/// Derived graph over the note collection.
///
/// Holds the public `nodes`/`links` lists for the presentation layer, a
/// `DiGraph` for neighborhood queries, and a set of connected index pairs so
/// that [`NoteGraph::are_connected`] is O(1).
#[derive(Debug, Clone, Default)]
pub struct NoteGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    graph: DiGraph<String, LinkType>,
    id_to_index: HashMap<String, NodeIndex>,
    connected: HashSet<(NodeIndex, NodeIndex)>,
}

impl NoteGraph {
    /// Assemble a graph from deduplicated nodes and links.
    ///
    /// Links whose endpoints are not nodes are dropped.
    pub fn from_parts(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), links.len());
        let mut id_to_index = HashMap::with_capacity(nodes.len());
        for node in &nodes {
            if !id_to_index.contains_key(&node.id) {
                let idx = graph.add_node(node.id.clone());
                id_to_index.insert(node.id.clone(), idx);
            }
        }

        let mut connected = HashSet::with_capacity(links.len() * 2);
        let mut kept = Vec::with_capacity(links.len());
        for link in links {
            let (Some(&from), Some(&to)) =
                (id_to_index.get(&link.source), id_to_index.get(&link.target))
            else {
                continue;
            };
            graph.add_edge(from, to, link.link_type);
            connected.insert((from, to));
            if link.link_type == LinkType::Tag {
                connected.insert((to, from));
            }
            kept.push(link);
        }

        Self {
            nodes,
            links: kept,
            graph,
            id_to_index,
            connected,
        }
    }

    /// Adjacency predicate used for hover highlighting.
    ///
    /// True when `a == b`, when a tag link joins them, or when an explicit
    /// link `a -> b` exists.
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (self.id_to_index.get(a), self.id_to_index.get(b)) {
            (Some(&ia), Some(&ib)) => self.connected.contains(&(ia, ib)),
            _ => false,
        }
    }

    /// Ids `x` with `are_connected(id, x)`, excluding `id` itself, sorted.
    pub fn neighbors(&self, id: &str) -> Vec<String> {
        let Some(&idx) = self.id_to_index.get(id) else {
            return vec![];
        };

        let outgoing = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target());
        let incoming_tags = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .filter(|e| *e.weight() == LinkType::Tag)
            .map(|e| e.source());

        let mut out: Vec<String> = outgoing
            .chain(incoming_tags)
            .filter(|n| *n != idx)
            .map(|n| self.graph[n].clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Nodes with no incident link of any kind
    pub fn orphans(&self) -> Vec<&GraphNode> {
        self.nodes
            .iter()
            .filter(|node| match self.id_to_index.get(&node.id) {
                Some(&idx) => self.graph.neighbors_undirected(idx).next().is_none(),
                None => true,
            })
            .collect()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Links of one kind
    pub fn links_of(&self, link_type: LinkType) -> impl Iterator<Item = &GraphLink> {
        self.links.iter().filter(move |l| l.link_type == link_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            title: id.to_uppercase(),
            radius: 4.0,
        }
    }

    #[test]
    fn test_tag_link_is_order_independent() {
        assert_eq!(GraphLink::tag("b", "a"), GraphLink::tag("a", "b"));
        assert_eq!(GraphLink::tag("b", "a").key(), "a-b");
        assert_eq!(GraphLink::explicit("b", "a").key(), "b->a");
    }

    #[test]
    fn test_link_serializes_type_field() {
        let json = serde_json::to_value(GraphLink::explicit("a", "b")).unwrap();
        assert_eq!(json["type"], "explicit");
    }

    #[test]
    fn test_node_radius_steps_and_cap() {
        let config = GraphConfig::default();
        assert_eq!(config.node_radius(0), 4.0);
        assert_eq!(config.node_radius(199), 4.0);
        assert_eq!(config.node_radius(200), 5.0);
        assert_eq!(config.node_radius(1_000), 9.0);
        assert_eq!(config.node_radius(1_000_000), 12.0);

        let mut previous = 0.0;
        for chars in (0..3_000).step_by(37) {
            let r = config.node_radius(chars);
            assert!(r >= previous);
            previous = r;
        }
    }

    #[test]
    fn test_node_radius_zero_step_size() {
        let config = GraphConfig {
            chars_per_step: 0,
            ..Default::default()
        };
        assert_eq!(config.node_radius(5_000), config.base_radius);
    }

    #[test]
    fn test_are_connected_semantics() {
        let graph = NoteGraph::from_parts(
            vec![node("a"), node("b"), node("c")],
            vec![GraphLink::tag("a", "b"), GraphLink::explicit("b", "c")],
        );

        assert!(graph.are_connected("a", "b"));
        assert!(graph.are_connected("b", "a"));
        assert!(graph.are_connected("b", "c"));
        assert!(!graph.are_connected("c", "b"));
        assert!(!graph.are_connected("a", "c"));
        assert!(graph.are_connected("c", "c"));
        assert!(graph.are_connected("ghost", "ghost"));
        assert!(!graph.are_connected("ghost", "a"));
    }

    #[test]
    fn test_neighbors_and_orphans() {
        let graph = NoteGraph::from_parts(
            vec![node("a"), node("b"), node("c"), node("d")],
            vec![GraphLink::tag("a", "b"), GraphLink::explicit("c", "a")],
        );

        assert_eq!(graph.neighbors("a"), vec!["b".to_string()]);
        assert_eq!(graph.neighbors("b"), vec!["a".to_string()]);
        assert_eq!(graph.neighbors("c"), vec!["a".to_string()]);
        assert!(graph.neighbors("missing").is_empty());

        let orphans: Vec<_> = graph.orphans().into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(orphans, vec!["d"]);
    }

    #[test]
    fn test_dangling_links_dropped() {
        let graph = NoteGraph::from_parts(vec![node("a")], vec![GraphLink::explicit("a", "z")]);
        assert_eq!(graph.link_count(), 0);
    }
}
