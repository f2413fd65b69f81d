//! Link & graph resolver.
//!
//! Derives a node/link graph from the note collection for the graph view.
//!
//! ```text
//! notes ──► extraction ──► NoteGraph (nodes, links, petgraph::DiGraph)
//!              │                 │
//!            links          are_connected / neighbors / orphans
//! ```
//!
//! ## Modules
//!
//! - [`models`] — `GraphNode`, `GraphLink`, `LinkType`, `GraphConfig`, `NoteGraph`
//! - [`links`] — `[[wiki link]]` parsing, title resolution, backlinks
//! - [`extraction`] — notes → `NoteGraph`

pub mod extraction;
pub mod links;
pub mod models;

pub use extraction::{build_graph, explicit_links, tag_links};
pub use links::{backlinks, extract_wiki_links, unresolved_links, TitleIndex, UnresolvedLink};
pub use models::{GraphConfig, GraphLink, GraphNode, LinkType, NoteGraph};
