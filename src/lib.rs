//! OmniNote engine
//!
//! The derived-data core of the OmniNote note-taking app:
//! - Task extraction from `- [ ]` / `- [x]` checkbox lines with optional
//!   `@{YYYY-MM-DD}` due dates, grouped into due-date buckets
//! - Task toggling written back into the owning note
//! - A note graph from shared tags and `[[Wiki Links]]`
//! - Note collection management with bounded version history

pub mod derived;
pub mod events;
pub mod graph;
pub mod notes;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use graph::GraphConfig;
use notes::{export_notes, parse_import, Note, NoteLifecycle, DEFAULT_HISTORY_LIMIT};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub history: HistoryYamlConfig,
    pub graph: GraphConfig,
    pub notes: NotesYamlConfig,
}

/// Version history section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryYamlConfig {
    pub max_entries: usize,
}

impl Default for HistoryYamlConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Notes storage section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotesYamlConfig {
    pub file: String,
}

impl Default for NotesYamlConfig {
    fn default() -> Self {
        Self {
            file: "notes.json".into(),
        }
    }
}

// ============================================================================
// Resolved config
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of history snapshots kept per note
    pub history_limit: usize,
    pub graph: GraphConfig,
    /// JSON file holding the note collection (export format)
    pub notes_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "omninote.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        // 1. Load YAML config (or defaults if file not found)
        let yaml = Self::load_yaml(yaml_path);

        // 2. Apply env var overrides
        let mut graph = yaml.graph;
        graph.base_radius = env_parse("OMNINOTE_GRAPH_BASE_RADIUS").unwrap_or(graph.base_radius);
        graph.max_steps = env_parse("OMNINOTE_GRAPH_MAX_STEPS").unwrap_or(graph.max_steps);
        graph.chars_per_step =
            env_parse("OMNINOTE_GRAPH_CHARS_PER_STEP").unwrap_or(graph.chars_per_step);

        Ok(Self {
            history_limit: env_parse("OMNINOTE_HISTORY_LIMIT").unwrap_or(yaml.history.max_entries),
            graph,
            notes_file: std::env::var("OMNINOTE_NOTES_FILE")
                .unwrap_or(yaml.notes.file)
                .into(),
        })
    }

    /// Note lifecycle honoring the configured history limit
    pub fn lifecycle(&self) -> NoteLifecycle {
        NoteLifecycle::with_history_limit(self.history_limit)
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("omninote.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// Parse an env var, ignoring (with a warning) values that do not parse.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", name, raw);
            None
        }
    }
}

// ============================================================================
// Notes file
// ============================================================================

/// Read a notes file in the import format (envelope or bare array).
pub fn load_notes_file(path: &Path) -> Result<Vec<Note>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read notes file {}", path.display()))?;
    let notes = parse_import(&json)
        .with_context(|| format!("Failed to parse notes file {}", path.display()))?;
    tracing::debug!(count = notes.len(), "Loaded notes from {}", path.display());
    Ok(notes)
}

/// Write notes in the export format, replacing the file.
pub fn save_notes_file(path: &Path, notes: &[Note]) -> Result<()> {
    let json = export_notes(notes)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write notes file {}", path.display()))?;
    tracing::debug!(count = notes.len(), "Saved notes to {}", path.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
