//! OmniNote CLI
//!
//! Inspect a notes file: grouped tasks, the note graph, links and tags, and
//! toggle a task in place.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use omninote::graph::{backlinks, build_graph, unresolved_links, LinkType};
use omninote::notes::{tag_counts, MemoryNoteStore, NoteManager};
use omninote::tasks::{extract_note_tasks, extract_tasks, group_tasks, toggle_task, TaskBucket};
use omninote::{load_notes_file, save_notes_file, Config};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "omninote")]
#[command(about = "Task extraction and note-linking engine")]
struct Cli {
    /// Path to the YAML config file (default: omninote.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks grouped by due date
    Tasks {
        /// Notes file (overrides config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Reference date, YYYY-MM-DD (default: local today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the note graph
    Graph {
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Toggle the task on a given line of a note and save the file
    Toggle {
        /// Note id
        #[arg(long)]
        note: String,

        /// Zero-based line index of the task
        #[arg(long)]
        line: usize,

        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show backlinks and unresolved links of a note
    Links {
        #[arg(long)]
        note: String,

        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show tag usage counts
    Tags {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,omninote=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Tasks { file, today, json } => run_tasks(notes_path(&config, file), today, json),
        Commands::Graph { file, json } => run_graph(&config, notes_path(&config, file), json),
        Commands::Toggle { note, line, file } => {
            run_toggle(&config, notes_path(&config, file), &note, line)
        }
        Commands::Links { note, file } => run_links(notes_path(&config, file), &note),
        Commands::Tags { file } => run_tags(notes_path(&config, file)),
    }
}

fn notes_path(config: &Config, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| config.notes_file.clone())
}

fn run_tasks(path: PathBuf, today: Option<NaiveDate>, json: bool) -> Result<()> {
    let notes = load_notes_file(&path)?;
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let grouped = group_tasks(&extract_tasks(&notes), today);

    if json {
        println!("{}", serde_json::to_string_pretty(&grouped)?);
        return Ok(());
    }

    for bucket in TaskBucket::ALL {
        let tasks = grouped.bucket(bucket);
        if tasks.is_empty() {
            continue;
        }
        println!("{} ({})", bucket_label(bucket), tasks.len());
        for task in tasks {
            let mark = if task.done { "x" } else { " " };
            match task.due_date {
                Some(due) => println!("  [{}] {}  @{}  ({})", mark, task.text, due, task.note_title),
                None => println!("  [{}] {}  ({})", mark, task.text, task.note_title),
            }
        }
    }

    tracing::info!(
        "{} open tasks across {} notes",
        grouped.open_count(),
        notes.len()
    );
    Ok(())
}

fn bucket_label(bucket: TaskBucket) -> &'static str {
    match bucket {
        TaskBucket::Overdue => "Overdue",
        TaskBucket::Today => "Today",
        TaskBucket::Upcoming => "Upcoming",
        TaskBucket::NoDate => "No date",
        TaskBucket::Completed => "Completed",
    }
}

fn run_graph(config: &Config, path: PathBuf, json: bool) -> Result<()> {
    let notes = load_notes_file(&path)?;
    let graph = build_graph(&notes, &config.graph);

    if json {
        let out = serde_json::json!({
            "nodes": graph.nodes,
            "links": graph.links,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for node in &graph.nodes {
        println!("{} ({}) r={}", node.title, node.id, node.radius);
    }
    for link in &graph.links {
        let arrow = match link.link_type {
            LinkType::Tag => "<->",
            LinkType::Explicit => "->",
        };
        println!("  {} {} {}", link.source, arrow, link.target);
    }

    tracing::info!(
        "{} nodes, {} links, {} orphans",
        graph.node_count(),
        graph.link_count(),
        graph.orphans().len()
    );
    Ok(())
}

fn run_toggle(config: &Config, path: PathBuf, note_id: &str, line: usize) -> Result<()> {
    let notes = load_notes_file(&path)?;
    let manager = NoteManager::new(Arc::new(MemoryNoteStore::with_notes(notes)))
        .with_lifecycle(config.lifecycle());

    let note = manager
        .get_note(note_id)
        .with_context(|| format!("Note not found: {}", note_id))?;
    let Some(task) = extract_note_tasks(&note)
        .into_iter()
        .find(|t| t.line_index == line)
    else {
        bail!("No task on line {} of note {}", line, note_id);
    };

    let outcome = toggle_task(&manager, &task)?;
    if !outcome.is_toggled() {
        bail!("Task could not be toggled: {:?}", outcome);
    }

    save_notes_file(&path, &manager.notes())?;
    tracing::info!("Toggled {:?} in {}", task.text, path.display());
    Ok(())
}

fn run_links(path: PathBuf, note_id: &str) -> Result<()> {
    let notes = load_notes_file(&path)?;
    if !notes.iter().any(|n| n.id == note_id) {
        bail!("Note not found: {}", note_id);
    }

    println!("Backlinks:");
    for id in backlinks(&notes, note_id) {
        let title = notes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.title.as_str())
            .unwrap_or_default();
        println!("  {} ({})", title, id);
    }

    println!("Unresolved:");
    for link in unresolved_links(&notes)
        .into_iter()
        .filter(|l| l.note_id == note_id)
    {
        println!("  [[{}]]", link.title);
    }
    Ok(())
}

fn run_tags(path: PathBuf) -> Result<()> {
    let notes = load_notes_file(&path)?;
    for (tag, count) in tag_counts(&notes) {
        println!("{:>4}  {}", count, tag);
    }
    Ok(())
}
