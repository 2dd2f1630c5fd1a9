//! Pathwise CLI - learning paths from the command line.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pathwise")]
#[command(author, version, about = "Pathwise - prerequisite-aware learning paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to pathwise.toml (default: search current and parent directories)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default pathwise.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing pathwise.toml
        #[arg(long)]
        force: bool,
    },

    /// Build a learning path between two topics
    Path {
        /// Topic already known
        known: String,

        /// Topic to reach
        goal: String,

        /// Preferred resource type: any, video, article
        #[arg(short = 't', long = "type", default_value = "any")]
        preferred_type: String,

        /// Difficulty: any, easy, medium, hard
        #[arg(short, long, default_value = "any")]
        difficulty: String,

        /// Maximum resource length in minutes
        #[arg(short, long)]
        max_length: Option<i64>,

        /// Resources per topic (overrides ranking.top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// List topics, or the goals reachable from a known topic
    Topics {
        /// Only topics reachable from this one
        #[arg(long)]
        known: Option<String>,
    },

    /// Semantic search over the whole catalog
    Search {
        /// Search query
        query: String,

        /// Maximum results to return
        #[arg(short = 'k', long, default_value = "20")]
        top_k: usize,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Summarize the catalog and scoring setup
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Path {
            known,
            goal,
            preferred_type,
            difficulty,
            max_length,
            top_k,
            json,
        } => {
            let prefs = commands::path::preferences(&preferred_type, &difficulty, max_length);
            commands::path::run(config, &known, &goal, &prefs, top_k, json)
        }
        Commands::Topics { known } => commands::topics::run(config, known.as_deref()),
        Commands::Search { query, top_k, json } => {
            commands::search::run(config, &query, top_k, json)
        }
        Commands::Inspect => commands::inspect::run(config),
    }
}
