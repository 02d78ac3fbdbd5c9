//! # Context Chunker CLI (`ctxc`)
//!
//! Chunks text for embedding pipelines.
//!
//! ## Usage
//!
//! ```bash
//! ctxc --config ./config/ctxc.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ctxc chunk <path>` | Chunk one file (or `-` for stdin) and print the chunks |
//! | `ctxc ingest` | Chunk every text file under the filesystem connector root into JSON Lines |
//! | `ctxc config` | Print the effective configuration |
//!
//! ## Examples
//!
//! ```bash
//! # Chunk a file with explicit sizes
//! ctxc chunk notes.md --chunk-size 200 --overlap-size 40
//!
//! # Chunk stdin as JSON Lines
//! cat notes.md | ctxc chunk - --format json
//!
//! # Ingest a docs directory into a JSONL file
//! ctxc ingest --config ./config/ctxc.toml --output chunks.jsonl
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use context_chunker::chunk_cmd::{self, OutputFormat};
use context_chunker::config;
use context_chunker::ingest::{self, IngestOptions};

/// Context Chunker CLI — overlapping, whitespace-snapped text chunks for
/// embedding pipelines.
#[derive(Parser)]
#[command(
    name = "ctxc",
    about = "Context Chunker — overlapping, whitespace-snapped text chunks for embedding pipelines",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/ctxc.toml`. `chunk` and `config` fall back to
    /// built-in defaults when the file does not exist.
    #[arg(long, global = true, default_value = "./config/ctxc.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Chunk a single file and print its chunks.
    Chunk {
        /// File to chunk, or `-` for stdin.
        #[arg(default_value = "-")]
        path: PathBuf,

        /// Target chunk size in characters (overrides `[chunking].chunk_size`).
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Overlap between consecutive chunks in characters
        /// (overrides `[chunking].overlap_size`).
        #[arg(long)]
        overlap_size: Option<usize>,

        /// Output format: `text` or `json` (one record per line).
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Chunk every text file under the filesystem connector root.
    ///
    /// Writes one JSON chunk record per line. A summary is printed to stderr.
    Ingest {
        /// Show file and chunk counts without writing records.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of files to process.
        #[arg(long)]
        limit: Option<usize>,

        /// Only process files modified on or after this date (YYYY-MM-DD).
        #[arg(long)]
        since: Option<String>,

        /// Write records to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chunk {
            path,
            chunk_size,
            overlap_size,
            format,
        } => {
            let cfg = config::load_or_default(&cli.config)?;
            chunk_cmd::run_chunk(&cfg, &path, chunk_size, overlap_size, format)?;
        }
        Commands::Ingest {
            dry_run,
            limit,
            since,
            output,
        } => {
            let cfg = config::load_config(&cli.config)?;
            let options = IngestOptions {
                dry_run,
                limit,
                since,
                output,
            };
            ingest::run_ingest(&cfg, &options)?;
        }
        Commands::Config => {
            let cfg = config::load_or_default(&cli.config)?;
            print!("{}", cfg.to_toml()?);
        }
    }

    Ok(())
}
