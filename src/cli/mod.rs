// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the postsearch command-line interface.
//!
//! Four subcommands: `build` to generate the search index from post sources,
//! `search` to query it through the same cache and ranking the browser uses,
//! `inspect` to summarize an index file, and `history` to show or clear past
//! queries. On-device state lives in one `store.json` under the state dir.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "postsearch",
    about = "Client-side blog search: index builder and query tool",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON config file overriding search defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the cache and search history
    ///
    /// Defaults to the platform data directory.
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search index from a directory of post files
    Build {
        /// Input directory containing manifest.json and post files
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the index JSON
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Search an index file and display ranked results
    Search {
        /// Path to the index JSON
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Do not record the query in search history
        #[arg(long)]
        no_history: bool,

        /// Ignore the cached collection and re-read the index file
        #[arg(long)]
        refresh: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize an index file
    Inspect {
        /// Path to the index JSON
        file: PathBuf,
    },

    /// Show or clear search history
    History {
        /// Remove all history entries
        #[arg(long)]
        clear: bool,
    },
}

/// Install the stderr log subscriber for the chosen verbosity.
pub fn init_logging(cli: &Cli) -> Result<(), String> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("failed to install logger: {}", e))
}
