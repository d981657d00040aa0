//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod crawl;
mod lookup;
mod merge;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Product catalog harvester and rating table merger")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ./harvest.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Runs `crawl` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the catalog and write one row per product
    Crawl {
        /// Output CSV (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Listing page cap (overrides config)
        #[arg(long)]
        max_pages: Option<u32>,
        /// Concurrent detail-page renders (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Fetch pages over plain HTTP instead of a browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Merge two rating tables keyed by platform name
    Merge {
        /// First source CSV (overrides config)
        #[arg(long)]
        source_a: Option<PathBuf>,
        /// Second source CSV (overrides config)
        #[arg(long)]
        source_b: Option<PathBuf>,
        /// Output CSV (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find a platform by name in a table and print it as JSON
    Lookup {
        /// Platform name (case-insensitive)
        name: String,
        /// Table to search (defaults to the merge output)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).await?;

    match cli.command.unwrap_or(Commands::Crawl {
        output: None,
        max_pages: None,
        workers: None,
        no_browser: false,
    }) {
        Commands::Crawl {
            output,
            max_pages,
            workers,
            no_browser,
        } => {
            if let Some(output) = output {
                settings.catalog.output = output;
            }
            if let Some(max_pages) = max_pages {
                settings.catalog.max_pages = max_pages;
            }
            if let Some(workers) = workers {
                settings.catalog.workers = workers;
            }
            if no_browser {
                settings.browser.enabled = false;
            }
            crawl::cmd_crawl(&settings).await
        }
        Commands::Merge {
            source_a,
            source_b,
            output,
        } => {
            if let Some(path) = source_a {
                settings.merge.source_a = path;
            }
            if let Some(path) = source_b {
                settings.merge.source_b = path;
            }
            if let Some(path) = output {
                settings.merge.output = path;
            }
            merge::cmd_merge(&settings.merge).await
        }
        Commands::Lookup { name, file } => {
            let file = file.unwrap_or_else(|| settings.merge.output.clone());
            lookup::cmd_lookup(&settings.merge, &file, &name).await
        }
    }
}
