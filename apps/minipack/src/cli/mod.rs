//! CLI command handling for minipack

mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use minipack_analysis_cycles::find_cycles;
use minipack_config::{logging, PackConfig};
use minipack_foundation::ModuleGraph;
use minipack_graph::Bundler;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "minipack")]
#[command(about = "Builds the module dependency graph of a JavaScript or TypeScript program")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to minipack.toml or .minipack/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the module graph and print it
    Build {
        /// Entry module; the configured entry when omitted
        entry: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Load modules on a thread pool
        #[arg(long)]
        parallel: bool,
    },
    /// Build the module graph and report circular imports as JSON
    Cycles {
        /// Entry module; the configured entry when omitted
        entry: Option<PathBuf>,

        /// Smallest cycle to report; 1 includes self-imports
        #[arg(long, default_value = "2")]
        min_size: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{ "<module>": { id, code, dependencies, mapping } }`
    Json,
    /// One line per module followed by its resolved imports
    Summary,
}

/// Main CLI entry point
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PackConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Commands::Build { parallel: true, .. } = cli.command {
        config.build.parallel = true;
    }
    logging::initialize(&config.logging);
    debug!(config = ?config, "Configuration loaded");

    match cli.command {
        Commands::Build { entry, format, .. } => {
            let graph = build_graph(config, entry.as_deref())?;
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&graph)
                    .context("Failed to serialize module graph")?,
                OutputFormat::Summary => output::summary(&graph),
            };
            println!("{}", rendered);
        }
        Commands::Cycles { entry, min_size } => {
            let graph = build_graph(config, entry.as_deref())?;
            let result = find_cycles(&graph, Some(min_size))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&result).context("Failed to serialize cycle report")?
            );
        }
    }

    Ok(())
}

fn build_graph(config: PackConfig, entry: Option<&Path>) -> Result<ModuleGraph> {
    let bundler = Bundler::new(config)?;
    let graph = bundler.build(entry)?;
    Ok(graph)
}
