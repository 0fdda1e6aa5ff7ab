//! record-lint CLI tool.
//!
//! Usage:
//! ```bash
//! record-lint check [OPTIONS] [PATTERNS]...
//! record-lint list-rules
//! record-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Lints equality comparisons of records with collection-typed properties
#[derive(Parser)]
#[command(name = "record-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks against scenario files
    Check {
        /// Scenario files or glob patterns (default: from configuration)
        patterns: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Severity threshold for a failing exit (info, warning, error)
        #[arg(long, value_name = "SEVERITY")]
        fail_on: Option<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file and a sample scenario
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-diagnostic compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check {
            patterns,
            format,
            rules,
            exclude,
            fail_on,
        } => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            commands::check::run(&patterns, format, rules, exclude, fail_on, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
