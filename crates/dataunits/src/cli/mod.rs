//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `order`: Print the execution order of a snapshot
//! - `validate`: Check a snapshot without ordering it
//! - `deps`: Show what a unit transitively depends on
//! - `dependents`: Show what must re-run when a unit changes
//! - `check-edge`: Check whether a new reference would close a cycle
//!
//! # Example
//!
//! ```bash
//! dataunits order units.json
//! dataunits dependents units.jsonl Accounts --depth 2
//! dataunits check-edge units.json --from Accounts --to Contacts
//! ```

mod args;
mod execute;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{validate_developer_name, CheckEdgeArgs, SnapshotArgs, TraverseArgs};

use crate::config::{DataUnitsConfig, CONFIG_FILE_NAME};
use crate::engine::Engine;
use crate::output::OutputConfig;

/// Dataunits - dependency ordering for Data Units
///
/// Validates filter references between Data Units, rejects circular
/// dependencies and prints the order in which the units can run.
#[derive(Parser, Debug)]
#[command(name = "dataunits")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to `dataunits.yaml` if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the execution order of a snapshot
    ///
    /// Every unit appears after all units its filters reference.
    Order(SnapshotArgs),

    /// Validate references and cycles without printing an order
    Validate(SnapshotArgs),

    /// Show the units a unit transitively depends on
    Deps(TraverseArgs),

    /// Show the units that must re-run when a unit changes
    Dependents(TraverseArgs),

    /// Check whether a new reference would create a circular dependency
    CheckEdge(CheckEdgeArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the verbosity level
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "dataunits=warn",
            1 => "dataunits=info",
            2 => "dataunits=debug",
            _ => "dataunits=trace",
        }
    }

    /// Execute the parsed command
    ///
    /// # Errors
    ///
    /// Configuration, snapshot and validation failures.
    pub async fn execute(&self) -> Result<()> {
        let config = match &self.config {
            Some(path) => DataUnitsConfig::load(path).await?,
            None => DataUnitsConfig::load_or_default(Path::new(CONFIG_FILE_NAME)).await?,
        };

        let engine = Engine::new(config.engine.clone());
        let output = OutputConfig::new(config.output.color);

        match &self.command {
            Commands::Order(args) => execute::order(&engine, args, self.json, output).await,
            Commands::Validate(args) => execute::validate(&engine, args, self.json, output).await,
            Commands::Deps(args) => execute::traverse(args, false, self.json, output).await,
            Commands::Dependents(args) => execute::traverse(args, true, self.json, output).await,
            Commands::CheckEdge(args) => execute::check_edge(args, self.json, output).await,
        }
    }
}
