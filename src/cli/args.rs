//! Defines the command-line arguments and subcommands for the uastify CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "uastify",
    version,
    about = "Normalizes native language ASTs into a role-annotated universal AST."
)]
pub struct UastifyArgs {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize one JSON-dumped native AST and print the UAST as JSON.
    Parse {
        /// The native AST file to normalize.
        #[arg(required = true)]
        file: PathBuf,
        /// Driver to use; defaults to the manifest's language, else python.
        #[arg(short, long)]
        language: Option<String>,
        /// Load an extra driver from a YAML or JSON manifest and use it.
        #[arg(short, long)]
        driver: Option<PathBuf>,
        /// Print the UAST on one line.
        #[arg(long)]
        compact: bool,
        /// Print an indented outline instead of JSON.
        #[arg(long, conflicts_with = "compact")]
        outline: bool,
    },
    /// Normalize every file under the given paths, one at a time, with timings.
    Bench {
        /// Driver to use.
        #[arg(required = true)]
        language: String,
        /// Files or directories (walked recursively).
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List the role vocabulary.
    Roles,
    /// Print a driver's builder configuration as YAML.
    Config {
        #[arg(short, long, default_value = "python")]
        language: String,
    },
}
