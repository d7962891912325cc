//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: execute a prompt against the model
//! - store: save a YAML/JSON document as a template
//! - load: print a template
//! - list: list stored templates

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// metaprompt - run prompts and manage prompt templates
#[derive(Parser, Debug)]
#[command(name = "metaprompt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the log file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a prompt to the model and print the response
    Run {
        /// Prompt text
        prompt: String,

        /// Model to use instead of the configured default
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Store a YAML or JSON document as a named template
    Store {
        /// Template name
        name: String,

        /// Read the document from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Template directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Print a stored template as YAML
    Load {
        /// Template name
        name: String,

        /// Template directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// List stored templates
    List {
        /// Template directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}
