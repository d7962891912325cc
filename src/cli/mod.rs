//! CLI module for metaprompt - command-line interface and subcommands.
//!
//! Provides prompt execution plus store/load/list for templates.

pub mod commands;

pub use commands::Cli;
