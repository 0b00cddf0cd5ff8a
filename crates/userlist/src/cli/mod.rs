//! Command-line interface for userlist.
//!
//! This module provides the CLI structure and command dispatch for the
//! `userlist` binary.

mod commands;
mod handlers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AddCommand, ConfigCommand, FormatArg, ListCommand, StatusCommand};
pub use handlers::{run, Exit};

/// userlist - Keep a local list of names and emails
///
/// Entries are appended to a list stored in a private preferences database
/// and the full list is shown again after every change.
#[derive(Debug, Parser)]
#[command(name = "userlist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a name and email, then show the list
    Add(AddCommand),

    /// Show all saved entries
    List(ListCommand),

    /// Enter names and emails interactively
    Form,

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
