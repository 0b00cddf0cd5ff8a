//! `userlist` - CLI for the name and email list
//!
//! This binary is the presentation layer: it collects entries, appends them
//! through the record store, and prints the refreshed list.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::process::ExitCode;

use clap::Parser;

use userlist::cli::{run, Cli};
use userlist::init_logging;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let exit = run(
        &cli,
        io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(exit.into())
}
