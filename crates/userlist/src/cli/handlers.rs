//! Command dispatch for the `userlist` binary.
//!
//! Configuration is loaded per command. `config path` and `config validate`
//! never depend on it, so they keep working when the configuration is broken.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use super::{AddCommand, Cli, Command, ConfigCommand, ListCommand};
use crate::config::Config;
use crate::screen::{ListFormat, Screen, Submit};
use crate::storage::SqlitePrefs;
use crate::store::RecordStore;

/// Process outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The command did what was asked.
    Success,
    /// The command ran but reported a failure on stderr.
    Failure,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => Self::SUCCESS,
            Exit::Failure => Self::FAILURE,
        }
    }
}

/// Run a parsed command line.
///
/// The list and reports go to `out`, notices go to `err`, and `form` reads
/// its entries from `input`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded for a command that
/// needs it, or if the store or an output stream fails.
pub fn run<R: BufRead, W: Write, E: Write>(
    cli: &Cli,
    input: R,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<Exit> {
    match &cli.command {
        Command::Config(ConfigCommand::Path) => {
            writeln!(out, "{}", config_path(cli).display())?;
            Ok(Exit::Success)
        }
        Command::Config(ConfigCommand::Validate { file }) => {
            let path = file.clone().unwrap_or_else(|| config_path(cli));
            handle_validate(path, out, err)
        }
        Command::Config(ConfigCommand::Show { json }) => {
            handle_show(&load_config(cli)?, *json, out)?;
            Ok(Exit::Success)
        }
        Command::Add(add_cmd) => handle_add(&load_config(cli)?, add_cmd, out, err),
        Command::List(list_cmd) => handle_list(&load_config(cli)?, list_cmd, out, err),
        Command::Form => handle_form(&load_config(cli)?, input, out),
        Command::Status(status_cmd) => handle_status(&load_config(cli)?, status_cmd.json, out),
    }
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_config_path)
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    Config::load_from(cli.config.clone()).context("loading configuration")
}

fn open_store(config: &Config) -> anyhow::Result<RecordStore<SqlitePrefs>> {
    let path = config.database_path();
    let prefs = SqlitePrefs::open(&path, &config.storage.namespace)
        .with_context(|| format!("opening preferences at {}", path.display()))?
        .with_max_value_bytes(config.storage.max_value_bytes);
    Ok(RecordStore::new(prefs))
}

fn open_screen(
    config: &Config,
    format: Option<ListFormat>,
) -> anyhow::Result<Screen<SqlitePrefs>> {
    let format = format.unwrap_or(config.display.format);
    Ok(Screen::new(open_store(config)?, format))
}

fn handle_add<W: Write, E: Write>(
    config: &Config,
    cmd: &AddCommand,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<Exit> {
    let mut screen = open_screen(config, cmd.format.map(Into::into))?;

    match screen.submit(&cmd.name, &cmd.email)? {
        Submit::Accepted(rendered) => writeln!(out, "{rendered}")?,
        Submit::Ignored => {
            writeln!(
                err,
                "Both --name and --email are required; nothing was saved."
            )?;
        }
    }
    Ok(Exit::Success)
}

fn handle_list<W: Write, E: Write>(
    config: &Config,
    cmd: &ListCommand,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<Exit> {
    let screen = open_screen(config, cmd.format.map(Into::into))?;
    let rendered = screen.render()?;
    if rendered.is_empty() {
        writeln!(err, "No entries yet.")?;
    } else {
        writeln!(out, "{rendered}")?;
    }
    Ok(Exit::Success)
}

fn handle_form<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    out: &mut W,
) -> anyhow::Result<Exit> {
    let mut screen = open_screen(config, None)?;
    let accepted = screen.run_form(input, &mut *out)?;
    writeln!(out, "Saved {accepted} new entries.")?;
    Ok(Exit::Success)
}

fn handle_status<W: Write>(config: &Config, json: bool, out: &mut W) -> anyhow::Result<Exit> {
    let store = open_store(config)?;
    let keys = store.backend().keys()?;
    let count = store.len();

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "namespace": config.storage.namespace,
            "keys": keys,
            "record_count": count.as_ref().ok(),
            "error": count.as_ref().err().map(ToString::to_string),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?;
    } else {
        writeln!(out, "userlist status")?;
        writeln!(out, "---------------")?;
        writeln!(out, "Database:      {}", config.database_path().display())?;
        writeln!(out, "Namespace:     {}", config.storage.namespace)?;
        writeln!(out, "Keys:          {}", keys.join(", "))?;
        match count {
            Ok(n) => writeln!(out, "Records:       {n}")?,
            Err(e) => writeln!(out, "Records:       unreadable ({e})")?,
        }
    }
    Ok(Exit::Success)
}

fn handle_show<W: Write>(config: &Config, json: bool, out: &mut W) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    } else {
        writeln!(out, "Current Configuration")?;
        writeln!(out, "=====================")?;
        writeln!(out)?;
        writeln!(out, "[Storage]")?;
        writeln!(
            out,
            "  Database path:      {}",
            config.database_path().display()
        )?;
        writeln!(out, "  Namespace:          {}", config.storage.namespace)?;
        writeln!(out, "  Max value bytes:    {}", config.storage.max_value_bytes)?;
        writeln!(out)?;
        writeln!(out, "[Display]")?;
        writeln!(out, "  Format:             {:?}", config.display.format)?;
    }
    Ok(())
}

fn handle_validate<W: Write, E: Write>(
    path: PathBuf,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<Exit> {
    writeln!(out, "Validating configuration: {}", path.display())?;
    match Config::load_from(Some(path)) {
        Ok(_) => {
            writeln!(out, "Configuration is valid.")?;
            Ok(Exit::Success)
        }
        Err(e) => {
            writeln!(err, "Configuration error: {e}")?;
            Ok(Exit::Failure)
        }
    }
}
