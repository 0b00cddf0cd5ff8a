//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::screen::ListFormat;

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Name to save
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Email to save
    #[arg(short, long, default_value = "")]
    pub email: String,

    /// Output format for the refreshed list
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format (defaults to `display.format` from the configuration)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// List format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One row per entry
    Plain,
    /// Aligned columns
    Table,
    /// JSON array
    Json,
}

impl From<FormatArg> for ListFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Self::Plain,
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(ListFormat::from(FormatArg::Plain), ListFormat::Plain);
        assert_eq!(ListFormat::from(FormatArg::Table), ListFormat::Table);
        assert_eq!(ListFormat::from(FormatArg::Json), ListFormat::Json);
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            format: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Ada"));
        assert!(debug_str.contains("a@x.com"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
