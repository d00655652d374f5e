//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nicediary")]
#[command(about = "Write, browse and export a personal diary", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new diary
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Write the entry for a date (opens the editor unless --text is given)
    Write {
        /// Date (e.g., today, yesterday, last monday, 2024-01-05)
        #[arg(default_value = "today")]
        date: String,

        /// Entry text; blank text deletes the entry
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Print the entry for a date
    Show {
        #[arg(default_value = "today")]
        date: String,
    },

    /// Delete the entry for a date
    Delete { date: String },

    /// List entries, most recent first
    List {
        /// Only entries containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a month calendar
    Calendar {
        /// Month to display (YYYY-MM); defaults to the month of --date
        #[arg(short, long)]
        month: Option<String>,

        /// Date to highlight as selected
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Export entries to a file
    Export {
        /// Export every entry
        #[arg(short, long, conflicts_with = "dates")]
        all: bool,

        /// Entry to include (repeatable)
        #[arg(short, long = "date", value_name = "DATE")]
        dates: Vec<String>,

        /// txt, md, html or json (default: configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Base file name (default: configured name)
        #[arg(short, long)]
        name: Option<String>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_dates() {
        let cli = Cli::parse_from([
            "nicediary", "export", "-d", "2024-01-01", "--date", "yesterday", "-f", "md",
        ]);
        match cli.command {
            Some(Commands::Export { all, dates, format, .. }) => {
                assert!(!all);
                assert_eq!(dates, vec!["2024-01-01", "yesterday"]);
                assert_eq!(format.as_deref(), Some("md"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_all_conflicts_with_dates() {
        let result = Cli::try_parse_from(["nicediary", "export", "--all", "-d", "2024-01-01"]);
        assert!(result.is_err());
    }
}
