use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::state::Settings;

/// Shopping List: turn weekly meal-plan sheets into one grouped shopping list.
#[derive(Parser, Debug)]
#[command(name = "shopping_list")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the settings JSON file.
    #[arg(short, long, default_value = "shopping_list_cfg.json")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the shopping list from the configured plan sheets.
    Build(BuildArgs),

    /// Write a default settings file if none exists.
    Init,

    /// Manage names you already have and don't need to buy.
    Have {
        #[command(subcommand)]
        action: HaveAction,
    },

    /// Manage the plan sheets read for each run.
    Sheets {
        #[command(subcommand)]
        action: SheetAction,
    },
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// First day of the week window (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Directory holding the sheet CSV workbooks.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory to write the list into.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// File name of the list (".txt" is added).
    #[arg(long)]
    pub filename: Option<String>,

    /// Run in the foreground even if threaded is enabled.
    #[arg(long)]
    pub foreground: bool,

    /// Pick items you already have once the list is built.
    #[arg(long)]
    pub review: bool,

    /// Keep --data-dir, --output-dir and --filename in the settings file.
    #[arg(long)]
    pub save: bool,
}

impl BuildArgs {
    /// Copy the path overrides given on the command line onto `settings`.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(name) = &self.filename {
            settings.filename = name.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum HaveAction {
    /// Show all names and whether they are enabled.
    List,

    /// Add an enabled name.
    Add { name: String },

    /// Remove a name.
    Remove { name: String },

    /// Enable or disable a name.
    Toggle { name: String },
}

#[derive(Subcommand, Debug)]
pub enum SheetAction {
    /// Show plan sheets and their days.
    List,

    /// Add a plan sheet, optionally limited to some weekdays.
    Add {
        name: String,

        /// Weekday names to use (prompted when omitted with --pick).
        days: Vec<String>,

        /// Pick the weekdays interactively.
        #[arg(long)]
        pick: bool,
    },

    /// Remove a plan sheet.
    Remove { name: String },
}

impl Default for Command {
    fn default() -> Self {
        Command::Build(BuildArgs::default())
    }
}
