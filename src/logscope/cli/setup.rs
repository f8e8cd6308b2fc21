use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logscope", bin_name = "logscope", version)]
#[command(about = "Search, sort and annotate recorded session command logs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./logscope.json)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Options form definition
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub form: Option<PathBuf>,

    /// Only read the last N lines of the log (0 reads everything)
    #[arg(long, global = true, value_name = "N", help_heading = "Options")]
    pub max_lines: Option<usize>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub log_file: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the log entries
    #[command(alias = "ls")]
    List {
        /// Log file (newline-delimited JSON)
        logfile: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the full outputs of one row
    Show {
        /// Log file (newline-delimited JSON)
        logfile: PathBuf,

        /// Row number in the listed view (1-based)
        index: usize,

        #[command(flatten)]
        view: ViewArgs,

        /// Print the detail as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit the options form and print the resulting settings
    Options {
        /// Field edit, e.g. --set theme=light (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Discard the edits instead of accepting them
        #[arg(long)]
        cancel: bool,
    },

    /// Interactive session reading actions from stdin
    Browse {
        /// Log file (newline-delimited JSON)
        logfile: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Initial view state, shared by every command that shows rows.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive text to look for in commands
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only show issues (replaces the text query while set)
    #[arg(long)]
    pub issues_only: bool,

    /// Mark issue rows
    #[arg(long)]
    pub highlight_issues: bool,

    /// Mark rows whose command contains the highlight pattern
    #[arg(long)]
    pub highlight_pattern: bool,

    /// Click a column header; repeat to click again
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Time window preset: 1h, 6h, 24h, 7d, 30d or all
    #[arg(long, value_name = "PRESET", conflicts_with_all = ["since", "until"])]
    pub window: Option<String>,

    /// Keep entries started at or after this time
    #[arg(long, value_name = "TIME")]
    pub since: Option<String>,

    /// Keep entries started at or before this time
    #[arg(long, value_name = "TIME")]
    pub until: Option<String>,
}
