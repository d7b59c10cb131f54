//! Command-line interface definition using clap.
//!
//! The [`Args`] struct is the run's whole configuration object: which
//! export to read, how many ranked conversations to keep, which pattern
//! set (if any) to track, and whether to print a table instead of
//! rendering a chart.
//!
//! The two pattern flags are mutually exclusive — clap rejects a command
//! line that sets both before any archive content is touched.

use std::path::PathBuf;

use clap::Parser;

/// Graph per-conversation activity and filler-word trends from a Discord
/// data export.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatgraph")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatgraph package.zip
    chatgraph package.zip --list
    chatgraph ./extracted-export -n 5 -o activity.svg
    chatgraph package.zip -n 1 --fillers
    chatgraph package.zip -n 1 -u alice --phrase 'good morning' --phrase brb")]
pub struct Args {
    /// Path to the data export (.zip archive or extracted directory)
    pub archive: PathBuf,

    /// Number of ranked conversations to display
    #[arg(short = 'n', long, default_value_t = 10, value_name = "N")]
    pub top: usize,

    /// Number of top-ranked conversations to skip first
    #[arg(short = 's', long, default_value_t = 0, value_name = "N")]
    pub skip: usize,

    /// Print the ranked table to stdout and exit without rendering
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Only keep conversations whose name contains TERM (repeatable)
    #[arg(short = 'u', long = "user", value_name = "TERM")]
    pub users: Vec<String>,

    /// Track the builtin filler-word set and rank by match volume
    #[arg(short = 'f', long, conflicts_with = "phrases")]
    pub fillers: bool,

    /// Track a custom phrase instead (repeatable; raw regex fragment,
    /// matched anywhere in a message)
    #[arg(short = 'p', long = "phrase", value_name = "PHRASE", conflicts_with = "fillers")]
    pub phrases: Vec<String>,

    /// Chart output path
    #[arg(short = 'o', long, default_value = "chatgraph.svg", value_name = "PATH")]
    pub output: PathBuf,
}

impl Args {
    /// Returns `true` when any pattern set is requested.
    pub fn pattern_mode(&self) -> bool {
        self.fillers || !self.phrases.is_empty()
    }
}
