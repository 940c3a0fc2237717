use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "hookguard", version, disable_help_subcommand = true)]
#[command(about = "Repository hygiene checks for pre-commit hook runners")]
pub struct Cli {
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
    #[arg(long)]
    pub repo_root: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the CODEOWNERS file against the live tree and enforce the
    /// designated-owner policy.
    Ownership {
        #[arg(long, value_name = "OWNER")]
        codeowners_owner: Option<String>,
        #[arg(long, value_name = "PATH")]
        codeowners_file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Print the owners of an item, or of its children at a given depth.
    FindOwner {
        item: PathBuf,
        #[arg(short = 'l', long, default_value_t = 0)]
        level: usize,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Require ticket references on TODO comments.
    TodoRefs {
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Reject files above a maximum line count.
    LineCount {
        #[arg(long, default_value_t = hookguard_core::checks::line_count::DEFAULT_MAX_LINES)]
        max_lines: usize,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Require strict `set` options in shell scripts.
    ShellOptions {
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Flag stale or repeated exclude entries in the pre-commit config.
    ExcludePaths {
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Jsonl,
}
