//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::services::TranscriptSource;

/// Validate chess games written in SAN and show them as a turn table or tree
#[derive(Parser, Debug)]
#[command(name = "santree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .santree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, env = "SANTREE_PROJECT_DIR", value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Require turn numbers 1, 2, 3, ...
    #[arg(long, global = true)]
    pub strict: bool,

    /// Accept check/mate suffixes on castling
    #[arg(long, global = true)]
    pub castling_suffix: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the game as a turn table
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the game as a turn tree
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List tree nodes with their layout positions
    Layout {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate only; exit status tells the result
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where to read the transcript from (stdin if neither is given).
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// File holding the SAN transcript
    #[arg(value_hint = ValueHint::FilePath, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Transcript given inline, e.g. "1. e4 e5 2. Nf3"
    #[arg(short, long)]
    pub text: Option<String>,
}

impl InputArgs {
    pub fn source(&self) -> TranscriptSource {
        match (&self.file, &self.text) {
            (Some(file), _) => TranscriptSource::File(file.clone()),
            (None, Some(text)) => TranscriptSource::Text(text.clone()),
            (None, None) => TranscriptSource::Stdin,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },
}
