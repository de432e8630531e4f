//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Beatline - play and check branching narrative scripts
#[derive(Parser, Debug)]
#[command(name = "beatline")]
#[command(about = "Play and check branching narrative scripts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Export spans through OpenTelemetry instead of plain logging
    #[arg(long, global = true)]
    pub otel: bool,

    /// Configuration file (defaults to ./beatline.toml, then ~/.config/beatline/beatline.toml)
    #[arg(long, global = true, env = "BEATLINE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a script for broken branches, orphans, missing characters and analyzer problems
    Validate {
        /// Path to the script JSON file
        script: PathBuf,

        /// Character with a runtime controller (repeatable); defaults to the script's roster
        #[arg(long = "character")]
        characters: Vec<String>,

        /// Default analyzer
        #[arg(long)]
        analyzer: Option<AnalyzerChoice>,
    },

    /// Play a script in the terminal
    Play {
        /// Path to the script JSON file
        script: PathBuf,

        /// Default analyzer
        #[arg(long)]
        analyzer: Option<AnalyzerChoice>,

        /// Reading pace for printed dialogue, in seconds per word
        #[arg(long, default_value = "0.3")]
        pace: f32,
    },

    /// Print clip indices and branch targets
    Graph {
        /// Path to the script JSON file
        script: PathBuf,
    },
}

/// Bundled analyzers
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalyzerChoice {
    /// Case-insensitive exact match
    Exact,
    /// Case-insensitive substring match
    Keyword,
    /// Remote chat-completion classifier
    Remote,
}

impl AnalyzerChoice {
    /// Registry name of the analyzer.
    pub fn name(self) -> &'static str {
        match self {
            Self::Exact => beatline::ExactMatchAnalyzer::NAME,
            Self::Keyword => beatline::KeywordMatchAnalyzer::NAME,
            Self::Remote => beatline::ChatCompletionAnalyzer::NAME,
        }
    }
}
