//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the beatline binary.

mod commands;
mod graph;
mod play;
mod setup;
mod validate;

pub use commands::{AnalyzerChoice, Cli, Commands};
pub use graph::print_graph;
pub use play::play_script;
pub use validate::validate_script;
