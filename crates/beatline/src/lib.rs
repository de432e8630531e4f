//! Beatline - interactive narrative clip sequencer.
//!
//! A script is a graph of clips. Linear clips play character performances
//! and move on; choice and quiz clips ask the player a question, collect
//! free-form input from an input provider, and let an analyzer decide
//! which answer was meant. A conductor walks the graph one clip at a time.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use beatline::{ClipFactoryRegistry, Conductor, KeywordMatchAnalyzer, TextEntryProvider, load_script_file};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let script = load_script_file("story.json", &ClipFactoryRegistry::with_builtin()?)?;
//!     let keyboard = Arc::new(TextEntryProvider::new("keyboard"));
//!     let conductor = Conductor::new(script, keyboard.clone(), my_ui_factory())
//!         .with_default_analyzer(Arc::new(KeywordMatchAnalyzer));
//!
//!     let summary = conductor.play().await?;
//!     println!("Visited {:?}", summary.visited());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Beatline is organized as a workspace with focused crates:
//!
//! - `beatline-error` - Error types
//! - `beatline-core` - Script model (clips, graph, analysis contexts)
//! - `beatline-interface` - Analyzer, input provider, character and UI contracts
//! - `beatline-capability` - Bundled analyzers and input providers
//! - `beatline-narrative` - Loader, clip execution, conductor and validator
//!
//! This crate (`beatline`) re-exports everything for convenience and adds
//! a console host used by the `beatline` binary.

pub mod console;

pub use beatline_capability::*;
pub use beatline_core::*;
pub use beatline_error::*;
pub use beatline_interface::*;
pub use beatline_narrative::*;
