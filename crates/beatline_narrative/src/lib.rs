//! Script loading, clip execution and validation for Beatline.
//!
//! A script is loaded from JSON into a [`ScriptGraph`](beatline_core::ScriptGraph),
//! checked by the [`ScriptValidator`], then played by a [`Conductor`] one
//! clip at a time. Clips talk to the outside world only through the
//! capability traits in `beatline_interface`.
//!
//! # Example
//!
//! ```rust,ignore
//! use beatline_narrative::{ClipFactoryRegistry, Conductor, load_script_file};
//!
//! # async fn example() -> beatline_error::BeatlineResult<()> {
//! let script = load_script_file("story.json", &ClipFactoryRegistry::with_builtin()?)?;
//! let conductor = Conductor::new(script, input_provider, ui_factory)
//!     .with_characters(characters)
//!     .with_default_analyzer(Arc::new(KeywordMatchAnalyzer));
//!
//! for finding in conductor.validate() {
//!     println!("{}", finding);
//! }
//! let summary = conductor.play().await?;
//! println!("Visited {:?}", summary.visited());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clips;
mod conductor;
mod context;
mod events;
mod loader;
mod registry;
mod settings;
mod stop;
mod validator;

pub use clips::{ClipOutcome, run_clip};
pub use conductor::{Conductor, PlaybackOutcome, PlaybackSummary};
pub use context::RuntimeContext;
pub use events::ConductorEvent;
pub use loader::{
    ClipEntry, ClipFactory, ClipFactoryRegistry, ClipMetadata, ScriptDocument, load_script,
    load_script_file,
};
pub use registry::{AnalyzerRegistry, CharacterRegistry};
pub use settings::{BeatlineConfig, PlaybackSettings};
pub use stop::{StopSignal, Stopped};
pub use validator::ScriptValidator;
