//! Core data types for the Beatline clip sequencer.
//!
//! This crate holds the script model shared by the loader, the conductor
//! and the validator: characters, per-clip performances, the three clip
//! variants, the script graph, analysis contexts, and validation findings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod character;
mod clip;
mod performance;
mod script;
mod telemetry;
mod validation;

pub use analysis::{AnalysisContext, AnalysisContextKind, BasicContext, QuizContext};
pub use character::CharacterInfo;
pub use clip::{DEFAULT_CHOICE_UI, ChoiceClip, Clip, ClipHeader, ClipKind, LinearClip, QuizClip};
pub use performance::PerformanceData;
pub use script::{ClipTarget, END_OF_SCRIPT, ENTRY_CLIP, ScriptGraph};
pub use telemetry::{init_telemetry, shutdown_telemetry};
pub use validation::{ValidationResult, ValidationSeverity, ValidationTarget};
