//! Capability traits for the Beatline clip sequencer.
//!
//! Clips never talk to a concrete keyboard, language model or renderer.
//! They talk to the traits here, and the host plugs in implementations:
//! analyzers and input providers from `beatline_capability`, character
//! controllers and UIs from whatever engine is presenting the story.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;
mod ui;

pub use traits::{Analyzer, CharacterController, InputProvider};
pub use types::{InputCallback, UiErrorKind};
pub use ui::{ClipUi, InteractiveUi, QuizUi, UiFactory};
