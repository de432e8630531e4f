//! Error types for the Beatline clip sequencer.
//!
//! This crate provides the foundation error types used throughout the Beatline workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Script errors abort a load. Playback errors end a run. Validation
//! findings are not errors at all: they are collected as data by the
//! validator in `beatline_narrative`.
//!
//! # Examples
//!
//! ```
//! use beatline_error::{BeatlineResult, ScriptError, ScriptErrorKind};
//!
//! fn load() -> BeatlineResult<()> {
//!     Err(ScriptError::new(ScriptErrorKind::UnknownClipType("FadeClip".into())))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod playback;
mod script;

pub use config::ConfigError;
pub use error::{BeatlineError, BeatlineErrorKind, BeatlineResult};
pub use http::HttpError;
pub use json::JsonError;
pub use playback::{PlaybackError, PlaybackErrorKind};
pub use script::{ScriptError, ScriptErrorKind};
