//! Playback error types.
//!
//! Soft failures (no analyzer match, a missing character controller) are
//! absorbed by the clip that hit them and never appear here. What remains
//! are conditions that leave a run unable to make forward progress.

/// Specific error conditions while running a script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PlaybackErrorKind {
    /// An input provider already has an outstanding request
    #[display("Input provider '{}' is already listening", _0)]
    InputAlreadyPending(String),
    /// An input provider dropped a request without answering or being cancelled
    #[display("Input provider '{}' abandoned the request", _0)]
    InputAbandoned(String),
    /// The UI collaborator could not supply the requested UI
    #[display("UI '{}' is not available", _0)]
    UiUnavailable(String),
    /// A branch target points at an empty slot in the script
    #[display("Clip slot {} is empty", _0)]
    MissingClip(usize),
    /// Neither an override nor a default analyzer is available
    #[display("Clip '{}' has no analyzer", _0)]
    NoAnalyzer(String),
    /// The configured retry budget ran out before an answer matched
    #[display("Clip '{}' gave up after {} answer attempts", clip, attempts)]
    AttemptsExhausted {
        /// Clip name
        clip: String,
        /// Attempts made
        attempts: u32,
    },
    /// The playback task panicked or was aborted
    #[display("Playback task ended abnormally: {}", _0)]
    RunAborted(String),
}

/// Error type for playback operations.
///
/// # Examples
///
/// ```
/// use beatline_error::{PlaybackError, PlaybackErrorKind};
///
/// let err = PlaybackError::new(PlaybackErrorKind::MissingClip(3));
/// assert!(format!("{}", err).contains("slot 3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Playback Error: {} at line {} in {}", kind, line, file)]
pub struct PlaybackError {
    /// The specific error condition
    pub kind: PlaybackErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PlaybackError {
    /// Create a new PlaybackError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlaybackErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
