//! Script load error types.
//!
//! Every variant here aborts the load: a script either comes back whole
//! or not at all.

/// Specific error conditions while loading a script graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ScriptErrorKind {
    /// Failed to read script file
    #[display("Failed to read script file: {}", _0)]
    FileRead(String),
    /// Failed to parse the script document
    #[display("Failed to parse script: {}", _0)]
    Parse(String),
    /// Failed to serialize a script graph
    #[display("Failed to serialize script: {}", _0)]
    Serialize(String),
    /// Clip discriminator has no registered constructor
    #[display("Clip type '{}' is not registered", _0)]
    UnknownClipType(String),
    /// A constructor for this discriminator already exists
    #[display("Clip type '{}' is already registered", _0)]
    DuplicateClipType(String),
    /// A clip field is malformed
    #[display("Clip {} ('{}'): invalid field '{}': {}", index, clip, field, reason)]
    InvalidField {
        /// Clip index in the script
        index: usize,
        /// Clip name
        clip: String,
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
    /// `nextClips` does not line up with `answers`
    #[display("Clip '{}' has {} answers but {} next clips", clip, answers, next_clips)]
    BranchCountMismatch {
        /// Clip name
        clip: String,
        /// Number of answers
        answers: usize,
        /// Number of next-clip targets
        next_clips: usize,
    },
    /// Quiz `feedback` does not line up with `answers`
    #[display("Quiz clip '{}' has {} answers but {} feedback entries", clip, answers, feedback)]
    FeedbackCountMismatch {
        /// Clip name
        clip: String,
        /// Number of answers
        answers: usize,
        /// Number of feedback strings
        feedback: usize,
    },
}

/// Error type for script loading.
///
/// # Examples
///
/// ```
/// use beatline_error::{ScriptError, ScriptErrorKind};
///
/// let err = ScriptError::new(ScriptErrorKind::UnknownClipType("FadeClip".into()));
/// assert!(format!("{}", err).contains("FadeClip"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// The specific error condition
    pub kind: ScriptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new ScriptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
