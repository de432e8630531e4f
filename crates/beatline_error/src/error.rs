//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, JsonError, PlaybackError, PlaybackErrorKind, ScriptError,
    ScriptErrorKind,
};

/// Every error condition a Beatline operation can produce.
///
/// # Examples
///
/// ```
/// use beatline_error::{BeatlineError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: BeatlineError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BeatlineErrorKind {
    /// HTTP error (remote analyzers)
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Script load error
    #[from(ScriptError)]
    Script(ScriptError),
    /// Playback error
    #[from(PlaybackError)]
    Playback(PlaybackError),
}

/// Beatline error with kind discrimination.
///
/// # Examples
///
/// ```
/// use beatline_error::{BeatlineResult, ConfigError};
///
/// fn might_fail() -> BeatlineResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Beatline Error: {}", _0)]
pub struct BeatlineError(Box<BeatlineErrorKind>);

impl BeatlineError {
    /// Create a new error from a kind.
    pub fn new(kind: BeatlineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BeatlineErrorKind {
        &self.0
    }

    /// The playback error kind, if this is a playback error.
    pub fn playback_kind(&self) -> Option<&PlaybackErrorKind> {
        match self.kind() {
            BeatlineErrorKind::Playback(err) => Some(&err.kind),
            _ => None,
        }
    }

    /// The script error kind, if this is a script load error.
    pub fn script_kind(&self) -> Option<&ScriptErrorKind> {
        match self.kind() {
            BeatlineErrorKind::Script(err) => Some(&err.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to BeatlineErrorKind
impl<T> From<T> for BeatlineError
where
    T: Into<BeatlineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Beatline operations.
pub type BeatlineResult<T> = std::result::Result<T, BeatlineError>;
