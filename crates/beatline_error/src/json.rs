//! JSON error types.

/// Failure to encode or decode a JSON payload (script files, analyzer replies).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use beatline_error::JsonError;
    ///
    /// let err = JsonError::new("expected `,` at line 3");
    /// assert!(err.to_string().starts_with("JSON Error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
