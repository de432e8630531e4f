//! HTTP error types for remote analysis services.

/// Transport or status failure while talking to a remote analyzer.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} (status {:?}) at line {} in {}", message, status, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Response status, when the server answered at all
    pub status: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a transport-level error (no response received).
    ///
    /// # Examples
    ///
    /// ```
    /// use beatline_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.status.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an error for a non-success response status.
    #[track_caller]
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: Some(status),
            line: location.line(),
            file: location.file(),
        }
    }
}
