//! HTTP client errors.
//!
//! Raised while building the reqwest clients for image retrieval and the
//! upstream provider. Per-request failures are reported as
//! [`ResolveError`](crate::ResolveError) or [`RouterError`](crate::RouterError).

/// An HTTP client could not be constructed.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// What failed, including the reqwest builder message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Record a client construction failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley_error::HttpError;
    ///
    /// let err = HttpError::new("Failed to build image client: invalid TLS backend");
    /// assert!(err.message.starts_with("Failed to build image client"));
    /// assert!(err.file.ends_with(".rs"));
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
