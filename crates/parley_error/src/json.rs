//! JSON errors.

/// Stored history or a seed file could not be (de)serialized.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// What was being (de)serialized and the serde_json message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Record a serialization failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley_error::JsonError;
    ///
    /// let err = JsonError::new("Failed to parse seed file: expected value at line 1");
    /// assert!(err.to_string().starts_with("JSON Error: Failed to parse seed file"));
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
