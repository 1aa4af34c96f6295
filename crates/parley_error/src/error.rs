//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, JsonError, ResolveError, RouterError};

/// The umbrella error enum for all parley crates.
///
/// # Examples
///
/// ```
/// use parley_error::{ConfigError, ParleyError, ParleyErrorKind};
///
/// let err: ParleyError = ConfigError::new("fetch.max_concurrency must be at least 1").into();
/// assert!(matches!(err.kind(), ParleyErrorKind::Config(_)));
/// assert!(err.to_string().starts_with("Parley Error: Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ParleyErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Content resolution error
    #[from(ResolveError)]
    Resolve(ResolveError),
    /// Provider routing error
    #[from(RouterError)]
    Router(RouterError),
}

/// Parley error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Parley Error: {}", _0)]
pub struct ParleyError(Box<ParleyErrorKind>);

impl ParleyError {
    /// Create a new error from a kind.
    pub fn new(kind: ParleyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ParleyErrorKind {
        &self.0
    }
}

impl<T> From<T> for ParleyError
where
    T: Into<ParleyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for parley operations.
pub type ParleyResult<T> = std::result::Result<T, ParleyError>;
