//! Content resolution errors.
//!
//! Every variant names the remote resource that could not be materialized.
//! A resolution error is fatal to the translation of the enclosing history;
//! it is never downgraded to a skipped part.

/// Reasons a referenced resource could not be turned into provider content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ResolveErrorKind {
    /// Transport-level failure (DNS, connect, TLS, read, timeout)
    #[display("Failed to fetch {}: {}", url, reason)]
    Fetch {
        /// The offending URL
        url: String,
        /// Transport error description
        reason: String,
    },

    /// Remote answered with a non-2xx status
    #[display("Fetching {} returned HTTP {}", url, status)]
    Status {
        /// The offending URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Remote payload exceeds the configured ceiling
    #[display("Resource at {} exceeds {} bytes", url, limit)]
    TooLarge {
        /// The offending URL
        url: String,
        /// Configured maximum in bytes
        limit: usize,
    },

    /// The inbound request was cancelled while the fetch was in flight
    #[display("Fetch of {} was cancelled", url)]
    Cancelled {
        /// The offending URL
        url: String,
    },
}

impl ResolveErrorKind {
    /// URL of the resource that failed to resolve.
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. }
            | Self::Status { url, .. }
            | Self::TooLarge { url, .. }
            | Self::Cancelled { url } => url,
        }
    }
}

/// Content resolution error with location tracking.
///
/// # Examples
///
/// ```
/// use parley_error::{ResolveError, ResolveErrorKind};
///
/// let err = ResolveError::new(ResolveErrorKind::Status {
///     url: "https://cdn.example.com/cat.png".to_string(),
///     status: 404,
/// });
/// assert_eq!(err.url(), "https://cdn.example.com/cat.png");
/// assert!(err.to_string().contains("HTTP 404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Resolve Error: {} at line {} in {}", kind, line, file)]
pub struct ResolveError {
    /// The error kind
    pub kind: ResolveErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ResolveError {
    /// Create a new ResolveError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ResolveErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// URL of the resource that failed to resolve.
    pub fn url(&self) -> &str {
        self.kind.url()
    }

    /// Whether the failure was caused by request cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::Cancelled { .. })
    }
}
