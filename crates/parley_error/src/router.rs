//! Error types for the provider router.

use crate::ResolveError;

/// Error kinds for routing an inbound chat request.
#[derive(Debug, Clone, derive_more::Display)]
pub enum RouterErrorKind {
    /// Inbound body is not a JSON object
    #[display("Malformed request: {}", _0)]
    MalformedRequest(String),

    /// Stored history was referenced without an authenticated identity
    #[display("Authentication required")]
    Unauthorized,

    /// Referenced conversation does not exist or is not owned by the caller
    #[display("Conversation not found: {}", _0)]
    ConversationNotFound(String),

    /// Stored history could not be materialized
    #[display("{}", _0)]
    Resolution(ResolveError),

    /// Downstream provider call failed before a response was received
    #[display("Upstream error: {}", _0)]
    Upstream(String),

    /// Inbound request was cancelled
    #[display("Request cancelled")]
    Cancelled,

    /// Outbound body could not be assembled
    #[display("Internal error: {}", _0)]
    Internal(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Router Error: {} at line {} in {}", kind, line, file)]
pub struct RouterError {
    /// The error kind
    pub kind: RouterErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl RouterError {
    /// Create a new RouterError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RouterErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<ResolveError> for RouterError {
    #[track_caller]
    fn from(err: ResolveError) -> Self {
        if err.is_cancelled() {
            Self::new(RouterErrorKind::Cancelled)
        } else {
            Self::new(RouterErrorKind::Resolution(err))
        }
    }
}
