//! Caller identity collaborator.

use axum::http::HeaderMap;
use parley_core::Identity;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's email.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Yields the verified identity behind a request, if any.
///
/// Credential checks happen before the router; implementations only read
/// what the authentication layer established.
pub trait IdentityResolver: Send + Sync {
    /// Identity for a request with `headers`.
    fn resolve(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Trusts identity headers injected by an authenticating gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustedHeaderIdentity;

impl IdentityResolver for TrustedHeaderIdentity {
    fn resolve(&self, headers: &HeaderMap) -> Option<Identity> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let identity = Identity::new(header(USER_ID_HEADER)?);
        Some(match header(USER_EMAIL_HEADER) {
            Some(email) => identity.with_email(email),
            None => identity,
        })
    }
}
