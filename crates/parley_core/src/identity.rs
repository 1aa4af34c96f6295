//! Authenticated caller identity.

use serde::{Deserialize, Serialize};

/// A verified user, as established by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable user identifier
    pub user_id: String,
    /// Email address, when known
    pub email: Option<String>,
}

impl Identity {
    /// Create an identity for a user id with no email.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
