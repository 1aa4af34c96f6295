//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Role of a stored message author.
///
/// Stored history uses `model` for assistant output; `assistant` is accepted
/// too so that callers translating already provider-shaped roles get the same
/// treatment.
///
/// # Examples
///
/// ```
/// use parley_core::Role;
///
/// assert!(Role::Model.is_assistant_equivalent());
/// assert!(Role::Assistant.is_assistant_equivalent());
/// assert!(!Role::User.is_assistant_equivalent());
///
/// let role: Role = serde_json::from_str("\"tool\"").unwrap();
/// assert_eq!(role, Role::Other);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human participant
    #[display("user")]
    User,
    /// Model output as persisted
    #[display("model")]
    Model,
    /// Provider-style spelling of model output
    #[display("assistant")]
    Assistant,
    /// System instructions
    #[display("system")]
    System,
    /// Any role this backend does not recognise
    #[serde(other)]
    #[display("other")]
    Other,
}

impl Role {
    /// Whether content from this role is model-authored.
    pub fn is_assistant_equivalent(self) -> bool {
        matches!(self, Self::Model | Self::Assistant)
    }
}
