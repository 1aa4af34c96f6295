//! Provider payload content.

use crate::Role;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// The smallest unit of provider-payload content.
///
/// Direction (`input_*` vs `output_*`) follows the authoring role only.
///
/// # Examples
///
/// ```
/// use parley_core::ContentBlock;
///
/// let block = ContentBlock::text("hello", true, None);
/// let json = serde_json::to_value(&block).unwrap();
/// assert_eq!(json, serde_json::json!({"type": "output_text", "text": "hello"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text authored by the user
    InputText {
        /// Verbatim text
        text: String,
        /// Opaque provenance token carried from storage
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought_signature: Option<String>,
    },
    /// Text authored by the model
    OutputText {
        /// Verbatim text
        text: String,
        /// Opaque provenance token carried from storage
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought_signature: Option<String>,
    },
    /// Image supplied by the user, inlined as a data URI
    InputImage {
        /// `data:<mime>;base64,<payload>`
        image_url: String,
        /// Opaque provenance token carried from storage
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought_signature: Option<String>,
    },
}

impl ContentBlock {
    /// Text block in the direction implied by `assistant`.
    pub fn text(
        text: impl Into<String>,
        assistant: bool,
        thought_signature: Option<String>,
    ) -> Self {
        let text = text.into();
        if assistant {
            Self::OutputText {
                text,
                thought_signature,
            }
        } else {
            Self::InputText {
                text,
                thought_signature,
            }
        }
    }

    /// Text carried by this block, if it is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::InputText { text, .. } | Self::OutputText { text, .. } => Some(text),
            Self::InputImage { .. } => None,
        }
    }
}

/// Role of a provider message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderRole {
    /// Human turn
    User,
    /// Model turn
    Assistant,
}

impl ProviderRole {
    /// Provider role for a stored participant role.
    ///
    /// Returns `None` for roles that never reach a provider history.
    pub fn from_stored(role: Role) -> Option<Self> {
        match role {
            Role::User => Some(Self::User),
            Role::Model => Some(Self::Assistant),
            Role::Assistant | Role::System | Role::Other => None,
        }
    }
}

/// One turn of a provider-bound history. Never empty.
///
/// # Examples
///
/// ```
/// use parley_core::{ContentBlock, ProviderMessage, ProviderRole};
///
/// assert!(ProviderMessage::new(ProviderRole::User, vec![]).is_none());
///
/// let message = ProviderMessage::new(
///     ProviderRole::User,
///     vec![ContentBlock::text("hi", false, None)],
/// )
/// .unwrap();
/// assert_eq!(message.content().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct ProviderMessage {
    role: ProviderRole,
    content: Vec<ContentBlock>,
}

impl ProviderMessage {
    /// Create a message, or `None` when `content` is empty.
    pub fn new(role: ProviderRole, content: Vec<ContentBlock>) -> Option<Self> {
        if content.is_empty() {
            None
        } else {
            Some(Self { role, content })
        }
    }
}
