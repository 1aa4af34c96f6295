//! Stored conversation messages.

use crate::{Role, StoredPart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shape discriminator of a stored message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Legacy single-field text (and optional image) message
    #[default]
    Text,
    /// Ordered multi-part message; `parts` is authoritative
    Parts,
    /// Transient error notice shown in the UI, never sent to a provider
    Error,
}

/// A persisted conversation message.
///
/// # Examples
///
/// ```
/// use parley_core::{MessageType, Role, StoredMessageBuilder, StoredPart};
///
/// let message = StoredMessageBuilder::default()
///     .role(Role::User)
///     .kind(MessageType::Parts)
///     .parts(vec![StoredPart::text("hi")])
///     .build()
///     .unwrap();
///
/// assert_eq!(message.effective_parts().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct StoredMessage {
    /// Author role
    pub role: Role,
    /// Legacy text body
    #[serde(default)]
    #[builder(default)]
    pub content: String,
    /// Legacy thought summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub thought: Option<String>,
    /// Shape discriminator
    #[serde(rename = "type", default)]
    #[builder(default)]
    pub kind: MessageType,
    /// Legacy image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub image: Option<String>,
    /// MIME type of the legacy image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub mime_type: Option<String>,
    /// Ordered parts, authoritative when `kind` is `Parts`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub parts: Vec<StoredPart>,
    /// Creation time
    #[serde(default)]
    #[builder(default)]
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    /// The ordered parts translation should walk.
    ///
    /// Multi-part messages yield their `parts` as stored. Older single-field
    /// messages are lifted into parts: the text body first, then the image,
    /// each only when present.
    pub fn effective_parts(&self) -> Vec<StoredPart> {
        if self.kind == MessageType::Parts && !self.parts.is_empty() {
            return self.parts.clone();
        }

        let mut parts = Vec::with_capacity(2);
        if !self.content.is_empty() {
            parts.push(StoredPart::text(self.content.clone()));
        }
        if let Some(url) = self.image.as_deref().filter(|url| !url.is_empty()) {
            parts.push(StoredPart::image(url, self.mime_type.clone()));
        }
        parts
    }

    /// Whether this message belongs in a provider-bound history.
    pub fn is_participant(&self) -> bool {
        self.kind != MessageType::Error && matches!(self.role, Role::User | Role::Model)
    }
}
