//! Stored message parts.

use serde::{Deserialize, Serialize};

/// One ordered piece of a stored message.
///
/// The stored JSON carries no explicit tag: a part is an image when it has an
/// `inlineData` object and text when it has a `text` string. Anything else is
/// kept verbatim as [`StoredPart::Unsupported`] so re-serialization is
/// lossless and translation can skip it without failing.
///
/// # Examples
///
/// ```
/// use parley_core::StoredPart;
///
/// let text: StoredPart = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
/// assert!(matches!(text, StoredPart::Text(_)));
///
/// let image: StoredPart = serde_json::from_str(
///     r#"{"inlineData":{"mimeType":"image/png","url":"https://cdn.example.com/a.png"}}"#,
/// ).unwrap();
/// assert!(matches!(image, StoredPart::Image(_)));
///
/// let other: StoredPart = serde_json::from_str(r#"{"functionCall":{}}"#).unwrap();
/// assert!(matches!(other, StoredPart::Unsupported(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredPart {
    /// Remote image reference
    Image(ImagePart),
    /// Text run, possibly a model thought
    Text(TextPart),
    /// Unrecognised shape, preserved as-is
    Unsupported(serde_json::Value),
}

impl StoredPart {
    /// Build a plain text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart {
            text: text.into(),
            thought: None,
            thought_signature: None,
        })
    }

    /// Build an image part referencing a remote URL.
    pub fn image(url: impl Into<String>, mime_type: Option<String>) -> Self {
        Self::Image(ImagePart {
            inline_data: InlineData {
                mime_type,
                url: Some(url.into()),
            },
            thought_signature: None,
        })
    }

    /// Opaque provenance token attached by the model, if any.
    pub fn thought_signature(&self) -> Option<&str> {
        match self {
            Self::Text(part) => part.thought_signature.as_deref(),
            Self::Image(part) => part.thought_signature.as_deref(),
            Self::Unsupported(_) => None,
        }
    }
}

/// A text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPart {
    /// Text content, passed through verbatim
    pub text: String,
    /// Set when the run is a model thought summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    /// Opaque provenance token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

/// An image stored as a reference to remote bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePart {
    /// Where the bytes live and how to label them
    pub inline_data: InlineData,
    /// Opaque provenance token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

/// Location and media type of a stored image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Declared MIME type, e.g. `image/jpeg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Remote location of the bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
