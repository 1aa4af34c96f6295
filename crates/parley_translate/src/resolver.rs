//! Stored part to provider content block resolution.

use crate::ImageFetcher;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parley_core::{ContentBlock, ImagePart, Role, StoredPart};
use parley_error::ResolveError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Build a `data:<mime>;base64,<payload>` URI.
///
/// # Examples
///
/// ```
/// use parley_translate::data_uri;
///
/// assert_eq!(data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
/// ```
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Resolves one stored part into at most one provider content block.
///
/// Outcomes are split three ways:
/// - `Ok(Some(block))` for translatable content
/// - `Ok(None)` for absent or unsupported shapes, which are skipped
/// - `Err(_)` when a referenced image cannot be retrieved
#[derive(Clone)]
pub struct PartResolver {
    fetcher: Arc<dyn ImageFetcher>,
    default_mime: String,
}

impl std::fmt::Debug for PartResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartResolver")
            .field("default_mime", &self.default_mime)
            .finish_non_exhaustive()
    }
}

impl PartResolver {
    /// Create a resolver that fetches images through `fetcher`.
    pub fn new(fetcher: Arc<dyn ImageFetcher>, default_mime: impl Into<String>) -> Self {
        Self {
            fetcher,
            default_mime: default_mime.into(),
        }
    }

    /// Resolve `part` as authored by `role`.
    pub async fn resolve(
        &self,
        part: &StoredPart,
        role: Role,
        cancel: &CancellationToken,
    ) -> Result<Option<ContentBlock>, ResolveError> {
        let assistant = role.is_assistant_equivalent();
        match part {
            StoredPart::Text(text) if !text.text.is_empty() => Ok(Some(ContentBlock::text(
                text.text.clone(),
                assistant,
                text.thought_signature.clone(),
            ))),
            StoredPart::Image(image) if !assistant => self.resolve_image(image, cancel).await,
            StoredPart::Image(_) => {
                debug!(%role, "Skipping model-authored image");
                Ok(None)
            }
            StoredPart::Text(_) => Ok(None),
            StoredPart::Unsupported(_) => {
                debug!(%role, "Skipping unsupported part shape");
                Ok(None)
            }
        }
    }

    #[instrument(skip_all, fields(url = image.inline_data.url.as_deref().unwrap_or_default()))]
    async fn resolve_image(
        &self,
        image: &ImagePart,
        cancel: &CancellationToken,
    ) -> Result<Option<ContentBlock>, ResolveError> {
        let Some(url) = image.inline_data.url.as_deref().filter(|url| !url.is_empty()) else {
            debug!("Image part has no URL");
            return Ok(None);
        };

        let bytes = self.fetcher.fetch(url, cancel).await?;
        let mime_type = image
            .inline_data
            .mime_type
            .as_deref()
            .filter(|mime| !mime.trim().is_empty())
            .unwrap_or(&self.default_mime);

        Ok(Some(ContentBlock::InputImage {
            image_url: data_uri(mime_type, &bytes),
            thought_signature: image.thought_signature.clone(),
        }))
    }
}
