//! Remote image retrieval.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use parley_error::{HttpError, ResolveError, ResolveErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Limits applied to image retrieval and history translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Messages resolved concurrently within one history
    pub max_concurrency: usize,
    /// Ceiling on a single image body
    pub max_image_bytes: usize,
    /// Per-fetch timeout
    pub timeout_secs: u64,
    /// MIME type used when a stored image declares none
    pub default_mime: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            max_image_bytes: 20 * 1024 * 1024,
            timeout_secs: 30,
            default_mime: "image/png".to_string(),
        }
    }
}

/// Capability to retrieve the bytes behind a URL.
///
/// Implementations must stop work and return a `Cancelled` error once
/// `cancel` fires.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the full body at `url`.
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<Bytes, ResolveError>;
}

/// reqwest-backed fetcher with a size ceiling and timeout.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    /// Build a fetcher from configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build image client: {}", e)))?;
        Ok(Self::with_client(client, config.max_image_bytes))
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    async fn download(&self, url: &str) -> Result<Bytes, ResolveError> {
        let fetch_error = |e: reqwest::Error| {
            ResolveError::new(ResolveErrorKind::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })
        };
        let too_large = || {
            ResolveError::new(ResolveErrorKind::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            })
        };

        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Image fetch returned error status");
            return Err(ResolveError::new(ResolveErrorKind::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        if let Some(declared) = response.content_length() {
            if declared > self.max_bytes as u64 {
                warn!(%url, declared, limit = self.max_bytes, "Declared image size over limit");
                return Err(too_large());
            }
        }

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(fetch_error)?;
            if buffer.len() + chunk.len() > self.max_bytes {
                warn!(%url, limit = self.max_bytes, "Streamed image size over limit");
                return Err(too_large());
            }
            buffer.extend_from_slice(&chunk);
        }

        debug!(%url, bytes = buffer.len(), "Image fetched");
        Ok(buffer.freeze())
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    #[instrument(skip(self, cancel))]
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<Bytes, ResolveError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Image fetch cancelled");
                Err(ResolveError::new(ResolveErrorKind::Cancelled { url: url.to_string() }))
            }
            result = self.download(url) => result,
        }
    }
}
