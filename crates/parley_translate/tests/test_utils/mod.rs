//! Test utilities for translation tests.
//!
//! Provides a scripted image fetcher and stored-message helpers.

use async_trait::async_trait;
use bytes::Bytes;
use parley_core::{MessageType, Role, StoredMessage, StoredMessageBuilder, StoredPart};
use parley_error::{ResolveError, ResolveErrorKind};
use parley_translate::ImageFetcher;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// What the mock does for a given URL.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockBehavior {
    /// Return these bytes after an optional delay
    Bytes { body: Vec<u8>, delay: Duration },
    /// Fail with the given HTTP status
    Status(u16),
    /// Never finish on its own; only cancellation ends it
    Hang,
}

/// Scripted [`ImageFetcher`] that counts calls and tracks concurrency.
#[derive(Debug, Default)]
pub struct MockImageFetcher {
    behaviors: Mutex<HashMap<String, MockBehavior>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl MockImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` immediately for `url`.
    pub fn with_image(self, url: &str, body: &[u8]) -> Self {
        self.with_delayed_image(url, body, Duration::ZERO)
    }

    /// Serve `body` for `url` after `delay`.
    pub fn with_delayed_image(self, url: &str, body: &[u8], delay: Duration) -> Self {
        self.with_behavior(
            url,
            MockBehavior::Bytes {
                body: body.to_vec(),
                delay,
            },
        )
    }

    pub fn with_behavior(self, url: &str, behavior: MockBehavior) -> Self {
        self.behaviors
            .lock()
            .expect("behaviors lock poisoned")
            .insert(url.to_string(), behavior);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<Bytes, ResolveError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(url.to_string());
        let behavior = self
            .behaviors
            .lock()
            .expect("behaviors lock poisoned")
            .get(url)
            .cloned()
            .unwrap_or(MockBehavior::Status(404));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let work = async {
            match behavior {
                MockBehavior::Bytes { body, delay } => {
                    tokio::time::sleep(delay).await;
                    Ok(Bytes::from(body))
                }
                MockBehavior::Status(status) => Err(ResolveError::new(ResolveErrorKind::Status {
                    url: url.to_string(),
                    status,
                })),
                MockBehavior::Hang => std::future::pending().await,
            }
        };

        let result = tokio::select! {
            _ = cancel.cancelled() => Err(ResolveError::new(ResolveErrorKind::Cancelled {
                url: url.to_string(),
            })),
            result = work => result,
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// A multi-part stored message.
#[allow(dead_code)]
pub fn parts_message(role: Role, parts: Vec<StoredPart>) -> StoredMessage {
    StoredMessageBuilder::default()
        .role(role)
        .kind(MessageType::Parts)
        .parts(parts)
        .build()
        .expect("Failed to build stored message")
}

/// A user message holding a single image.
#[allow(dead_code)]
pub fn image_message(url: &str) -> StoredMessage {
    parts_message(
        Role::User,
        vec![StoredPart::image(url, Some("image/png".to_string()))],
    )
}
