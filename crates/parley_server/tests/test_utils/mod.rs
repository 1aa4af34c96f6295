//! Test utilities for router tests.
//!
//! Provides a capturing provider handler, scripted image fetchers, and a
//! helper that wires them into an [`AppState`].

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use bytes::Bytes;
use futures::stream;
use parley_core::{MessageType, Role, StoredMessage, StoredMessageBuilder, StoredPart};
use parley_error::{ResolveError, ResolveErrorKind, RouterError};
use parley_server::{
    AppState, ForwardRequest, ForwardResponse, InMemoryConversationStore, ProviderHandler,
    TrustedHeaderIdentity,
};
use parley_translate::{HistoryBuilder, ImageFetcher, ModeConfig, ModePolicy, PartResolver};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

/// Records forwarded bodies and replies with a canned response.
#[derive(Debug)]
pub struct MockProvider {
    status: StatusCode,
    content_type: &'static str,
    chunks: Vec<&'static str>,
    requests: Mutex<Vec<ForwardRequest>>,
}

#[allow(dead_code)]
impl MockProvider {
    /// Reply 200 with a JSON body.
    pub fn json(body: &'static str) -> Self {
        Self::new(StatusCode::OK, "application/json", vec![body])
    }

    /// Reply 200 with server-sent events split across chunks.
    pub fn sse(chunks: Vec<&'static str>) -> Self {
        Self::new(StatusCode::OK, "text/event-stream", chunks)
    }

    pub fn new(status: StatusCode, content_type: &'static str, chunks: Vec<&'static str>) -> Self {
        Self {
            status,
            content_type,
            chunks,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock poisoned").len()
    }

    /// Body of the most recent forwarded request.
    pub fn last_body(&self) -> Option<Value> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .last()
            .map(|request| request.body.clone())
    }

    /// Cancellation token handed to the most recent execution.
    pub fn last_cancel(&self) -> Option<CancellationToken> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .last()
            .map(|request| request.cancel.clone())
    }

    /// Headers of the most recent forwarded request.
    pub fn last_headers(&self) -> Option<HeaderMap> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .last()
            .map(|request| request.headers.clone())
    }
}

#[async_trait]
impl ProviderHandler for MockProvider {
    async fn execute(&self, request: ForwardRequest) -> Result<ForwardResponse, RouterError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request);

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type));

        let chunks: Vec<Result<Bytes, std::io::Error>> = self
            .chunks
            .iter()
            .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes())))
            .collect();

        Ok(ForwardResponse {
            status: self.status,
            headers,
            body: Box::pin(stream::iter(chunks)),
        })
    }
}

/// Serves fixed bytes per URL; unknown URLs fail with 404.
#[derive(Debug, Default)]
pub struct StaticImageFetcher {
    images: HashMap<String, Vec<u8>>,
}

#[allow(dead_code)]
impl StaticImageFetcher {
    pub fn with_image(mut self, url: &str, bytes: &[u8]) -> Self {
        self.images.insert(url.to_string(), bytes.to_vec());
        self
    }
}

#[async_trait]
impl ImageFetcher for StaticImageFetcher {
    async fn fetch(&self, url: &str, _cancel: &CancellationToken) -> Result<Bytes, ResolveError> {
        self.images
            .get(url)
            .map(|bytes| Bytes::from(bytes.clone()))
            .ok_or_else(|| {
                ResolveError::new(ResolveErrorKind::Status {
                    url: url.to_string(),
                    status: 404,
                })
            })
    }
}

/// Never completes a fetch; records the token it was given.
#[derive(Debug, Clone, Default)]
pub struct HangingImageFetcher {
    cancel: Arc<Mutex<Option<CancellationToken>>>,
    started: Arc<Notify>,
}

#[allow(dead_code)]
impl HangingImageFetcher {
    /// Resolves once a fetch is in flight.
    pub async fn started(&self) {
        self.started.notified().await;
    }

    /// Token of the in-flight fetch.
    pub fn cancel_token(&self) -> Option<CancellationToken> {
        self.cancel.lock().expect("cancel lock poisoned").clone()
    }
}

#[async_trait]
impl ImageFetcher for HangingImageFetcher {
    async fn fetch(&self, _url: &str, cancel: &CancellationToken) -> Result<Bytes, ResolveError> {
        *self.cancel.lock().expect("cancel lock poisoned") = Some(cancel.clone());
        self.started.notify_one();
        std::future::pending().await
    }
}

/// Router state over mocks with default mode configuration.
pub fn test_state(
    provider: Arc<MockProvider>,
    store: Arc<InMemoryConversationStore>,
    fetcher: impl ImageFetcher + 'static,
) -> AppState {
    let resolver = PartResolver::new(Arc::new(fetcher), "image/png");
    AppState::new(
        ModePolicy::new(&ModeConfig::default()),
        HistoryBuilder::new(resolver, 4),
        provider,
        store,
        Arc::new(TrustedHeaderIdentity),
    )
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
