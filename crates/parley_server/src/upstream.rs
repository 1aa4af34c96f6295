//! Downstream provider handler.

use crate::UpstreamConfig;
use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, header};
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use parley_error::{HttpError, RouterError, RouterErrorKind};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument};

/// Relayed response body.
pub type ForwardBody = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// Inbound headers copied onto the upstream request.
const FORWARDED_REQUEST_HEADERS: [HeaderName; 2] = [header::ACCEPT, header::ACCEPT_LANGUAGE];

/// Upstream headers copied onto the relayed response.
const RELAYED_RESPONSE_HEADERS: [HeaderName; 3] =
    [header::CONTENT_TYPE, header::CACHE_CONTROL, header::RETRY_AFTER];

/// A request rewritten by the router, ready for execution.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    /// Inbound HTTP method
    pub method: Method,
    /// Inbound headers
    pub headers: HeaderMap,
    /// Rewritten JSON body
    pub body: Value,
    /// Fires when the inbound request goes away
    pub cancel: CancellationToken,
}

/// Upstream response as relayed to the caller.
pub struct ForwardResponse {
    /// Upstream status
    pub status: StatusCode,
    /// Headers to relay
    pub headers: HeaderMap,
    /// Unbuffered body stream
    pub body: ForwardBody,
}

impl std::fmt::Debug for ForwardResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Performs the upstream provider call.
///
/// Implementations relay upstream error statuses as responses rather than
/// errors; `Err` is reserved for failures before any response exists.
#[async_trait]
pub trait ProviderHandler: Send + Sync {
    /// Execute `request` against the provider.
    async fn execute(&self, request: ForwardRequest) -> Result<ForwardResponse, RouterError>;
}

/// reqwest-backed provider handler.
#[derive(Debug, Clone)]
pub struct HttpProviderHandler {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpProviderHandler {
    /// Build a handler for the configured endpoint.
    #[instrument(skip(config), fields(base_url = %config.base_url, path = %config.path))]
    pub fn new(config: &UpstreamConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build upstream client: {}", e)))?;

        debug!("Creating provider handler");
        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }
}

#[async_trait]
impl ProviderHandler for HttpProviderHandler {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, method = %request.method))]
    async fn execute(&self, request: ForwardRequest) -> Result<ForwardResponse, RouterError> {
        let mut builder = self
            .client
            .request(request.method, &self.endpoint)
            .json(&request.body);

        for name in FORWARDED_REQUEST_HEADERS {
            if let Some(value) = request.headers.get(&name) {
                builder = builder.header(name, value);
            }
        }

        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = tokio::select! {
            biased;
            _ = request.cancel.cancelled() => {
                debug!("Upstream request cancelled before response");
                return Err(RouterError::new(RouterErrorKind::Cancelled));
            }
            response = builder.send() => response.map_err(|e| {
                error!("Upstream request failed: {}", e);
                RouterError::new(RouterErrorKind::Upstream(e.to_string()))
            })?,
        };

        let status = response.status();
        debug!(%status, "Upstream responded");

        let mut headers = HeaderMap::new();
        for name in RELAYED_RESPONSE_HEADERS {
            if let Some(value) = response.headers().get(&name) {
                headers.insert(name, value.clone());
            }
        }

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other))
            .take_until(request.cancel.cancelled_owned())
            .boxed();

        Ok(ForwardResponse {
            status,
            headers,
            body,
        })
    }
}
