//! Provider router.

use crate::{
    ApiError, ConversationStore, ForwardRequest, HttpProviderHandler, IdentityResolver,
    ParleyConfig, ProviderHandler,
};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use parley_error::{ParleyResult, RouterError, RouterErrorKind};
use parley_translate::payload::{
    apply_line_mode, prepend_history, qualify_model, take_routing_fields,
};
use parley_translate::{
    HistoryBuilder, HttpImageFetcher, ModePolicy, PartResolver, display_model_id,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Response header carrying the display form of the routed model id.
pub const DISPLAY_MODEL_HEADER: &str = "x-parley-model";

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    policy: Arc<ModePolicy>,
    history: Arc<HistoryBuilder>,
    provider: Arc<dyn ProviderHandler>,
    store: Arc<dyn ConversationStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    pub fn new(
        policy: ModePolicy,
        history: HistoryBuilder,
        provider: Arc<dyn ProviderHandler>,
        store: Arc<dyn ConversationStore>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            policy: Arc::new(policy),
            history: Arc::new(history),
            provider,
            store,
            identity,
        }
    }

    /// Assemble state with HTTP-backed fetcher and provider from `config`.
    pub fn from_config(
        config: &ParleyConfig,
        store: Arc<dyn ConversationStore>,
        identity: Arc<dyn IdentityResolver>,
    ) -> ParleyResult<Self> {
        let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch)?);
        let resolver = PartResolver::new(fetcher, &config.fetch.default_mime);
        let history = HistoryBuilder::new(resolver, config.fetch.max_concurrency);
        let provider = Arc::new(HttpProviderHandler::new(&config.upstream)?);

        Ok(Self::new(
            ModePolicy::new(&config.mode),
            history,
            provider,
            store,
            identity,
        ))
    }
}

/// Create the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(route_chat))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Chat endpoint.
async fn route_chat(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match route(&state, method, headers, &body).await {
        Ok(response) => response,
        Err(err) => ApiError(err).into_response(),
    }
}

#[instrument(skip_all, fields(model = tracing::field::Empty, conversation = tracing::field::Empty))]
async fn route(
    state: &AppState,
    method: Method,
    headers: HeaderMap,
    raw: &[u8],
) -> Result<Response, RouterError> {
    let mut body: Map<String, Value> = serde_json::from_slice(raw)
        .map_err(|e| RouterError::new(RouterErrorKind::MalformedRequest(e.to_string())))?;

    let model = qualify_model(&mut body, &state.policy);
    tracing::Span::current().record("model", model.as_str());

    let routing = take_routing_fields(&mut body);

    // Dropping the handler or the relayed body cancels fetches and the upstream call.
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();

    if let Some(conversation_id) = routing.conversation_id.as_deref() {
        tracing::Span::current().record("conversation", conversation_id);

        let identity = state
            .identity
            .resolve(&headers)
            .ok_or_else(|| RouterError::new(RouterErrorKind::Unauthorized))?;
        let messages = state
            .store
            .messages(&identity, conversation_id)
            .await
            .ok_or_else(|| {
                RouterError::new(RouterErrorKind::ConversationNotFound(
                    conversation_id.to_string(),
                ))
            })?;

        let history = state.history.build(&messages, &cancel).await?;
        debug!(stored = messages.len(), emitted = history.len(), "History materialized");
        prepend_history(&mut body, history)
            .map_err(|e| RouterError::new(RouterErrorKind::Internal(e.message)))?;
    }

    apply_line_mode(&mut body, routing.line_mode, &state.policy);

    let request = ForwardRequest {
        method,
        headers,
        body: Value::Object(body),
        cancel,
    };
    let upstream = state.provider.execute(request).await?;
    info!(status = %upstream.status, line_mode = %routing.line_mode, "Relaying upstream response");

    let relayed = upstream.body.map(move |chunk| {
        let _held = &guard;
        chunk
    });

    let mut response = Response::new(Body::from_stream(relayed));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = upstream.headers;
    if !model.is_empty() {
        if let Ok(value) = HeaderValue::from_str(display_model_id(&model)) {
            response.headers_mut().insert(DISPLAY_MODEL_HEADER, value);
        }
    }
    Ok(response)
}
