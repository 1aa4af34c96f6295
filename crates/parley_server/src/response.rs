//! Mapping of router errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parley_error::{RouterError, RouterErrorKind};
use serde_json::json;
use tracing::{debug, warn};

/// Body text for unparseable inbound requests.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body";

/// Client closed the request before a response was produced.
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// A [`RouterError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub RouterError);

impl From<RouterError> for ApiError {
    fn from(err: RouterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0.kind {
            RouterErrorKind::MalformedRequest(reason) => {
                debug!(%reason, "Rejecting malformed request");
                (StatusCode::BAD_REQUEST, json!({"error": INVALID_JSON_MESSAGE}))
            }
            RouterErrorKind::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Authentication required"}),
            ),
            RouterErrorKind::ConversationNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Conversation not found", "conversationId": id}),
            ),
            RouterErrorKind::Resolution(err) => {
                warn!(url = err.url(), "History translation failed: {}", err.kind);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({"error": err.kind.to_string(), "url": err.url()}),
                )
            }
            RouterErrorKind::Upstream(reason) => {
                warn!(%reason, "Upstream call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({"error": "Upstream provider request failed"}),
                )
            }
            RouterErrorKind::Cancelled => {
                debug!("Request cancelled by client");
                let status = StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                    .unwrap_or(StatusCode::BAD_REQUEST);
                (status, json!({"error": "Request cancelled"}))
            }
            RouterErrorKind::Internal(reason) => {
                warn!(%reason, "Failed to assemble outbound request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
