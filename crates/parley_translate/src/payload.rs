//! Outbound request body assembly.
//!
//! The router works on the raw inbound JSON object so that fields this layer
//! does not understand pass through untouched. These helpers perform the few
//! rewrites it does own.

use crate::ModePolicy;
use parley_core::{LineMode, ProviderMessage};
use parley_error::JsonError;
use serde_json::{Map, Value, json};
use tracing::warn;

/// Field carrying the requested model id.
pub const MODEL_FIELD: &str = "model";
/// Field carrying the provider input sequence.
pub const INPUT_FIELD: &str = "input";
/// Field carrying the system prompt.
pub const INSTRUCTIONS_FIELD: &str = "instructions";
/// Routing-only field naming a stored conversation.
pub const CONVERSATION_FIELD: &str = "conversationId";
/// Routing-only field selecting the line mode.
pub const LINE_MODE_FIELD: &str = "lineMode";

/// Routing-only values removed from an inbound body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingFields {
    /// Stored conversation to prepend, if any
    pub conversation_id: Option<String>,
    /// Requested line mode
    pub line_mode: LineMode,
}

/// Remove and parse the routing-only fields.
///
/// Unknown line modes fall back to premium.
pub fn take_routing_fields(body: &mut Map<String, Value>) -> RoutingFields {
    let conversation_id = match body.remove(CONVERSATION_FIELD) {
        Some(Value::String(id)) if !id.trim().is_empty() => Some(id.trim().to_string()),
        _ => None,
    };

    let line_mode = match body.remove(LINE_MODE_FIELD) {
        Some(Value::String(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(line_mode = %raw, "Unknown line mode, using premium");
            LineMode::Premium
        }),
        _ => LineMode::Premium,
    };

    RoutingFields {
        conversation_id,
        line_mode,
    }
}

/// Trim and qualify the `model` field in place, returning the qualified id.
///
/// A missing or non-string `model` is left as-is and yields an empty id.
pub fn qualify_model(body: &mut Map<String, Value>, policy: &ModePolicy) -> String {
    let Some(Value::String(model)) = body.get(MODEL_FIELD) else {
        return String::new();
    };
    let qualified = policy.qualify_model_id(model.trim());
    body.insert(MODEL_FIELD.to_string(), Value::String(qualified.clone()));
    qualified
}

/// Rewrite `instructions` for `mode`.
///
/// Premium mode leaves the body untouched. Only an absent, null or string
/// `instructions` is rewritten; any other shape is left for the provider to
/// reject.
pub fn apply_line_mode(body: &mut Map<String, Value>, mode: LineMode, policy: &ModePolicy) {
    if mode == LineMode::Premium {
        return;
    }
    let existing = match body.get(INSTRUCTIONS_FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.as_str()),
        Some(_) => {
            warn!("Non-string instructions left as-is under economy mode");
            return;
        }
    };
    let instructions = policy.augment_system_prompt(existing, mode);
    body.insert(INSTRUCTIONS_FIELD.to_string(), Value::String(instructions));
}

/// Place `history` ahead of any `input` already in the body.
///
/// A string `input` becomes a trailing user text message; array items are
/// appended after the history in their original order.
pub fn prepend_history(
    body: &mut Map<String, Value>,
    history: Vec<ProviderMessage>,
) -> Result<(), JsonError> {
    let mut input = match serde_json::to_value(history)
        .map_err(|e| JsonError::new(format!("Failed to serialize history: {}", e)))?
    {
        Value::Array(items) => items,
        other => vec![other],
    };

    match body.remove(INPUT_FIELD) {
        None | Some(Value::Null) => {}
        Some(Value::String(text)) if text.is_empty() => {}
        Some(Value::Array(items)) => input.extend(items),
        Some(Value::String(text)) => input.push(json!({
            "role": "user",
            "content": [{"type": "input_text", "text": text}],
        })),
        Some(other) => input.push(other),
    }

    body.insert(INPUT_FIELD.to_string(), Value::Array(input));
    Ok(())
}
