//! System prompt and model identifier policy.

use parley_core::LineMode;
use serde::{Deserialize, Serialize};

/// Provider namespace applied to bare model identifiers.
pub const DEFAULT_NAMESPACE: &str = "volcengine";

/// Persona prefix injected under economy mode.
pub const DEFAULT_ECONOMY_PREFIX: &str = "You are a helpful general-purpose assistant. \
Answer questions on any topic, not only programming, clearly and accurately. \
When a question is about code, answer it as well as you can, but do not refuse \
or redirect questions that are unrelated to software.";

const NAMESPACE_SEPARATOR: char = '/';

/// Configuration for [`ModePolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Namespace prepended to bare model ids
    pub default_namespace: String,
    /// Persona prefix for economy mode
    pub economy_prefix: String,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            economy_prefix: DEFAULT_ECONOMY_PREFIX.to_string(),
        }
    }
}

/// Mode-dependent prompt rewriting and model id qualification.
///
/// # Examples
///
/// ```
/// use parley_core::LineMode;
/// use parley_translate::{ModeConfig, ModePolicy};
///
/// let policy = ModePolicy::new(&ModeConfig::default());
///
/// assert_eq!(policy.qualify_model_id("gpt-4"), "volcengine/gpt-4");
/// assert_eq!(policy.qualify_model_id("acme/gpt-4"), "acme/gpt-4");
/// assert_eq!(policy.augment_system_prompt(Some("Be terse."), LineMode::Premium), "Be terse.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModePolicy {
    default_namespace: String,
    economy_prefix: String,
}

impl ModePolicy {
    /// Create a policy from configuration.
    pub fn new(config: &ModeConfig) -> Self {
        Self {
            default_namespace: config.default_namespace.clone(),
            economy_prefix: config.economy_prefix.clone(),
        }
    }

    /// The economy persona prefix.
    pub fn economy_prefix(&self) -> &str {
        &self.economy_prefix
    }

    /// System prompt to send for `user_prompt` under `mode`.
    ///
    /// Economy mode prepends the persona prefix, separated from a non-blank
    /// user prompt by an empty line. Premium mode returns the prompt as given,
    /// with `None` becoming the empty string.
    pub fn augment_system_prompt(&self, user_prompt: Option<&str>, mode: LineMode) -> String {
        let user_prompt = user_prompt.unwrap_or_default();
        match mode {
            LineMode::Premium => user_prompt.to_string(),
            LineMode::Economy if user_prompt.trim().is_empty() => self.economy_prefix.clone(),
            LineMode::Economy => format!("{}\n\n{}", self.economy_prefix, user_prompt),
        }
    }

    /// Provider-qualified form of `model`.
    ///
    /// Ids that already carry a namespace and the empty id are unchanged.
    pub fn qualify_model_id(&self, model: &str) -> String {
        if model.is_empty() || model.contains(NAMESPACE_SEPARATOR) {
            model.to_string()
        } else {
            format!("{}{}{}", self.default_namespace, NAMESPACE_SEPARATOR, model)
        }
    }
}

/// Display form of a provider-qualified model id.
///
/// Strips everything up to and including the last separator. Ids without a
/// separator, with the separator only in leading position, or that would strip
/// to nothing are returned unchanged.
///
/// # Examples
///
/// ```
/// use parley_translate::display_model_id;
///
/// assert_eq!(display_model_id("volcengine/gpt-4"), "gpt-4");
/// assert_eq!(display_model_id("gpt-4"), "gpt-4");
/// assert_eq!(display_model_id("/gpt-4"), "/gpt-4");
/// ```
pub fn display_model_id(model: &str) -> &str {
    match model.rfind(NAMESPACE_SEPARATOR) {
        Some(index) if index > 0 && index + 1 < model.len() => &model[index + 1..],
        _ => model,
    }
}
