//! Conversation persistence collaborator (read side).

use async_trait::async_trait;
use parley_core::{Identity, StoredMessage};
use parley_error::{ConfigError, JsonError, ParleyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Read-only access to stored conversations.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Messages of `conversation_id` in insertion order, if it exists and is
    /// owned by `owner`.
    async fn messages(&self, owner: &Identity, conversation_id: &str) -> Option<Vec<StoredMessage>>;
}

/// A conversation and its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConversation {
    /// User id of the owner
    pub owner: String,
    /// Messages in insertion order
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
}

/// In-memory store, seeded programmatically or from a JSON file.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, StoredConversation>>,
}

impl InMemoryConversationStore {
    /// Create a store from existing conversations keyed by id.
    pub fn new(conversations: HashMap<String, StoredConversation>) -> Self {
        Self {
            conversations: RwLock::new(conversations),
        }
    }

    /// Load `{ "<id>": { "owner": "...", "messages": [...] } }` from disk.
    #[instrument]
    pub fn from_seed_file(path: &Path) -> ParleyResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read seed file: {}", e)))?;
        let conversations: HashMap<String, StoredConversation> = serde_json::from_str(&raw)
            .map_err(|e| JsonError::new(format!("Failed to parse seed file: {}", e)))?;
        debug!(conversations = conversations.len(), "Seeded conversation store");
        Ok(Self::new(conversations))
    }

    /// Insert or replace a conversation.
    pub async fn insert(&self, id: impl Into<String>, conversation: StoredConversation) {
        self.conversations.write().await.insert(id.into(), conversation);
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn messages(
        &self,
        owner: &Identity,
        conversation_id: &str,
    ) -> Option<Vec<StoredMessage>> {
        let conversations = self.conversations.read().await;
        conversations
            .get(conversation_id)
            .filter(|conversation| conversation.owner == owner.user_id)
            .map(|conversation| conversation.messages.clone())
    }
}
