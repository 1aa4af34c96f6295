//! Stored history to provider message translation.

use crate::PartResolver;
use futures::{StreamExt, TryStreamExt, stream};
use parley_core::{ProviderMessage, ProviderRole, StoredMessage};
use parley_error::ResolveError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Walks a stored conversation into an ordered provider history.
///
/// Parts within one message resolve strictly in order. Independent messages
/// resolve concurrently, at most `max_concurrency` at a time, and the output
/// keeps the stored message order regardless of completion order.
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    resolver: PartResolver,
    max_concurrency: usize,
}

impl HistoryBuilder {
    /// Create a builder. A concurrency of zero is treated as one.
    pub fn new(resolver: PartResolver, max_concurrency: usize) -> Self {
        Self {
            resolver,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Translate `messages` into provider messages.
    ///
    /// Only `user` and `model` messages that are not error notices take part.
    /// Messages that resolve to no content are dropped. The first resolution
    /// failure aborts the whole build and cancels outstanding work.
    #[instrument(
        skip_all,
        fields(messages = messages.len(), max_concurrency = self.max_concurrency)
    )]
    pub async fn build(
        &self,
        messages: &[StoredMessage],
        cancel: &CancellationToken,
    ) -> Result<Vec<ProviderMessage>, ResolveError> {
        let resolved: Vec<Option<ProviderMessage>> = stream::iter(
            messages.iter().filter(|message| message.is_participant()),
        )
        .map(|message| self.build_message(message, cancel))
        .boxed()
        .buffered(self.max_concurrency)
        .try_collect()
        .await?;

        let history: Vec<ProviderMessage> = resolved.into_iter().flatten().collect();
        debug!(emitted = history.len(), "History built");
        Ok(history)
    }

    async fn build_message(
        &self,
        message: &StoredMessage,
        cancel: &CancellationToken,
    ) -> Result<Option<ProviderMessage>, ResolveError> {
        let Some(role) = ProviderRole::from_stored(message.role) else {
            return Ok(None);
        };

        let mut content = Vec::new();
        for part in message.effective_parts() {
            if let Some(block) = self.resolver.resolve(&part, message.role, cancel).await? {
                content.push(block);
            }
        }

        let provider_message = ProviderMessage::new(role, content);
        if provider_message.is_none() {
            debug!(role = %message.role, "Dropping message with no resolvable content");
        }
        Ok(provider_message)
    }
}
