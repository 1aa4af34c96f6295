//! Translation of stored conversations into provider chat payloads.
//!
//! The pieces compose leaves-first:
//!
//! - [`ImageFetcher`] retrieves remote image bytes ([`HttpImageFetcher`] over reqwest)
//! - [`PartResolver`] turns one stored part into one provider content block
//! - [`HistoryBuilder`] walks a stored history into provider messages
//! - [`ModePolicy`] rewrites system prompts and model identifiers
//! - [`payload`] splices the results into an outbound JSON body
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use parley_core::{Role, StoredMessageBuilder, StoredPart, MessageType};
//! use parley_translate::{FetchConfig, HistoryBuilder, HttpImageFetcher, PartResolver};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetchConfig::default();
//! let fetcher = Arc::new(HttpImageFetcher::new(&config)?);
//! let resolver = PartResolver::new(fetcher, &config.default_mime);
//! let builder = HistoryBuilder::new(resolver, config.max_concurrency);
//!
//! let history = vec![StoredMessageBuilder::default()
//!     .role(Role::User)
//!     .kind(MessageType::Parts)
//!     .parts(vec![StoredPart::text("hi")])
//!     .build()?];
//!
//! let messages = builder.build(&history, &CancellationToken::new()).await?;
//! assert_eq!(messages.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fetch;
mod history;
mod mode;
pub mod payload;
mod resolver;

pub use fetch::{FetchConfig, HttpImageFetcher, ImageFetcher};
pub use history::HistoryBuilder;
pub use mode::{
    DEFAULT_ECONOMY_PREFIX, DEFAULT_NAMESPACE, ModeConfig, ModePolicy, display_model_id,
};
pub use resolver::{PartResolver, data_uri};
