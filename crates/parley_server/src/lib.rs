//! HTTP provider router for the parley chat backend.
//!
//! Accepts chat requests, normalizes the requested model id to its
//! provider-qualified form, optionally materializes a stored conversation into
//! the provider `input` sequence, and relays the request to the downstream
//! provider handler without buffering its (possibly streamed) response.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use parley_server::{
//!     AppState, InMemoryConversationStore, ParleyConfig, TrustedHeaderIdentity, create_router,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ParleyConfig::load(None)?;
//!     let state = AppState::from_config(
//!         &config,
//!         Arc::new(InMemoryConversationStore::default()),
//!         Arc::new(TrustedHeaderIdentity),
//!     )?;
//!
//!     let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
//!     axum::serve(listener, create_router(state)).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod identity;
mod observability;
mod response;
mod router;
mod store;
mod upstream;

pub use config::{ConfigSource, ParleyConfig, ServerSection, UpstreamConfig};
pub use identity::{IdentityResolver, TrustedHeaderIdentity, USER_EMAIL_HEADER, USER_ID_HEADER};
pub use observability::init_logging;
pub use response::ApiError;
pub use router::{AppState, DISPLAY_MODEL_HEADER, create_router};
pub use store::{ConversationStore, InMemoryConversationStore, StoredConversation};
pub use upstream::{
    ForwardBody, ForwardRequest, ForwardResponse, HttpProviderHandler, ProviderHandler,
};
