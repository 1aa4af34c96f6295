//! Core data types for the parley chat backend.
//!
//! Two families of types live here:
//! - the canonical stored conversation ([`StoredMessage`], [`StoredPart`]),
//!   owned by the persistence layer and read-only to translation;
//! - the provider payload ([`ProviderMessage`], [`ContentBlock`]), built fresh
//!   for each outbound request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod identity;
mod mode;
mod part;
mod role;
mod stored;

pub use content::{ContentBlock, ProviderMessage, ProviderRole};
pub use identity::Identity;
pub use mode::LineMode;
pub use part::{ImagePart, InlineData, StoredPart, TextPart};
pub use role::Role;
pub use stored::{MessageType, StoredMessage, StoredMessageBuilder, StoredMessageBuilderError};
