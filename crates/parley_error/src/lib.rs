//! Error types for the parley chat backend.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use parley_error::{ConfigError, ParleyResult};
//!
//! fn concurrency(raw: usize) -> ParleyResult<usize> {
//!     if raw == 0 {
//!         return Err(ConfigError::new("fetch.max_concurrency must be at least 1").into());
//!     }
//!     Ok(raw)
//! }
//!
//! assert!(concurrency(0).is_err());
//! assert_eq!(concurrency(4).unwrap(), 4);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod resolve;
mod router;

pub use config::ConfigError;
pub use error::{ParleyError, ParleyErrorKind, ParleyResult};
pub use http::HttpError;
pub use json::JsonError;
pub use resolve::{ResolveError, ResolveErrorKind};
pub use router::{RouterError, RouterErrorKind};
