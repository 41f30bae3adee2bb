//! Layered error types for the Warrant client.
//!
//! - [`WarrantError`] - Top-level error returned by every client operation
//! - [`ApiError`] - A failed response, classified by the server's error code
//! - [`ErrorKind`] - The closed set of server error codes
//! - [`ConfigError`] - Invalid client configuration

mod api_error;
mod config_error;
mod warrant_error;

pub use api_error::{ApiError, ErrorKind};
pub use config_error::ConfigError;
pub use warrant_error::WarrantError;
