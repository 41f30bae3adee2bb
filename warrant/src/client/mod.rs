//! HTTP clients.
//!
//! [`ApiClient`] is the low-level request executor. [`WarrantClient`] layers
//! the typed resource operations (objects, warrants, checks, queries,
//! sessions) on top of it.

mod executor;

pub use executor::{ApiClient, ApiClientBuilder, RequestOptions, USER_AGENT};

use crate::config::Config;
use crate::error::WarrantError;

/// High-level client for the Warrant API.
///
/// ## Examples
///
/// ```rust,ignore
/// use warrant::{ObjectRef, RequestOptions, Subject, WarrantCheck, WarrantClient};
///
/// let client = WarrantClient::from_env()?;
/// let check = WarrantCheck::new(
///     &ObjectRef::new("report", "q3"),
///     "viewer",
///     &Subject::new("user", "42"),
/// );
/// if client.is_authorized(&check, &RequestOptions::default()).await? {
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WarrantClient {
    api: ApiClient,
}

impl WarrantClient {
    /// Creates a client from an explicit configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, WarrantError> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    /// Creates a client configured from `WARRANT_*` environment variables.
    ///
    /// ## Errors
    ///
    /// Returns an error if the environment holds an invalid setting.
    pub fn from_env() -> Result<Self, WarrantError> {
        Self::new(Config::from_env()?)
    }

    /// Wraps an already configured [`ApiClient`].
    pub fn with_api_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// The underlying request executor, for endpoints without a typed
    /// wrapper.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn config(&self) -> &Config {
        self.api.config()
    }
}
