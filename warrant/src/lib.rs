//! Client library for the Warrant authorization API.
//!
//! Every operation turns its arguments into a REST request, sends it, and
//! decodes the JSON response. Authorization decisions are made entirely by
//! the server.
//!
//! ## Layers
//!
//! - [`normalize`](mod@normalize) - Rewrites snake_case [`Params`] into the camelCase wire format
//! - [`ApiClient`] - Issues GET/POST/PUT/DELETE with auth and consistency headers
//! - [`ApiError`] - Classifies failed responses by the server's error code
//! - [`Query`] - Builds `SELECT ... FOR ... WHERE ...` query expressions
//! - [`WarrantClient`] - Typed operations for objects, warrants, checks,
//!   queries and sessions
//!
//! ## Examples
//!
//! ```rust,ignore
//! use warrant::{Config, ObjectRef, RequestOptions, Subject, WarrantClient};
//!
//! let client = WarrantClient::new(Config::builder().api_key("api_test_123").build()?)?;
//! let opts = RequestOptions::default();
//!
//! let warrant = client
//!     .create_warrant(&ObjectRef::new("report", "q3"), "viewer", &Subject::new("user", "42"), None, &opts)
//!     .await?;
//!
//! let opts = RequestOptions::with_warrant_token(warrant.warrant_token.unwrap_or_default());
//! let allowed = client
//!     .has_permission("view-reports", &Subject::new("user", "42"), &opts)
//!     .await?;
//! ```
//!
//! ## Concurrency
//!
//! A client holds an immutable copy of its [`Config`] and may be shared
//! freely between tasks. There is no cache, no background work and no
//! automatic retry.

pub mod case;
mod client;
mod config;
mod error;
mod method;
pub mod normalize;
mod params;
mod query;
mod resources;
mod response;
mod types;

pub use client::{ApiClient, ApiClientBuilder, RequestOptions, WarrantClient, USER_AGENT};
pub use config::{
    Config, ConfigBuilder, DEFAULT_API_ENDPOINT, DEFAULT_SELF_SERVICE_DASH_URL, ENV_API_ENDPOINT,
    ENV_API_KEY, ENV_AUTHORIZE_ENDPOINT, ENV_SELF_SERVICE_DASH_URL, ENV_USE_SSL,
};
pub use error::{ApiError, ConfigError, ErrorKind, WarrantError};
pub use method::RestMethod;
pub use normalize::normalize;
pub use params::{Param, Params};
pub use query::{Query, QueryClause};
pub use resources::{CheckOp, SelfServiceStrategy, WarrantCheck, WarrantFilter, MEMBER};
pub use response::{CheckResult, RawResponse, WARRANT_TOKEN_HEADER};
pub use types::{
    ListOptions, ListResponse, Object, ObjectRef, ObjectType, ParseRefError, QueryResponse,
    QueryResult, Referenceable, SortOrder, Subject, Warrant,
};
