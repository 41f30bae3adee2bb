//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct, which issues GET, POST,
//! PUT and DELETE requests against the Warrant API. It attaches the auth,
//! user-agent and consistency headers, and normalizes parameters exactly
//! once on the way out.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};
use tracing::{debug, instrument, Span};
use url::Url;

use crate::config::Config;
use crate::error::{ConfigError, WarrantError};
use crate::method::RestMethod;
use crate::normalize::normalize;
use crate::params::Params;
use crate::response::{RawResponse, WARRANT_TOKEN_HEADER};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("warrant-rust/", env!("CARGO_PKG_VERSION"));

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Consistency token from an earlier write. Reads made with it observe
    /// at least that write.
    pub warrant_token: Option<String>,
}

impl RequestOptions {
    pub fn with_warrant_token(token: impl Into<String>) -> Self {
        Self {
            warrant_token: Some(token.into()),
        }
    }
}

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    config: Config,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl ApiClientBuilder {
    fn new(config: Config) -> Self {
        Self {
            config,
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets a request timeout. Without one, the transport default applies.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(config)
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, WarrantError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, WarrantError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ApiClient {
            client: builder.build()?,
            config: self.config,
        })
    }
}

/// Async HTTP client for the Warrant REST API.
///
/// Wraps a pooled `reqwest::Client` together with the [`Config`] it was
/// built from. Every request performs exactly one round trip and returns the
/// response uninterpreted.
///
/// ## Examples
///
/// ```rust,ignore
/// use warrant::{ApiClient, Config, Params, RequestOptions};
///
/// let client = ApiClient::new(Config::from_env()?)?;
/// let url = client.config().api_url(&["v2", "objects"])?;
/// let response = client
///     .get(url, &Params::new().with("object_type", "user"), &RequestOptions::default())
///     .await?;
/// let page: serde_json::Value = response.json()?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: Config,
}

impl ApiClient {
    pub fn builder(config: Config) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Creates a client with default transport settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, WarrantError> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issues a GET with `params` encoded as the query string.
    pub async fn get(
        &self,
        url: Url,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<RawResponse, WarrantError> {
        self.send(RestMethod::Get, url, params, options).await
    }

    /// Issues a POST with `body` encoded as JSON.
    pub async fn post(
        &self,
        url: Url,
        body: &Params,
        options: &RequestOptions,
    ) -> Result<RawResponse, WarrantError> {
        self.send(RestMethod::Post, url, body, options).await
    }

    /// Issues a PUT with `body` encoded as JSON.
    pub async fn put(
        &self,
        url: Url,
        body: &Params,
        options: &RequestOptions,
    ) -> Result<RawResponse, WarrantError> {
        self.send(RestMethod::Put, url, body, options).await
    }

    /// Issues a DELETE. A non-empty `body` is sent as JSON.
    pub async fn delete(
        &self,
        url: Url,
        body: &Params,
        options: &RequestOptions,
    ) -> Result<RawResponse, WarrantError> {
        self.send(RestMethod::Delete, url, body, options).await
    }

    #[instrument(
        name = "api_request",
        skip(self, method, url, params, options),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn send(
        &self,
        method: RestMethod,
        mut url: Url,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<RawResponse, WarrantError> {
        let normalized = normalize(params);

        if !method.sends_body() {
            append_query(&mut url, &normalized);
        }
        Span::current().record("http.url", url.as_str());

        let mut request = self.client.request(method.to_reqwest(), url);

        if method.sends_body() && !(method == RestMethod::Delete && normalized.is_empty()) {
            request = request.json(&Value::Object(normalized));
        }

        if let Some(api_key) = self.config.api_key() {
            request = request.header(AUTHORIZATION, format!("ApiKey {api_key}"));
        }
        if let Some(token) = &options.warrant_token {
            request = request.header(WARRANT_TOKEN_HEADER, token.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());
        let otel_status = if status.is_success() {
            "OK"
        } else if status.is_server_error() {
            "ERROR"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        let headers = response.headers().clone();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "API request failed");
        }

        Ok(RawResponse::new(status, headers, body))
    }
}

/// Appends normalized parameters to `url` as a query string.
///
/// Sequences repeat their key. Nested mappings are sent as JSON text.
fn append_query(url: &mut Url, params: &Map<String, Value>) {
    if params.is_empty() {
        return;
    }

    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.append_pair(key, &query_value(item));
                }
            }
            other => {
                pairs.append_pair(key, &query_value(other));
            }
        }
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
