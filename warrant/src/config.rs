//! Client configuration.
//!
//! A [`Config`] is built once and handed to the client, which keeps its own
//! copy. Changing settings means building a new client.

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.warrant.dev";
pub const DEFAULT_SELF_SERVICE_DASH_URL: &str = "https://self-serve.warrant.dev";

pub const ENV_API_KEY: &str = "WARRANT_API_KEY";
pub const ENV_API_ENDPOINT: &str = "WARRANT_API_ENDPOINT";
pub const ENV_AUTHORIZE_ENDPOINT: &str = "WARRANT_AUTHORIZE_ENDPOINT";
pub const ENV_USE_SSL: &str = "WARRANT_USE_SSL";
pub const ENV_SELF_SERVICE_DASH_URL: &str = "WARRANT_SELF_SERVICE_DASH_URL";

/// Connection settings for the Warrant API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_key: Option<String>,
    api_endpoint: Url,
    authorize_endpoint: Option<Url>,
    self_service_dash_url: Url,
    use_ssl: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: default_url(DEFAULT_API_ENDPOINT),
            authorize_endpoint: None,
            self_service_dash_url: default_url(DEFAULT_SELF_SERVICE_DASH_URL),
            use_ssl: true,
        }
    }
}

fn default_url(url: &str) -> Url {
    Url::parse(url).expect("default URLs are valid")
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Builds a configuration from `WARRANT_*` environment variables.
    ///
    /// Unset or blank variables fall back to the defaults.
    ///
    /// ## Errors
    ///
    /// Returns an error if a URL variable does not parse or
    /// `WARRANT_USE_SSL` is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut builder = Self::builder();

        if let Some(key) = var(ENV_API_KEY) {
            builder = builder.api_key(key);
        }
        if let Some(url) = var(ENV_API_ENDPOINT) {
            builder = builder.api_endpoint(url);
        }
        if let Some(url) = var(ENV_AUTHORIZE_ENDPOINT) {
            builder = builder.authorize_endpoint(url);
        }
        if let Some(url) = var(ENV_SELF_SERVICE_DASH_URL) {
            builder = builder.self_service_dash_url(url);
        }
        if let Some(flag) = var(ENV_USE_SSL) {
            builder = builder.use_ssl(parse_flag(ENV_USE_SSL, &flag)?);
        }

        builder.build()
    }

    /// The API key, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn api_endpoint(&self) -> &Url {
        &self.api_endpoint
    }

    pub fn authorize_endpoint(&self) -> Option<&Url> {
        self.authorize_endpoint.as_ref()
    }

    pub fn self_service_dash_url(&self) -> &Url {
        &self.self_service_dash_url
    }

    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    /// Builds a URL on the API endpoint from path segments.
    ///
    /// Segments are percent-encoded individually, so ids containing `/` or
    /// spaces are safe.
    ///
    /// ## Examples
    ///
    /// ```
    /// use warrant::Config;
    ///
    /// let config = Config::default();
    /// let url = config.api_url(&["v2", "objects", "user", "a b"]).unwrap();
    /// assert_eq!(url.as_str(), "https://api.warrant.dev/v2/objects/user/a%20b");
    /// ```
    pub fn api_url(&self, segments: &[&str]) -> Result<Url, ConfigError> {
        self.join(&self.api_endpoint, segments)
    }

    /// Builds a URL on the edge authorize endpoint, when one is configured.
    pub fn authorize_url(&self, segments: &[&str]) -> Option<Result<Url, ConfigError>> {
        self.authorize_endpoint
            .as_ref()
            .map(|base| self.join(base, segments))
    }

    /// Builds a URL on the self-service dashboard from path segments.
    pub fn self_service_url(&self, segments: &[&str]) -> Result<Url, ConfigError> {
        self.join(&self.self_service_dash_url, segments)
    }

    fn join(&self, base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::CannotBeABase(base.to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !self.use_ssl && url.scheme() == "https" {
            url.set_scheme("http")
                .map_err(|()| ConfigError::Scheme(base.to_string()))?;
        }

        Ok(url)
    }
}

/// Builder for [`Config`].
///
/// URL setters take strings and are validated in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    api_endpoint: String,
    authorize_endpoint: Option<String>,
    self_service_dash_url: String,
    use_ssl: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            authorize_endpoint: None,
            self_service_dash_url: DEFAULT_SELF_SERVICE_DASH_URL.to_string(),
            use_ssl: true,
        }
    }
}

impl ConfigBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_endpoint(mut self, url: impl Into<String>) -> Self {
        self.api_endpoint = url.into();
        self
    }

    /// Sets a separate low-latency endpoint for check requests.
    pub fn authorize_endpoint(mut self, url: impl Into<String>) -> Self {
        self.authorize_endpoint = Some(url.into());
        self
    }

    pub fn self_service_dash_url(mut self, url: impl Into<String>) -> Self {
        self.self_service_dash_url = url.into();
        self
    }

    /// When `false`, every URL the client builds is downgraded to plain
    /// `http`, dashboard links included.
    pub fn use_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Validates the URLs and builds the [`Config`].
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if any URL fails to parse.
    pub fn build(self) -> Result<Config, ConfigError> {
        Ok(Config {
            api_key: self.api_key,
            api_endpoint: parse_url("api_endpoint", &self.api_endpoint)?,
            authorize_endpoint: self
                .authorize_endpoint
                .as_deref()
                .map(|url| parse_url("authorize_endpoint", url))
                .transpose()?,
            self_service_dash_url: parse_url("self_service_dash_url", &self.self_service_dash_url)?,
            use_ssl: self.use_ssl,
        })
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
