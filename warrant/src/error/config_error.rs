use thiserror::Error;

/// Errors raised while building or reading a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configured base URL could not be parsed.
    #[error("invalid {field} URL '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// A base URL cannot carry path segments (e.g. `mailto:`).
    #[error("{0} cannot be used as a base URL")]
    CannotBeABase(String),

    /// The TLS flag could not be switched for the given URL.
    #[error("cannot change scheme of '{0}'")]
    Scheme(String),

    /// A boolean environment variable held something other than a boolean.
    #[error("invalid value '{value}' for {name}: expected true or false")]
    InvalidFlag { name: &'static str, value: String },

    /// A header name or value was rejected.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}
