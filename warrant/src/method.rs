//! HTTP methods used by the Warrant API.

use strum::{Display, EnumIter, EnumString};

/// The HTTP methods the request executor issues.
///
/// ## Examples
///
/// ```rust
/// use warrant::RestMethod;
///
/// let method = RestMethod::Delete;
/// assert!(method.sends_body());
///
/// let parsed: RestMethod = "GET".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Get);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - parameters travel in the query string.
    Get,
    /// HTTP POST - create a resource or run a check.
    Post,
    /// HTTP PUT - update a resource.
    Put,
    /// HTTP DELETE - remove a resource; warrant deletes carry a body.
    Delete,
}

impl RestMethod {
    /// Returns `true` if parameters are sent as a JSON body rather than a
    /// query string.
    pub fn sends_body(&self) -> bool {
        !matches!(self, Self::Get)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
