use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter};
use thiserror::Error;

use crate::case::decamelize;

/// Error code the edge authorize endpoint returns before its cache is warm.
pub(crate) const CACHE_NOT_READY: &str = "cache_not_ready";

/// The kinds of failure the Warrant API reports.
///
/// Selected by the `code` field of the error body. Codes this client does
/// not know map to [`ErrorKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    DuplicateRecord,
    Forbidden,
    InternalError,
    InvalidRequest,
    InvalidParameter,
    MissingRequiredParameter,
    NotFound,
    Unauthorized,
    UnknownOrigin,
    Generic,
}

impl ErrorKind {
    /// Maps a server error code to its kind.
    ///
    /// ## Examples
    ///
    /// ```
    /// use warrant::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_code("not_found"), ErrorKind::NotFound);
    /// assert_eq!(ErrorKind::from_code("something_new"), ErrorKind::Generic);
    /// ```
    pub fn from_code(code: &str) -> Self {
        match code {
            "duplicate_record" => Self::DuplicateRecord,
            "forbidden" => Self::Forbidden,
            "internal_error" => Self::InternalError,
            "invalid_request" => Self::InvalidRequest,
            "invalid_parameter" => Self::InvalidParameter,
            "missing_required_parameter" => Self::MissingRequiredParameter,
            "not_found" => Self::NotFound,
            "unauthorized" => Self::Unauthorized,
            "unknown_origin" => Self::UnknownOrigin,
            _ => Self::Generic,
        }
    }
}

/// A failed API response, classified by its error code.
///
/// Carries the full HTTP context so callers can log or inspect exactly what
/// the server sent.
#[derive(Debug, Clone, Error)]
#[error("{kind} (HTTP {}): {message}", .status.as_u16())]
pub struct ApiError {
    kind: ErrorKind,
    code: Option<String>,
    message: String,
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    json: Value,
}

impl ApiError {
    /// Classifies a failed response.
    ///
    /// A body that is not JSON still yields an error: it is classified as
    /// [`ErrorKind::Generic`] and `json()` returns `Value::Null`.
    pub fn from_response(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

        let code = json.get("code").and_then(Value::as_str).map(str::to_string);
        let kind = code.as_deref().map_or(ErrorKind::Generic, ErrorKind::from_code);

        let message = match json.get("message").and_then(Value::as_str) {
            Some(message) => decamelize(message),
            None => status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_string(), decamelize),
        };

        Self {
            kind,
            code,
            message,
            status,
            headers,
            body,
            json,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The raw `code` field from the error body.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The server's message, rewritten from CamelCase to snake_case.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The response body exactly as received.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The response body parsed as JSON, or `Value::Null` if it was not JSON.
    pub fn json(&self) -> &Value {
        &self.json
    }

    pub(crate) fn is_cache_not_ready(&self) -> bool {
        self.code.as_deref() == Some(CACHE_NOT_READY)
    }
}
