//! Response handling.
//!
//! The executor hands back a [`RawResponse`] without looking at it. Callers
//! branch on the status and either decode the body or turn it into a
//! classified [`ApiError`].

mod check;

pub use check::CheckResult;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, WarrantError};

/// Header carrying the consistency token on writes, and accepted on reads.
pub const WARRANT_TOKEN_HEADER: &str = "warrant-token";

/// An uninterpreted HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `Warrant-Token` response header, if present.
    pub fn warrant_token(&self) -> Option<&str> {
        self.headers
            .get(WARRANT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    /// Classifies this response as an [`ApiError`], whatever its status.
    pub fn into_api_error(self) -> ApiError {
        ApiError::from_response(self.status, self.headers, self.body)
    }

    /// Passes a success response through and classifies anything else.
    ///
    /// ## Errors
    ///
    /// Returns [`WarrantError::Api`] for any non-2xx status.
    pub fn into_result(self) -> Result<Self, WarrantError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_api_error().into())
        }
    }

    /// Decodes a success body as `T`.
    ///
    /// ## Errors
    ///
    /// Returns [`WarrantError::Api`] for a non-2xx status and
    /// [`WarrantError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, WarrantError> {
        let response = self.into_result()?;
        Ok(serde_json::from_str(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use reqwest::header::HeaderValue;
    use serde_json::{json, Value};

    fn response(status: u16, body: Value) -> RawResponse {
        RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.to_string(),
        )
    }

    #[test]
    fn test_json_success() {
        let value: Value = response(200, json!({"token": "abc"})).json().unwrap();
        assert_eq!(value["token"], "abc");
    }

    #[test]
    fn test_json_failure_is_classified() {
        let err = response(404, json!({"code": "not_found", "message": "ObjectNotFound"}))
            .json::<Value>()
            .unwrap_err();

        let api = err.as_api_error().unwrap();
        assert_eq!(api.kind(), ErrorKind::NotFound);
        assert_eq!(api.message(), "object_not_found");
    }

    #[test]
    fn test_decode_error() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Token {
            token: String,
        }

        let err = response(200, json!({"nope": 1})).json::<Token>().unwrap_err();
        assert!(matches!(err, WarrantError::Decode(_)));
    }

    #[test]
    fn test_warrant_token_header() {
        let mut headers = HeaderMap::new();
        headers.insert("warrant-token", HeaderValue::from_static("tok_1"));
        let response = RawResponse::new(StatusCode::OK, headers, String::new());
        assert_eq!(response.warrant_token(), Some("tok_1"));
    }
}
