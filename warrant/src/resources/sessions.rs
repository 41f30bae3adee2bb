//! Authorization and self-service dashboard sessions.

use serde::Deserialize;
use strum::{AsRefStr, Display};
use url::Url;

use crate::client::{RequestOptions, WarrantClient};
use crate::error::WarrantError;
use crate::params::Params;

const SESSION_TYPE_AUTHORIZATION: &str = "sess";
const SESSION_TYPE_SELF_SERVICE: &str = "ssdash";

/// Which access model the self-service dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SelfServiceStrategy {
    /// Role-based access control.
    Rbac,
    /// Fine-grained access control.
    Fgac,
}

#[derive(Debug, Deserialize)]
struct SessionToken {
    token: String,
}

impl WarrantClient {
    /// Creates a session token a frontend can use to make checks on behalf
    /// of `user_id`.
    pub async fn create_authorization_session(
        &self,
        user_id: &str,
        tenant_id: Option<&str>,
        ttl_seconds: Option<u64>,
        options: &RequestOptions,
    ) -> Result<String, WarrantError> {
        let params = Params::new()
            .with("type", SESSION_TYPE_AUTHORIZATION)
            .with("user_id", user_id)
            .with("tenant_id", tenant_id)
            .with("ttl", ttl_seconds);

        Ok(self.create_session(&params, options).await?.token)
    }

    /// Creates a self-service dashboard session and returns the URL to send
    /// the user to. The dashboard redirects to `redirect_url` when done.
    pub async fn create_self_service_session(
        &self,
        user_id: &str,
        tenant_id: &str,
        strategy: SelfServiceStrategy,
        redirect_url: &str,
        ttl_seconds: Option<u64>,
        options: &RequestOptions,
    ) -> Result<Url, WarrantError> {
        let params = Params::new()
            .with("type", SESSION_TYPE_SELF_SERVICE)
            .with("user_id", user_id)
            .with("tenant_id", tenant_id)
            .with("self_service_strategy", strategy.as_ref())
            .with("ttl", ttl_seconds);

        let session = self.create_session(&params, options).await?;

        let mut url = self.config().self_service_url(&[session.token.as_str()])?;
        url.query_pairs_mut().append_pair("redirectUrl", redirect_url);

        Ok(url)
    }

    async fn create_session(
        &self,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<SessionToken, WarrantError> {
        let url = self.config().api_url(&["v2", "sessions"])?;
        self.api().post(url, params, options).await?.json()
    }
}
