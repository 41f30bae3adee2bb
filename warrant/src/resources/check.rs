//! Access checks.
//!
//! When an edge authorize endpoint is configured, checks go there first. If
//! the edge answers `cache_not_ready`, the same request is sent once to the
//! primary API endpoint. No other failure is retried.

use std::slice;

use serde_json::Value;
use strum::{AsRefStr, Display};
use tracing::warn;
use url::Url;

use crate::client::{RequestOptions, WarrantClient};
use crate::error::WarrantError;
use crate::params::Params;
use crate::resources::relations::MEMBER;
use crate::response::CheckResult;
use crate::types::{ObjectRef, ObjectType, Referenceable, Subject};

const CHECK_PATH: [&str; 2] = ["v2", "check"];

/// How a batch of checks combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum CheckOp {
    /// Authorized if any check passes.
    #[strum(serialize = "anyOf")]
    AnyOf,
    /// Authorized only if every check passes.
    #[strum(serialize = "allOf")]
    AllOf,
}

/// A single "does `subject` have `relation` on `object`?" question.
#[derive(Debug, Clone, PartialEq)]
pub struct WarrantCheck {
    pub object: ObjectRef,
    pub relation: String,
    pub subject: Subject,
    /// Policy context. Keys are sent exactly as given.
    pub context: Option<Value>,
}

impl WarrantCheck {
    pub fn new(
        object: &impl Referenceable,
        relation: impl Into<String>,
        subject: &impl Referenceable,
    ) -> Self {
        Self {
            object: ObjectRef::new(object.object_type(), object.object_id()),
            relation: relation.into(),
            subject: Subject::of(subject),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    fn to_params(&self) -> Params {
        Params::new()
            .with("object_type", self.object.object_type.as_str())
            .with("object_id", self.object.object_id.as_str())
            .with("relation", self.relation.as_str())
            .with("subject", self.subject.clone())
            .with("context", self.context.clone())
    }
}

fn check_params(op: Option<CheckOp>, checks: &[WarrantCheck], debug: bool) -> Params {
    Params::new()
        .with("op", op.map(|op| op.to_string()))
        .with(
            "warrants",
            checks.iter().map(WarrantCheck::to_params).collect::<Vec<_>>(),
        )
        .with("debug", debug.then_some(true))
}

impl WarrantClient {
    /// Runs a single check.
    pub async fn check(
        &self,
        check: &WarrantCheck,
        options: &RequestOptions,
    ) -> Result<CheckResult, WarrantError> {
        self.authorize(check_params(None, slice::from_ref(check), false), options)
            .await
    }

    /// Runs several checks combined with `op`.
    ///
    /// With `debug` set, the server adds evaluation details to its response.
    /// Plain verdicts still map to [`CheckResult::Decision`].
    pub async fn check_many(
        &self,
        op: CheckOp,
        checks: &[WarrantCheck],
        debug: bool,
        options: &RequestOptions,
    ) -> Result<CheckResult, WarrantError> {
        self.authorize(check_params(Some(op), checks, debug), options)
            .await
    }

    /// Runs a single check and requires a plain verdict.
    ///
    /// ## Errors
    ///
    /// Returns [`WarrantError::UnexpectedResponse`] if the server answered
    /// with something other than `Authorized` or `Not Authorized`.
    pub async fn is_authorized(
        &self,
        check: &WarrantCheck,
        options: &RequestOptions,
    ) -> Result<bool, WarrantError> {
        match self.check(check, options).await? {
            CheckResult::Decision(allowed) => Ok(allowed),
            CheckResult::Raw(body) => Err(WarrantError::UnexpectedResponse(format!(
                "check returned no verdict: {body}"
            ))),
        }
    }

    /// Whether `subject` is a member of `permission:<permission_id>`.
    pub async fn has_permission(
        &self,
        permission_id: &str,
        subject: &impl Referenceable,
        options: &RequestOptions,
    ) -> Result<bool, WarrantError> {
        let permission = ObjectRef::new(ObjectType::Permission, permission_id);
        self.is_authorized(&WarrantCheck::new(&permission, MEMBER, subject), options)
            .await
    }

    /// Whether `subject` is a member of `feature:<feature_id>`.
    pub async fn has_feature(
        &self,
        feature_id: &str,
        subject: &impl Referenceable,
        options: &RequestOptions,
    ) -> Result<bool, WarrantError> {
        let feature = ObjectRef::new(ObjectType::Feature, feature_id);
        self.is_authorized(&WarrantCheck::new(&feature, MEMBER, subject), options)
            .await
    }

    async fn authorize(
        &self,
        params: Params,
        options: &RequestOptions,
    ) -> Result<CheckResult, WarrantError> {
        if let Some(edge_url) = self.config().authorize_url(&CHECK_PATH).transpose()? {
            match self.post_check(edge_url, &params, options).await {
                Err(WarrantError::Api(err)) if err.is_cache_not_ready() => {
                    warn!("edge authorize cache not ready, falling back to API endpoint");
                }
                result => return result,
            }
        }

        let url = self.config().api_url(&CHECK_PATH)?;
        self.post_check(url, &params, options).await
    }

    async fn post_check(
        &self,
        url: Url,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<CheckResult, WarrantError> {
        let body: Value = self.api().post(url, params, options).await?.json()?;
        Ok(CheckResult::from_body(body))
    }
}
