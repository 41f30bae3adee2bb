//! Relationship tuple writes and listing.

use crate::client::{RequestOptions, WarrantClient};
use crate::error::WarrantError;
use crate::params::Params;
use crate::types::{ListOptions, ListResponse, Referenceable, Warrant};

/// Filters for [`WarrantClient::list_warrants`]. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarrantFilter {
    pub object_type: Option<String>,
    pub object_id: Option<String>,
    pub relation: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub subject_relation: Option<String>,
}

impl WarrantFilter {
    pub fn object(object: &impl Referenceable) -> Self {
        Self {
            object_type: Some(object.object_type().to_string()),
            object_id: Some(object.object_id().to_string()),
            ..Self::default()
        }
    }

    pub fn subject(subject: &impl Referenceable) -> Self {
        Self::default().with_subject(subject)
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn with_subject(mut self, subject: &impl Referenceable) -> Self {
        self.subject_type = Some(subject.object_type().to_string());
        self.subject_id = Some(subject.object_id().to_string());
        self.subject_relation = subject.relation().map(str::to_string);
        self
    }

    fn to_params(&self) -> Params {
        Params::new()
            .with("object_type", self.object_type.as_deref())
            .with("object_id", self.object_id.as_deref())
            .with("relation", self.relation.as_deref())
            .with("subject_type", self.subject_type.as_deref())
            .with("subject_id", self.subject_id.as_deref())
            .with("subject_relation", self.subject_relation.as_deref())
    }
}

/// Writes carry the subject as an explicit object, relation included.
fn tuple_params(
    object: &impl Referenceable,
    relation: &str,
    subject: &impl Referenceable,
    policy: Option<&str>,
) -> Params {
    Params::new()
        .with("object_type", object.object_type())
        .with("object_id", object.object_id())
        .with("relation", relation)
        .with(
            "subject",
            Params::new()
                .with("object_type", subject.object_type())
                .with("object_id", subject.object_id())
                .with("relation", subject.relation()),
        )
        .with("policy", policy)
}

impl WarrantClient {
    /// Grants `subject` the `relation` on `object`.
    ///
    /// The returned warrant carries the write's consistency token.
    pub async fn create_warrant(
        &self,
        object: &impl Referenceable,
        relation: &str,
        subject: &impl Referenceable,
        policy: Option<&str>,
        options: &RequestOptions,
    ) -> Result<Warrant, WarrantError> {
        let url = self.config().api_url(&["v2", "warrants"])?;
        let params = tuple_params(object, relation, subject, policy);

        let response = self.api().post(url, &params, options).await?;
        let token = response.warrant_token().map(str::to_string);
        let mut warrant: Warrant = response.json()?;
        warrant.warrant_token = token;
        Ok(warrant)
    }

    /// Revokes a warrant. Returns the consistency token of the delete.
    pub async fn delete_warrant(
        &self,
        object: &impl Referenceable,
        relation: &str,
        subject: &impl Referenceable,
        policy: Option<&str>,
        options: &RequestOptions,
    ) -> Result<Option<String>, WarrantError> {
        let url = self.config().api_url(&["v2", "warrants"])?;
        let params = tuple_params(object, relation, subject, policy);

        let response = self
            .api()
            .delete(url, &params, options)
            .await?
            .into_result()?;
        Ok(response.warrant_token().map(str::to_string))
    }

    pub async fn list_warrants(
        &self,
        filter: &WarrantFilter,
        list: &ListOptions,
        options: &RequestOptions,
    ) -> Result<ListResponse<Warrant>, WarrantError> {
        let url = self.config().api_url(&["v2", "warrants"])?;
        let mut params = filter.to_params();
        params.merge(list.to_params());

        self.api().get(url, &params, options).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::types::{ObjectRef, Subject};
    use serde_json::{json, Value};

    #[test]
    fn test_tuple_params_userset_subject() {
        let params = tuple_params(
            &ObjectRef::new("document", "d1"),
            "viewer",
            &Subject::userset("role", "editor", "member"),
            None,
        );

        assert_eq!(
            Value::Object(normalize(&params)),
            json!({
                "objectType": "document",
                "objectId": "d1",
                "relation": "viewer",
                "subject": {"objectType": "role", "objectId": "editor", "relation": "member"}
            })
        );
    }

    #[test]
    fn test_filter_params() {
        let filter = WarrantFilter::object(&ObjectRef::new("tenant", "acme"))
            .with_relation("member")
            .with_subject(&Subject::new("user", "7"));

        assert_eq!(
            Value::Object(normalize(&filter.to_params())),
            json!({
                "objectType": "tenant",
                "objectId": "acme",
                "relation": "member",
                "subjectType": "user",
                "subjectId": "7"
            })
        );
    }
}
