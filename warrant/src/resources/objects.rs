//! Object CRUD.
//!
//! Users, tenants, roles, permissions, features and pricing tiers are all
//! objects of a built-in [`ObjectType`](crate::ObjectType), so one set of
//! operations serves every resource.

use serde_json::Value;
use url::Url;

use crate::client::{RequestOptions, WarrantClient};
use crate::error::WarrantError;
use crate::params::Params;
use crate::response::RawResponse;
use crate::types::{ListOptions, ListResponse, Object, Referenceable};

impl WarrantClient {
    /// Creates an object. Without an id, the server generates one.
    ///
    /// `meta` keys are camelCased like every other parameter.
    pub async fn create_object(
        &self,
        object_type: impl AsRef<str>,
        object_id: Option<&str>,
        meta: Option<Value>,
        options: &RequestOptions,
    ) -> Result<Object, WarrantError> {
        let url = self.config().api_url(&["v2", "objects"])?;
        let params = Params::new()
            .with("object_type", object_type.as_ref())
            .with("object_id", object_id)
            .with("meta", meta);

        let response = self.api().post(url, &params, options).await?;
        with_token(response)
    }

    pub async fn get_object(
        &self,
        object: &impl Referenceable,
        options: &RequestOptions,
    ) -> Result<Object, WarrantError> {
        let url = self.object_url(object)?;
        self.api().get(url, &Params::new(), options).await?.json()
    }

    /// Replaces an object's meta.
    pub async fn update_object(
        &self,
        object: &impl Referenceable,
        meta: Value,
        options: &RequestOptions,
    ) -> Result<Object, WarrantError> {
        let url = self.object_url(object)?;
        let params = Params::new().with("meta", meta);

        let response = self.api().put(url, &params, options).await?;
        with_token(response)
    }

    /// Deletes an object and every warrant that references it.
    ///
    /// Returns the consistency token of the delete, if the server sent one.
    pub async fn delete_object(
        &self,
        object: &impl Referenceable,
        options: &RequestOptions,
    ) -> Result<Option<String>, WarrantError> {
        let url = self.object_url(object)?;
        let response = self
            .api()
            .delete(url, &Params::new(), options)
            .await?
            .into_result()?;

        Ok(response.warrant_token().map(str::to_string))
    }

    /// Lists objects, optionally restricted to one type.
    pub async fn list_objects(
        &self,
        object_type: Option<&str>,
        list: &ListOptions,
        options: &RequestOptions,
    ) -> Result<ListResponse<Object>, WarrantError> {
        let url = self.config().api_url(&["v2", "objects"])?;
        let mut params = list.to_params();
        params.insert("object_type", object_type);

        self.api().get(url, &params, options).await?.json()
    }

    fn object_url(&self, object: &impl Referenceable) -> Result<Url, WarrantError> {
        Ok(self
            .config()
            .api_url(&["v2", "objects", object.object_type(), object.object_id()])?)
    }
}

fn with_token(response: RawResponse) -> Result<Object, WarrantError> {
    let token = response.warrant_token().map(str::to_string);
    let mut object: Object = response.json()?;
    object.warrant_token = token;
    Ok(object)
}
