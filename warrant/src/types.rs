//! Value objects exchanged with the Warrant API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Anything that can be addressed as an `<object_type>:<object_id>` pair.
///
/// Both raw id pairs ([`ObjectRef`]) and decoded API objects implement
/// this, so call sites accept either.
pub trait Referenceable {
    /// The object type, e.g. `"user"`.
    fn object_type(&self) -> &str;

    /// The object id within its type.
    fn object_id(&self) -> &str;

    /// The relation of a userset reference (`role:admin#member`).
    fn relation(&self) -> Option<&str> {
        None
    }
}

/// The object types built into every Warrant environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ObjectType {
    User,
    Tenant,
    Role,
    Permission,
    Feature,
    PricingTier,
}

impl From<ObjectType> for String {
    fn from(object_type: ObjectType) -> Self {
        object_type.as_ref().to_string()
    }
}

/// A bare `(object_type, object_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_type: String,
    pub object_id: String,
}

impl ObjectRef {
    pub fn new(object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            object_id: object_id.into(),
        }
    }
}

impl Referenceable for ObjectRef {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn object_id(&self) -> &str {
        &self.object_id
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.object_id)
    }
}

/// Error returned when a string is not of the form `type:id[#relation]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid object reference '{0}': expected <type>:<id>")]
pub struct ParseRefError(String);

impl FromStr for ObjectRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((object_type, object_id)) if !object_type.is_empty() && !object_id.is_empty() => {
                Ok(Self::new(object_type, object_id))
            }
            _ => Err(ParseRefError(s.to_string())),
        }
    }
}

/// The actor side of a relationship tuple.
///
/// Either a concrete object (`user:42`) or a userset
/// (`role:admin#member`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub object_type: String,
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

impl Subject {
    pub fn new(object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            object_id: object_id.into(),
            relation: None,
        }
    }

    /// Creates a userset subject, e.g. every `member` of `role:admin`.
    pub fn userset(
        object_type: impl Into<String>,
        object_id: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            object_id: object_id.into(),
            relation: Some(relation.into()),
        }
    }

    /// Copies any referenceable value into an owned subject.
    pub fn of(reference: &impl Referenceable) -> Self {
        Self {
            object_type: reference.object_type().to_string(),
            object_id: reference.object_id().to_string(),
            relation: reference.relation().map(str::to_string),
        }
    }
}

impl Referenceable for Subject {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn object_id(&self) -> &str {
        &self.object_id
    }

    fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.object_id)?;
        if let Some(relation) = &self.relation {
            write!(f, "#{relation}")?;
        }
        Ok(())
    }
}

impl FromStr for Subject {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (reference, relation) = match s.split_once('#') {
            Some((reference, relation)) if !relation.is_empty() => (reference, Some(relation)),
            Some(_) => return Err(ParseRefError(s.to_string())),
            None => (s, None),
        };
        let object = ObjectRef::from_str(reference).map_err(|_| ParseRefError(s.to_string()))?;

        Ok(Self {
            object_type: object.object_type,
            object_id: object.object_id,
            relation: relation.map(str::to_string),
        })
    }
}

/// An object stored by the Warrant service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub object_type: String,
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Consistency token from the write that produced this object.
    #[serde(skip)]
    pub warrant_token: Option<String>,
}

impl Referenceable for Object {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn object_id(&self) -> &str {
        &self.object_id
    }
}

/// A relationship tuple `(object_type, object_id, relation, subject)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warrant {
    pub object_type: String,
    pub object_id: String,
    pub relation: String,
    pub subject: Subject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Consistency token from the write that produced this warrant.
    #[serde(skip)]
    pub warrant_token: Option<String>,
}

impl Referenceable for Warrant {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn object_id(&self) -> &str {
        &self.object_id
    }
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Cursor pagination shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub prev_cursor: Option<String>,
    pub next_cursor: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ListOptions {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn after(mut self, next_cursor: impl Into<String>) -> Self {
        self.next_cursor = Some(next_cursor.into());
        self
    }

    pub fn before(mut self, prev_cursor: impl Into<String>) -> Self {
        self.prev_cursor = Some(prev_cursor.into());
        self
    }

    pub fn sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }
}

/// One page of results plus the cursors around it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub prev_cursor: Option<String>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A single row returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub object_type: String,
    pub object_id: String,
    pub warrant: Warrant,
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default)]
    pub meta: Option<Value>,
}

impl Referenceable for QueryResult {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn object_id(&self) -> &str {
        &self.object_id
    }
}

pub type QueryResponse = ListResponse<QueryResult>;
