//! Rewrites request parameters into the API's wire shape.
//!
//! The rewrite is a single visitor pass with a few short-circuit rules:
//!
//! - null values drop their key entirely
//! - the `context` key keeps its value verbatim, without descending into it
//! - a reference without a relation collapses to `"<type>:<id>"`
//! - every other mapping key is camelCased, at every depth

use serde_json::{Map, Value};

use crate::case::camelize;
use crate::params::{Param, Params};
use crate::types::Subject;

/// Key whose value is user-defined and must keep its original casing.
pub const CONTEXT_KEY: &str = "context";

/// Normalizes a parameter mapping into a JSON object.
///
/// When two keys rewrite to the same camelCase key (`user_id` and `userId`),
/// the one already spelled in camelCase wins, whatever the iteration order.
///
/// ## Examples
///
/// ```
/// use serde_json::json;
/// use warrant::{normalize, Params};
///
/// let params = Params::new()
///     .with("object_type", "user")
///     .with("meta", Params::new().with("full_name", "x"));
///
/// assert_eq!(
///     serde_json::Value::Object(normalize(&params)),
///     json!({ "objectType": "user", "meta": { "fullName": "x" } }),
/// );
/// ```
pub fn normalize(params: &Params) -> Map<String, Value> {
    let mut out = Map::new();

    for (key, value) in params {
        if value.is_null() {
            continue;
        }
        if key == CONTEXT_KEY {
            out.insert(key.clone(), verbatim(value));
            continue;
        }
        if let Some(normalized) = normalize_param(value) {
            insert_camelized(&mut out, key, normalized);
        }
    }

    out
}

/// Normalizes a single value. Returns `None` for [`Param::Null`].
pub fn normalize_param(param: &Param) -> Option<Value> {
    match param {
        Param::Null => None,
        Param::Bool(b) => Some(Value::Bool(*b)),
        Param::Number(n) => Some(Value::Number(n.clone())),
        Param::String(s) => Some(Value::String(s.clone())),
        Param::List(items) => Some(Value::Array(
            items
                .iter()
                .map(|item| normalize_param(item).unwrap_or(Value::Null))
                .collect(),
        )),
        Param::Map(params) => Some(Value::Object(normalize(params))),
        Param::Reference(subject) => Some(reference(subject)),
        Param::Json(value) => normalize_value(value),
    }
}

/// Normalizes plain JSON with the same rules as [`normalize`].
pub fn normalize_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, value) in map {
                if value.is_null() {
                    continue;
                }
                if key == CONTEXT_KEY {
                    out.insert(key.clone(), value.clone());
                } else if let Some(normalized) = normalize_value(value) {
                    insert_camelized(&mut out, key, normalized);
                }
            }
            Some(Value::Object(out))
        }
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .map(|item| normalize_value(item).unwrap_or(Value::Null))
                .collect(),
        )),
        scalar => Some(scalar.clone()),
    }
}

/// Inserts under the camelCased key. A key that was already camelCase
/// overwrites a rewritten one, never the other way round.
fn insert_camelized(out: &mut Map<String, Value>, key: &str, value: Value) {
    let camel = camelize(key);
    if camel == key {
        out.insert(camel, value);
    } else {
        out.entry(camel).or_insert(value);
    }
}

fn reference(subject: &Subject) -> Value {
    match &subject.relation {
        None => Value::String(format!("{}:{}", subject.object_type, subject.object_id)),
        Some(relation) => {
            let mut out = Map::new();
            out.insert("objectType".into(), Value::String(subject.object_type.clone()));
            out.insert("objectId".into(), Value::String(subject.object_id.clone()));
            out.insert("relation".into(), Value::String(relation.clone()));
            Value::Object(out)
        }
    }
}

/// Converts a value to JSON without touching any key.
fn verbatim(param: &Param) -> Value {
    match param {
        Param::Null => Value::Null,
        Param::Bool(b) => Value::Bool(*b),
        Param::Number(n) => Value::Number(n.clone()),
        Param::String(s) => Value::String(s.clone()),
        Param::List(items) => Value::Array(items.iter().map(verbatim).collect()),
        Param::Map(params) => Value::Object(
            params
                .iter()
                .map(|(k, v)| (k.clone(), verbatim(v)))
                .collect(),
        ),
        Param::Reference(subject) => reference(subject),
        Param::Json(value) => value.clone(),
    }
}
