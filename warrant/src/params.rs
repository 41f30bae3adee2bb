//! Request parameter structures.
//!
//! Call sites describe a request as [`Params`], written with Rust-side
//! snake_case keys. The executor hands them to [`normalize`](crate::normalize)
//! exactly once before anything goes on the wire.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde_json::{Number, Value};

use crate::types::{Referenceable, Subject};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Absent. The key is dropped during normalization.
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Param>),
    Map(Params),
    /// A reference to an object or userset.
    Reference(Subject),
    /// Arbitrary JSON that is normalized like any other mapping.
    Json(Value),
}

impl Param {
    /// Wraps anything [`Referenceable`] as a reference parameter.
    pub fn reference(reference: &impl Referenceable) -> Self {
        Self::Reference(Subject::of(reference))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! param_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

param_from_integer!(i32, i64, u32, u64, usize);

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Param {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<Params> for Param {
    fn from(value: Params) -> Self {
        Self::Map(value)
    }
}

impl From<Subject> for Param {
    fn from(value: Subject) -> Self {
        Self::Reference(value)
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A mapping of parameter names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    ///
    /// ## Examples
    ///
    /// ```
    /// use warrant::Params;
    ///
    /// let params = Params::new()
    ///     .with("object_type", "user")
    ///     .with("limit", 10)
    ///     .with("next_cursor", None::<String>);
    /// assert_eq!(params.len(), 3);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) -> Option<Param> {
        self.0.insert(key.into(), value.into())
    }

    /// Copies every entry of `other` into `self`, overwriting on conflict.
    pub fn merge(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.0.get(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Param> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Param);
    type IntoIter = btree_map::Iter<'a, String, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectRef;
    use serde_json::json;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Param::from(true), Param::Bool(true));
        assert_eq!(Param::from(7_u32), Param::Number(7.into()));
        assert_eq!(Param::from("a"), Param::String("a".into()));
        assert_eq!(Param::from(f64::NAN), Param::Null);
        assert_eq!(Param::from(None::<&str>), Param::Null);
        assert_eq!(Param::from(Some("x")), Param::String("x".into()));
    }

    #[test]
    fn test_reference_from_referenceable() {
        let param = Param::reference(&ObjectRef::new("user", "42"));
        assert_eq!(param, Param::Reference(Subject::new("user", "42")));
    }

    #[test]
    fn test_collect_and_merge() {
        let mut params: Params = [("a", 1), ("b", 2)].into_iter().collect();
        params.merge(Params::new().with("b", json!(3)).with("c", vec!["x", "y"]));

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("b"), Some(&Param::Json(json!(3))));
        assert!(matches!(params.get("c"), Some(Param::List(items)) if items.len() == 2));
    }
}
