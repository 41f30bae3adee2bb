//! Builder for the query-language expression sent as the `q` parameter.
//!
//! ```text
//! SELECT [explicit ]<types> FOR <clause> [WHERE <clause>]
//! ```

use std::fmt;

use crate::error::WarrantError;

/// A `FOR` or `WHERE` clause.
///
/// When both a subject and an object are set, the subject is rendered and
/// the object ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryClause {
    object: Option<String>,
    subject: Option<String>,
    context: Vec<(String, String)>,
}

impl QueryClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clause filtering on an object, e.g. `"report:q3"`.
    pub fn object(object: impl fmt::Display) -> Self {
        Self::new().with_object(object)
    }

    /// A clause filtering on a subject, e.g. `"user:42"`.
    pub fn subject(subject: impl fmt::Display) -> Self {
        Self::new().with_subject(subject)
    }

    pub fn with_object(mut self, object: impl fmt::Display) -> Self {
        self.object = Some(object.to_string());
        self
    }

    pub fn with_subject(mut self, subject: impl fmt::Display) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Adds a context pair. Keys keep their casing; a repeated key replaces
    /// the earlier value in place.
    pub fn with_context(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set_context(key.into(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.object.is_none() && self.subject.is_none() && self.context.is_empty()
    }

    fn set_context(&mut self, key: String, value: String) {
        match self.context.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.context.push((key, value)),
        }
    }

    fn merge(&mut self, other: QueryClause) {
        if other.object.is_some() {
            self.object = other.object;
        }
        if other.subject.is_some() {
            self.subject = other.subject;
        }
        for (key, value) in other.context {
            self.set_context(key, value);
        }
    }
}

impl fmt::Display for QueryClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match (&self.subject, &self.object) {
            (Some(subject), _) => Some(format!("subject={subject}")),
            (None, Some(object)) => Some(format!("object={object}")),
            (None, None) => None,
        };

        if let Some(target) = &target {
            f.write_str(target)?;
        }

        if !self.context.is_empty() {
            if target.is_some() {
                f.write_str(" AND ")?;
            }
            let pairs: Vec<String> = self.context.iter().map(|(k, v)| format!("{k}={v}")).collect();
            write!(f, "context=[{}]", pairs.join(" "))?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SelectClause {
    explicit: bool,
    types: Vec<String>,
}

/// A query expression, built incrementally and rendered once.
///
/// ## Examples
///
/// ```
/// use warrant::{Query, QueryClause};
///
/// let q = Query::new()
///     .select(["permission"])
///     .for_clause(QueryClause::subject("user:42"))
///     .where_clause(QueryClause::new().with_context("env", "prod"))
///     .render()
///     .unwrap();
///
/// assert_eq!(q, "SELECT permission FOR subject=user:42 WHERE context=[env=prod]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    select: Option<SelectClause>,
    for_clause: QueryClause,
    where_clause: QueryClause,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects object types, including results implied by inheritance.
    pub fn select<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select
            .get_or_insert_with(SelectClause::default)
            .types
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// Selects object types, keeping only explicitly granted results.
    pub fn select_explicit<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self = self.select(types);
        if let Some(select) = self.select.as_mut() {
            select.explicit = true;
        }
        self
    }

    /// Merges `clause` into the `FOR` clause.
    pub fn for_clause(mut self, clause: QueryClause) -> Self {
        self.for_clause.merge(clause);
        self
    }

    /// Merges `clause` into the `WHERE` clause.
    pub fn where_clause(mut self, clause: QueryClause) -> Self {
        self.where_clause.merge(clause);
        self
    }

    /// Renders the expression.
    ///
    /// ## Errors
    ///
    /// Returns [`WarrantError::InvalidQuery`] if no types are selected or the
    /// `FOR` clause is empty.
    pub fn render(&self) -> Result<String, WarrantError> {
        let select = self
            .select
            .as_ref()
            .filter(|s| !s.types.is_empty())
            .ok_or_else(|| WarrantError::InvalidQuery("a select clause is required".into()))?;

        if self.for_clause.is_empty() {
            return Err(WarrantError::InvalidQuery("a for clause is required".into()));
        }

        let mut out = String::from("SELECT ");
        if select.explicit {
            out.push_str("explicit ");
        }
        out.push_str(&select.types.join(","));
        out.push_str(&format!(" FOR {}", self.for_clause));

        if !self.where_clause.is_empty() {
            out.push_str(&format!(" WHERE {}", self.where_clause));
        }

        Ok(out)
    }
}
