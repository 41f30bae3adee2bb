//! Typed operations on [`WarrantClient`](crate::WarrantClient).
//!
//! Each operation builds [`Params`], hands them to the executor, and decodes
//! the result. None of them retry.

mod check;
mod objects;
mod query;
mod relations;
mod sessions;
mod warrants;

pub use check::{CheckOp, WarrantCheck};
pub use relations::MEMBER;
pub use sessions::SelfServiceStrategy;
pub use warrants::WarrantFilter;

use crate::params::Params;
use crate::types::ListOptions;

impl ListOptions {
    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("limit", self.limit)
            .with("prev_cursor", self.prev_cursor.as_deref())
            .with("next_cursor", self.next_cursor.as_deref())
            .with("sort_by", self.sort_by.as_deref())
            .with("sort_order", self.sort_order.map(|o| o.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::types::SortOrder;
    use serde_json::{json, Value};

    #[test]
    fn test_list_options_params() {
        let options = ListOptions::default()
            .limit(25)
            .after("cursor_2")
            .sort("createdAt", SortOrder::Desc);

        assert_eq!(
            Value::Object(normalize(&options.to_params())),
            json!({"limit": 25, "nextCursor": "cursor_2", "sortBy": "createdAt", "sortOrder": "DESC"})
        );
    }

    #[test]
    fn test_default_list_options_are_empty() {
        assert!(normalize(&ListOptions::default().to_params()).is_empty());
    }
}
