//! Running query-language expressions.

use crate::client::{RequestOptions, WarrantClient};
use crate::error::WarrantError;
use crate::query::Query;
use crate::types::{ListOptions, QueryResponse};

impl WarrantClient {
    /// Runs `query` and returns one page of results.
    ///
    /// ## Errors
    ///
    /// Returns [`WarrantError::InvalidQuery`] before any request is made if
    /// the query is incomplete.
    pub async fn query(
        &self,
        query: &Query,
        list: &ListOptions,
        options: &RequestOptions,
    ) -> Result<QueryResponse, WarrantError> {
        let q = query.render()?;
        let url = self.config().api_url(&["v2", "query"])?;
        let mut params = list.to_params();
        params.insert("q", q);

        self.api().get(url, &params, options).await?.json()
    }
}
