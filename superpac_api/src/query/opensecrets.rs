//! Query builder for the OpenSecrets `independentExpend` method.

use url::Url;

use super::common::Query;

/// OpenSecrets exposes the latest independent expenditures through a single
/// method call. There is no date filter and no paging upstream.
#[derive(Clone, Debug)]
pub struct IndependentExpendQuery {
    pub method: String,
    pub output: String,
}

impl Default for IndependentExpendQuery {
    fn default() -> Self {
        Self {
            method: "independentExpend".to_string(),
            output: "json".to_string(),
        }
    }
}

impl Query for IndependentExpendQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("method", &self.method)
            .append_pair("output", &self.output);
        url
    }
}
