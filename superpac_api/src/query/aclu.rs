//! Query builder for the ACLU Political Ad Watch feed.

use url::Url;

use super::common::{append_opt, Query};

/// Filters for `/api/ads`. The window is given in unix seconds.
#[derive(Clone, Debug, Default)]
pub struct AdWatchQuery {
    pub since: Option<i64>,
    pub until: Option<i64>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl AdWatchQuery {
    pub fn with_since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: i64) -> Self {
        self.until = Some(until);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

impl Query for AdWatchQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_opt(&mut url, "since", self.since);
        append_opt(&mut url, "until", self.until);
        append_opt(&mut url, "per_page", self.per_page);
        append_opt(&mut url, "page", self.page);
        url
    }
}
