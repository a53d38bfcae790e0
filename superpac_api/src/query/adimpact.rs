//! Query builder for AdImpact political airings.

use chrono::NaiveDate;
use url::Url;

use super::common::{append_opt, Query};

/// Filters for `/v1/political/airings`.
#[derive(Clone, Debug, Default)]
pub struct AiringsQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AiringsQuery {
    pub fn with_start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    pub fn with_end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl Query for AiringsQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_opt(&mut url, "start", self.start.map(|d| d.format("%Y-%m-%d")));
        append_opt(&mut url, "end", self.end.map(|d| d.format("%Y-%m-%d")));
        append_opt(&mut url, "limit", self.limit);
        append_opt(&mut url, "offset", self.offset);
        url
    }
}
