//! Query builder for the YouTube political-ads transparency feed.

use chrono::NaiveDate;
use url::Url;

use super::common::{append_opt, Query};

/// Filters for `/political_ads/creatives`.
#[derive(Clone, Debug)]
pub struct YouTubeCreativeQuery {
    pub region: String,
    pub date_range_start: Option<NaiveDate>,
    pub date_range_end: Option<NaiveDate>,
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

impl Default for YouTubeCreativeQuery {
    fn default() -> Self {
        Self {
            region: "US".to_string(),
            date_range_start: None,
            date_range_end: None,
            page_size: None,
            page_token: None,
        }
    }
}

impl YouTubeCreativeQuery {
    pub fn with_date_range_start(mut self, date: NaiveDate) -> Self {
        self.date_range_start = Some(date);
        self
    }

    pub fn with_date_range_end(mut self, date: NaiveDate) -> Self {
        self.date_range_end = Some(date);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_page_token(mut self, token: &str) -> Self {
        self.page_token = Some(token.to_string());
        self
    }
}

impl Query for YouTubeCreativeQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("region", &self.region);
        append_opt(
            &mut url,
            "date_range_start",
            self.date_range_start.map(|d| d.format("%Y-%m-%d")),
        );
        append_opt(
            &mut url,
            "date_range_end",
            self.date_range_end.map(|d| d.format("%Y-%m-%d")),
        );
        append_opt(&mut url, "page_size", self.page_size);
        append_opt(&mut url, "page_token", self.page_token.as_deref());
        url
    }
}
