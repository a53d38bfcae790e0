//! Query builder for the X (Twitter) political ads repository.

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use super::common::{append_opt, Query};

/// Filters for `/political_ads`. Dates are sent as RFC 3339 instants and
/// paging uses an opaque cursor token.
#[derive(Clone, Debug, Default)]
pub struct TwitterAdsQuery {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub count: Option<u32>,
    pub cursor: Option<String>,
}

impl TwitterAdsQuery {
    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_cursor(mut self, cursor: &str) -> Self {
        self.cursor = Some(cursor.to_string());
        self
    }
}

impl Query for TwitterAdsQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_opt(
            &mut url,
            "start_time",
            self.start_time
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        append_opt(
            &mut url,
            "end_time",
            self.end_time
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        append_opt(&mut url, "count", self.count);
        append_opt(&mut url, "cursor", self.cursor.as_deref());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_adds_nothing() {
        let url = Url::parse("https://example.com/political_ads").unwrap();
        insta::assert_snapshot!(
            TwitterAdsQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/political_ads"
        );
    }

    #[test]
    fn rfc3339_window_and_cursor() {
        let url = Url::parse("https://example.com/political_ads").unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = TwitterAdsQuery::default()
            .with_start_time(start)
            .with_count(50)
            .with_cursor("100");
        insta::assert_snapshot!(
            query.add_to_url(&url).to_string(),
            @"https://example.com/political_ads?start_time=2024-01-01T00%3A00%3A00Z&count=50&cursor=100"
        );
    }
}
