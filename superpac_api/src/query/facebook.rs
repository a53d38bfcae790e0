//! Query builder for the Meta Ad Library archive.

use chrono::NaiveDate;
use url::Url;

use super::common::{append_opt, Query};

/// Filters for `/ads_archive`. Delivery dates are plain `YYYY-MM-DD` days.
#[derive(Clone, Debug)]
pub struct FacebookArchiveQuery {
    pub ad_type: String,
    pub reached_countries: Vec<String>,
    pub delivery_date_min: Option<NaiveDate>,
    pub delivery_date_max: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Default for FacebookArchiveQuery {
    fn default() -> Self {
        Self {
            ad_type: "POLITICAL_AND_ISSUE_ADS".to_string(),
            reached_countries: vec!["US".to_string()],
            delivery_date_min: None,
            delivery_date_max: None,
            limit: None,
            offset: None,
        }
    }
}

impl FacebookArchiveQuery {
    pub fn with_delivery_date_min(mut self, date: NaiveDate) -> Self {
        self.delivery_date_min = Some(date);
        self
    }

    pub fn with_delivery_date_max(mut self, date: NaiveDate) -> Self {
        self.delivery_date_max = Some(date);
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

impl Query for FacebookArchiveQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("ad_type", &self.ad_type);
        for country in self.reached_countries.iter() {
            url.query_pairs_mut()
                .append_pair("ad_reached_countries", country);
        }
        append_opt(
            &mut url,
            "ad_delivery_date_min",
            self.delivery_date_min.map(|d| d.format("%Y-%m-%d")),
        );
        append_opt(
            &mut url,
            "ad_delivery_date_max",
            self.delivery_date_max.map(|d| d.format("%Y-%m-%d")),
        );
        append_opt(&mut url, "limit", self.limit);
        append_opt(&mut url, "offset", self.offset);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_us_political_ads() {
        let url = Url::parse("https://example.com/ads_archive").unwrap();
        insta::assert_snapshot!(
            FacebookArchiveQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/ads_archive?ad_type=POLITICAL_AND_ISSUE_ADS&ad_reached_countries=US"
        );
    }

    #[test]
    fn delivery_window() {
        let url = Url::parse("https://example.com/ads_archive").unwrap();
        let query = FacebookArchiveQuery::default()
            .with_delivery_date_min(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_delivery_date_max(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
            .with_limit(25);
        let url = query.add_to_url(&url);
        let q = url.query().unwrap();
        assert!(q.contains("ad_delivery_date_min=2024-03-01"));
        assert!(q.contains("ad_delivery_date_max=2024-03-31"));
        assert!(q.contains("limit=25"));
        assert!(!q.contains("offset"));
    }
}
