//! Query builder for the Internet Archive political TV ad collection.

use chrono::NaiveDate;
use url::Url;

use super::common::{append_opt, Query};

const FIELDS: &[&str] = &[
    "identifier",
    "title",
    "description",
    "date",
    "sponsor",
    "subject",
    "ad_type",
    "candidate",
];

/// Filters for `/advancedsearch.php`.
///
/// The date window is expressed inside the Lucene `q` expression; an open
/// end is written as `*`.
#[derive(Clone, Debug)]
pub struct ArchiveSearchQuery {
    pub collection: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub rows: Option<u32>,
    pub page: Option<u32>,
}

impl Default for ArchiveSearchQuery {
    fn default() -> Self {
        Self {
            collection: "political_ads".to_string(),
            date_from: None,
            date_to: None,
            rows: None,
            page: None,
        }
    }
}

impl ArchiveSearchQuery {
    pub fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn with_date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// The Lucene expression sent as `q`.
    pub fn lucene(&self) -> String {
        let mut q = format!("collection:({})", self.collection);
        if self.date_from.is_some() || self.date_to.is_some() {
            let bound = |d: Option<NaiveDate>| {
                d.map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "*".to_string())
            };
            q.push_str(&format!(
                " AND date:[{} TO {}]",
                bound(self.date_from),
                bound(self.date_to)
            ));
        }
        q
    }
}

impl Query for ArchiveSearchQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("q", &self.lucene());
        for field in FIELDS {
            url.query_pairs_mut().append_pair("fl[]", field);
        }
        append_opt(&mut url, "rows", self.rows);
        append_opt(&mut url, "page", self.page);
        url.query_pairs_mut().append_pair("output", "json");
        url
    }
}
