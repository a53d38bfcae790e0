//! Query builder for OpenFEC Schedule E (independent expenditures).

use chrono::NaiveDate;
use url::Url;

use super::common::{append_opt, Query};

/// Filters for `/schedules/schedule_e/`.
///
/// OpenFEC takes `MM/DD/YYYY` dates and 1-indexed page numbers.
#[derive(Clone, Debug)]
pub struct ScheduleEQuery {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub committee_ids: Vec<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort: String,
}

impl Default for ScheduleEQuery {
    fn default() -> Self {
        Self {
            min_date: None,
            max_date: None,
            committee_ids: Vec::new(),
            per_page: None,
            page: None,
            sort: "-expenditure_date".to_string(),
        }
    }
}

impl ScheduleEQuery {
    pub fn with_min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn with_max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn with_committee_id(mut self, committee_id: &str) -> Self {
        self.committee_ids.push(committee_id.to_string());
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

impl Query for ScheduleEQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_opt(&mut url, "min_date", self.min_date.map(|d| d.format("%m/%d/%Y")));
        append_opt(&mut url, "max_date", self.max_date.map(|d| d.format("%m/%d/%Y")));
        for committee_id in self.committee_ids.iter() {
            url.query_pairs_mut()
                .append_pair("committee_id", committee_id);
        }
        append_opt(&mut url, "per_page", self.per_page);
        append_opt(&mut url, "page", self.page);
        url.query_pairs_mut().append_pair("sort", &self.sort);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_use_us_format() {
        let url = Url::parse("https://example.com/schedules/schedule_e/").unwrap();
        let query = ScheduleEQuery::default()
            .with_min_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .with_page(2)
            .with_per_page(100);
        insta::assert_snapshot!(
            query.add_to_url(&url).to_string(),
            @"https://example.com/schedules/schedule_e/?min_date=01%2F15%2F2024&per_page=100&page=2&sort=-expenditure_date"
        );
    }
}
