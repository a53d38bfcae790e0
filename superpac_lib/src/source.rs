//! The adapter contract every provider implements.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::ad::Ad;
use crate::error::SyncError;
use crate::normalize::{end_of_day, start_of_day};
use crate::rate_limiter::TrackerSummary;

/// Filters and paging for one fetch. Every field is optional; a provider
/// that cannot filter upstream applies the date range locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Inclusive.
    pub start_date: Option<NaiveDate>,
    /// Inclusive.
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl FetchOptions {
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
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

    pub fn offset_or_zero(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    pub fn range_start(&self) -> Option<DateTime<Utc>> {
        self.start_date.map(start_of_day)
    }

    pub fn range_end(&self) -> Option<DateTime<Utc>> {
        self.end_date.map(end_of_day)
    }

    /// Translates offset/limit into a 1-based page number for providers that
    /// page by number. The page containing `offset` is returned, so an offset
    /// that is not a multiple of the page size starts at that page's first row.
    pub fn page_number(&self, page_size: u32) -> u32 {
        (self.offset_or_zero() / page_size.max(1)).saturating_add(1)
    }

    /// Offset of the first row on the page `page_number` selects.
    pub fn page_start(&self, page_size: u32) -> u32 {
        let offset = self.offset_or_zero();
        offset - offset % page_size.max(1)
    }

    /// Whether `at` falls inside the requested date range.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.range_start().map_or(true, |start| at >= start)
            && self.range_end().map_or(true, |end| at <= end)
    }
}

/// Raw provider spending aggregate. Shapes differ per provider, so the
/// payload is passed through undigested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSpendingSummary {
    pub provider: String,
    pub fetched_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

/// A provider adapter.
///
/// Implementations hold only immutable configuration after construction, so
/// the same instance may serve concurrent fetches.
#[async_trait]
pub trait AdSource: Send + Sync {
    /// Registry key, lower-case.
    fn name(&self) -> &str;

    fn display_name(&self) -> &str;

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError>;

    async fn fetch_spending_data(
        &self,
        options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError>;

    /// Request counters, for adapters that make HTTP calls.
    fn request_summary(&self) -> Option<TrackerSummary> {
        None
    }
}

pub type AdapterHandle = Arc<dyn AdSource>;

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn page_number_from_offset() {
        let opts = FetchOptions::default();
        assert_eq!(opts.page_number(50), 1);
        assert_eq!(opts.clone().with_offset(100).page_number(50), 3);
        assert_eq!(opts.with_offset(120).page_number(50), 3);
    }

    #[test]
    fn page_start_is_the_page_boundary() {
        let opts = FetchOptions::default();
        assert_eq!(opts.page_start(50), 0);
        assert_eq!(opts.clone().with_offset(120).page_start(50), 100);
        assert_eq!(opts.with_offset(7).page_start(0), 7);
    }

    #[test]
    fn max_offset_does_not_overflow() {
        let opts = FetchOptions::default().with_offset(u32::MAX).with_limit(1);
        assert_eq!(opts.page_number(1), u32::MAX);
        assert_eq!(opts.page_start(1), u32::MAX);
        assert_eq!(opts.page_number(50), u32::MAX / 50 + 1);
        assert_eq!(opts.page_start(50), u32::MAX - u32::MAX % 50);
    }

    #[test]
    fn contains_is_inclusive() {
        let opts = FetchOptions::default()
            .with_start_date(d("2024-01-01"))
            .with_end_date(d("2024-01-31"));
        assert!(opts.contains(start_of_day(d("2024-01-01"))));
        assert!(opts.contains(end_of_day(d("2024-01-31"))));
        assert!(!opts.contains(start_of_day(d("2024-02-01"))));
        assert!(FetchOptions::default().contains(start_of_day(d("1999-01-01"))));
    }
}
