//! Internet Archive political TV ad collection.
//!
//! Runs without credentials. The archive records creatives, not buys: there
//! is no spend and no audience metric, so spend is zero and the record is
//! marked `metricsAvailable = false`. Every item is a broadcast spot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::tvarchive::{ArchiveDoc, ArchiveSearchResponse};
use superpac_api::types::OneOrMany;
use superpac_api::{ArchiveSearchQuery, Auth};

use crate::ad::{Ad, AdType};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::normalize::{non_blank, parse_opt_timestamp, AdDraft, ProviderLabel};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

const DEFAULT_ROWS: u32 = 50;

pub struct TvArchiveAdapter {
    http: ProviderHttp,
}

impl TvArchiveAdapter {
    pub const NAME: &'static str = "tvarchive";
    pub const DISPLAY_NAME: &'static str = "TV Ad Archive";
    pub const DEFAULT_BASE_URL: &'static str = "https://archive.org";
    pub const DEFAULT_RATE_LIMIT: u32 = 30;
    const LABEL: ProviderLabel = ProviderLabel {
        name: Self::NAME,
        display_name: Self::DISPLAY_NAME,
    };

    pub fn new(config: &ProviderConfig) -> Result<Self, SyncError> {
        Ok(Self {
            http: ProviderHttp::new(Self::NAME, config, Auth::Anonymous, Self::DEFAULT_RATE_LIMIT)?,
        })
    }

    fn query(options: &FetchOptions) -> ArchiveSearchQuery {
        let rows = options.limit.unwrap_or(DEFAULT_ROWS);
        let mut query = ArchiveSearchQuery::default()
            .with_rows(rows)
            .with_page(options.page_number(rows));
        if let Some(start) = options.start_date {
            query = query.with_date_from(start);
        }
        if let Some(end) = options.end_date {
            query = query.with_date_to(end);
        }
        query
    }
}

/// Archive items are TV spots whatever their `ad_type` label says.
pub fn map_ad_type(_archive_ad_type: Option<&str>) -> AdType {
    AdType::Video
}

fn joined(value: &Option<OneOrMany<String>>, separator: &str) -> Option<String> {
    let parts: Vec<String> = value
        .clone()?
        .into_vec()
        .into_iter()
        .filter_map(|s| non_blank(Some(s.as_str())))
        .collect();
    (!parts.is_empty()).then(|| parts.join(separator))
}

fn first(value: &Option<OneOrMany<String>>) -> Option<String> {
    value.as_ref()?.first().cloned()
}

pub(crate) fn normalize(raw: &ArchiveDoc, offset: u32, index: usize, fetched_at: DateTime<Utc>) -> Ad {
    let native_id = raw
        .identifier
        .as_deref()
        .and_then(|s| non_blank(Some(s)))
        .unwrap_or_else(|| format!("row{}", offset as usize + index));
    let url = format!("https://archive.org/details/{}", native_id);

    let mut draft = AdDraft::new(native_id.clone());
    draft.title = first(&raw.title);
    draft.description = joined(&raw.description, "\n");
    draft.thumbnail = Some(format!("https://archive.org/services/img/{}", native_id));
    draft.ad_type = map_ad_type(first(&raw.ad_type).as_deref());
    draft.start_date = parse_opt_timestamp(raw.date.as_deref());
    draft.meta("sponsor", joined(&raw.sponsor, "; "));
    draft.meta("subjects", raw.subject.clone().map(OneOrMany::into_vec));
    draft.meta("candidates", raw.candidate.clone().map(OneOrMany::into_vec));
    draft.meta("archiveAdType", first(&raw.ad_type));

    draft.finish(TvArchiveAdapter::LABEL, &url, fetched_at)
}

#[async_trait]
impl AdSource for TvArchiveAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: ArchiveSearchResponse = self
            .http
            .get("/advancedsearch.php", &Self::query(options))
            .await?;
        let fetched_at = Utc::now();
        let rows = options.limit.unwrap_or(DEFAULT_ROWS);
        let first_row = options.page_start(rows);
        Ok(resp
            .response
            .docs
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, first_row, i, fetched_at))
            .collect())
    }

    /// Hit count for the same search, without documents.
    async fn fetch_spending_data(
        &self,
        options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        let query = Self::query(options).with_rows(0).with_page(1);
        self.http.spending("/advancedsearch.php", &query).await
    }

    fn request_summary(&self) -> Option<TrackerSummary> {
        Some(self.http.summary())
    }
}
