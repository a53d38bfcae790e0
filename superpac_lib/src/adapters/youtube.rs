//! YouTube political-ads transparency feed.
//!
//! Spend is a USD min/max bucket (normalized to its midpoint); impressions
//! are bucket labels such as `"1M-10M"` or `"≤ 10k"`, normalized to the
//! bucket's lower bound with the label kept in metadata.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::youtube::{YouTubeCreative, YouTubeCreativesResponse};
use superpac_api::{Auth, YouTubeCreativeQuery};

use crate::ad::{Ad, AdType};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::normalize::{native_id_or_position, parse_opt_timestamp, range_midpoint, AdDraft, ProviderLabel};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

pub struct YouTubeAdapter {
    http: ProviderHttp,
}

impl YouTubeAdapter {
    pub const NAME: &'static str = "youtube";
    pub const DISPLAY_NAME: &'static str = "YouTube";
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/adstransparency/v1";
    pub const DEFAULT_RATE_LIMIT: u32 = 60;
    const LABEL: ProviderLabel = ProviderLabel {
        name: Self::NAME,
        display_name: Self::DISPLAY_NAME,
    };

    pub fn new(config: &ProviderConfig) -> Result<Self, SyncError> {
        let auth = Auth::resolve(None, config.api_key.as_deref(), "X-Goog-Api-Key");
        Ok(Self {
            http: ProviderHttp::new(Self::NAME, config, auth, Self::DEFAULT_RATE_LIMIT)?,
        })
    }

    /// The page token carries the numeric offset.
    fn query(options: &FetchOptions) -> YouTubeCreativeQuery {
        let mut query = YouTubeCreativeQuery::default();
        if let Some(start) = options.start_date {
            query = query.with_date_range_start(start);
        }
        if let Some(end) = options.end_date {
            query = query.with_date_range_end(end);
        }
        if let Some(limit) = options.limit {
            query = query.with_page_size(limit);
        }
        if let Some(offset) = options.offset.filter(|o| *o > 0) {
            query = query.with_page_token(&offset.to_string());
        }
        query
    }
}

pub fn map_ad_type(ad_type: Option<&str>) -> AdType {
    match ad_type.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("VIDEO") => AdType::Video,
        Some("IMAGE") => AdType::Image,
        Some("TEXT") => AdType::Text,
        _ => AdType::Text,
    }
}

/// `"10k"` → 10 000, `"1.5M"` → 1 500 000.
fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim().replace(',', "");
    let (number, multiplier) = match text.chars().last()?.to_ascii_uppercase() {
        'K' => (&text[..text.len() - 1], 1e3),
        'M' => (&text[..text.len() - 1], 1e6),
        'B' => (&text[..text.len() - 1], 1e9),
        _ => (text.as_str(), 1.0),
    };
    let value: f64 = number.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| (value * multiplier).round() as u64)
}

/// Lower bound of an impressions bucket label. `"≤ X"`/`"< X"` buckets start
/// at zero.
pub fn impression_lower_bound(label: &str) -> Option<u64> {
    let label = label.trim();
    if label.starts_with('≤') || label.starts_with('<') {
        return Some(0);
    }
    let first = label
        .trim_start_matches(['>', '≥'])
        .split(['-', '–'])
        .next()?
        .trim()
        .trim_end_matches('+');
    parse_count(first)
}

pub(crate) fn normalize(raw: &YouTubeCreative, offset: u32, index: usize, fetched_at: DateTime<Utc>) -> Ad {
    let native_id = native_id_or_position(raw.ad_id.as_ref(), offset, index);
    let fallback_url = match raw.advertiser_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(advertiser) => format!(
            "https://adstransparency.google.com/advertiser/{}/creative/{}",
            advertiser, native_id
        ),
        None => "https://adstransparency.google.com/political?region=US".to_string(),
    };

    let mut draft = AdDraft::new(native_id);
    draft.title = raw.headline.clone();
    draft.url = raw.ad_url.clone();
    draft.thumbnail = raw.thumbnail_url.clone();
    draft.spend = range_midpoint(
        raw.spend_range_min_usd.as_ref().and_then(|v| v.as_f64()),
        raw.spend_range_max_usd.as_ref().and_then(|v| v.as_f64()),
    );
    draft.impressions = raw.impressions.as_deref().and_then(impression_lower_bound);
    draft.ad_type = map_ad_type(raw.ad_type.as_deref());
    draft.start_date = parse_opt_timestamp(raw.date_range_start.as_deref());
    draft.end_date = parse_opt_timestamp(raw.date_range_end.as_deref());
    draft.meta("advertiserId", raw.advertiser_id.clone());
    draft.meta("advertiserName", raw.advertiser_name.clone());
    draft.meta("impressionsBucket", raw.impressions.clone());

    draft.finish(YouTubeAdapter::LABEL, &fallback_url, fetched_at)
}

#[async_trait]
impl AdSource for YouTubeAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: YouTubeCreativesResponse = self
            .http
            .get("/political_ads/creatives", &Self::query(options))
            .await?;
        let fetched_at = Utc::now();
        let offset = options.offset_or_zero();
        Ok(resp
            .creatives
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, offset, i, fetched_at))
            .collect())
    }

    async fn fetch_spending_data(
        &self,
        options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        self.http
            .spending("/political_ads/advertisers", &Self::query(options))
            .await
    }

    fn request_summary(&self) -> Option<TrackerSummary> {
        Some(self.http.summary())
    }
}
