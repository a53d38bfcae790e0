//! X (Twitter) political ads repository.
//!
//! Spend arrives in micro-dollars. `creative_type` vocabulary:
//! `VIDEO`/`GIF` → video, `IMAGE` → image, `CAROUSEL` → carousel,
//! `TEXT`/`PROMOTED_TWEET` and anything else → text. No leaning signal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::twitter::{TwitterAd, TwitterAdsResponse};
use superpac_api::{Auth, TwitterAdsQuery};

use crate::ad::{Ad, AdType};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::normalize::{native_id_or_position, parse_opt_timestamp, AdDraft, ProviderLabel};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

const MICROS_PER_DOLLAR: f64 = 1_000_000.0;

pub struct TwitterAdapter {
    http: ProviderHttp,
}

impl TwitterAdapter {
    pub const NAME: &'static str = "twitter";
    pub const DISPLAY_NAME: &'static str = "X (Twitter)";
    pub const DEFAULT_BASE_URL: &'static str = "https://ads-api.x.com/12";
    pub const DEFAULT_RATE_LIMIT: u32 = 60;
    const LABEL: ProviderLabel = ProviderLabel {
        name: Self::NAME,
        display_name: Self::DISPLAY_NAME,
    };

    pub fn new(config: &ProviderConfig) -> Result<Self, SyncError> {
        let auth = Auth::resolve(
            config.access_token.as_deref(),
            config.api_key.as_deref(),
            "X-Api-Key",
        );
        Ok(Self {
            http: ProviderHttp::new(Self::NAME, config, auth, Self::DEFAULT_RATE_LIMIT)?,
        })
    }

    /// The offset travels as the opaque cursor token.
    fn query(options: &FetchOptions) -> TwitterAdsQuery {
        let mut query = TwitterAdsQuery::default();
        if let Some(start) = options.range_start() {
            query = query.with_start_time(start);
        }
        if let Some(end) = options.range_end() {
            query = query.with_end_time(end);
        }
        if let Some(limit) = options.limit {
            query = query.with_count(limit);
        }
        if let Some(offset) = options.offset.filter(|o| *o > 0) {
            query = query.with_cursor(&offset.to_string());
        }
        query
    }
}

pub fn map_ad_type(creative_type: Option<&str>) -> AdType {
    match creative_type.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("VIDEO") | Some("GIF") => AdType::Video,
        Some("IMAGE") => AdType::Image,
        Some("CAROUSEL") => AdType::Carousel,
        Some("TEXT") | Some("PROMOTED_TWEET") => AdType::Text,
        _ => AdType::Text,
    }
}

pub(crate) fn normalize(raw: &TwitterAd, offset: u32, index: usize, fetched_at: DateTime<Utc>) -> Ad {
    let native_id = native_id_or_position(raw.id.as_ref(), offset, index);
    let fallback_url = format!("https://ads.x.com/transparency/ad/{}", native_id);

    let mut draft = AdDraft::new(native_id);
    draft.title = raw.name.clone();
    draft.description = raw.text.clone();
    draft.url = raw.preview_url.clone();
    draft.thumbnail = raw.media_url.clone();
    draft.spend = raw
        .spend_micro
        .as_ref()
        .and_then(|s| s.as_f64())
        .map(|micros| micros / MICROS_PER_DOLLAR);
    draft.impressions = raw.impressions;
    draft.clicks = raw.url_clicks;
    draft.ad_type = map_ad_type(raw.creative_type.as_deref());
    draft.start_date = parse_opt_timestamp(raw.start_time.as_deref());
    draft.end_date = parse_opt_timestamp(raw.end_time.as_deref());
    draft.meta("currency", raw.currency.clone());
    draft.meta("fundingEntity", raw.funding_entity.clone());
    draft.meta("accountName", raw.account_name.clone());
    draft.meta("creativeType", raw.creative_type.clone());

    draft.finish(TwitterAdapter::LABEL, &fallback_url, fetched_at)
}

#[async_trait]
impl AdSource for TwitterAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: TwitterAdsResponse = self.http.get("/political_ads", &Self::query(options)).await?;
        let fetched_at = Utc::now();
        let offset = options.offset_or_zero();
        if let Some(cursor) = &resp.next_cursor {
            tracing::debug!("{}: more results after cursor {}", Self::NAME, cursor);
        }
        Ok(resp
            .data
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
            .spending("/political_ads/spend_summary", &Self::query(options))
            .await
    }

    fn request_summary(&self) -> Option<TrackerSummary> {
        Some(self.http.summary())
    }
}
