//! Meta Ad Library archive.
//!
//! Spend and impressions are reported as lower/upper bound ranges; both are
//! normalized to the range midpoint, with the raw bounds kept in metadata.
//! There is no click metric. `media_type`: `VIDEO` → video,
//! `IMAGE`/`MEME` → image, `CAROUSEL` → carousel, anything else → text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::facebook::{BoundRange, FacebookAd, FacebookArchiveResponse};
use superpac_api::{Auth, FacebookArchiveQuery};

use crate::ad::{Ad, AdType};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::normalize::{
    first_non_blank, native_id_or_position, parse_opt_timestamp, range_midpoint, AdDraft,
    ProviderLabel,
};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

pub struct FacebookAdapter {
    http: ProviderHttp,
}

impl FacebookAdapter {
    pub const NAME: &'static str = "facebook";
    pub const DISPLAY_NAME: &'static str = "Facebook";
    pub const DEFAULT_BASE_URL: &'static str = "https://graph.facebook.com/v19.0";
    pub const DEFAULT_RATE_LIMIT: u32 = 200;
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

    fn query(options: &FetchOptions) -> FacebookArchiveQuery {
        let mut query = FacebookArchiveQuery::default();
        if let Some(start) = options.start_date {
            query = query.with_delivery_date_min(start);
        }
        if let Some(end) = options.end_date {
            query = query.with_delivery_date_max(end);
        }
        if let Some(limit) = options.limit {
            query = query.with_limit(limit);
        }
        if let Some(offset) = options.offset {
            query = query.with_offset(offset);
        }
        query
    }
}

pub fn map_ad_type(media_type: Option<&str>) -> AdType {
    match media_type.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("VIDEO") => AdType::Video,
        Some("IMAGE") | Some("MEME") => AdType::Image,
        Some("CAROUSEL") => AdType::Carousel,
        Some("NONE") | Some("TEXT") => AdType::Text,
        _ => AdType::Text,
    }
}

fn bounds(range: Option<&BoundRange>) -> (Option<f64>, Option<f64>) {
    match range {
        Some(r) => (
            r.lower_bound.as_ref().and_then(|v| v.as_f64()),
            r.upper_bound.as_ref().and_then(|v| v.as_f64()),
        ),
        None => (None, None),
    }
}

pub(crate) fn normalize(raw: &FacebookAd, offset: u32, index: usize, fetched_at: DateTime<Utc>) -> Ad {
    let native_id = native_id_or_position(raw.id.as_ref(), offset, index);
    let fallback_url = format!("https://www.facebook.com/ads/library/?id={}", native_id);
    let (spend_lower, spend_upper) = bounds(raw.spend.as_ref());
    let (impr_lower, impr_upper) = bounds(raw.impressions.as_ref());

    let first = |list: &Option<Vec<String>>| list.as_ref().and_then(|v| v.first()).cloned();

    let mut draft = AdDraft::new(native_id);
    draft.title = first_non_blank([
        first(&raw.ad_creative_link_titles).as_deref(),
        raw.page_name.as_deref(),
    ]);
    draft.description = first(&raw.ad_creative_bodies);
    draft.url = raw.ad_snapshot_url.clone();
    draft.spend = range_midpoint(spend_lower, spend_upper);
    draft.impressions = range_midpoint(impr_lower, impr_upper)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64);
    draft.ad_type = map_ad_type(raw.media_type.as_deref());
    draft.start_date = parse_opt_timestamp(raw.ad_delivery_start_time.as_deref());
    draft.end_date = parse_opt_timestamp(raw.ad_delivery_stop_time.as_deref());
    draft.meta("pageId", raw.page_id.as_ref().and_then(|v| v.as_text()));
    draft.meta("pageName", raw.page_name.clone());
    draft.meta("fundingEntity", raw.bylines.clone());
    draft.meta("currency", raw.currency.clone());
    draft.meta("spendLowerBound", spend_lower);
    draft.meta("spendUpperBound", spend_upper);
    draft.meta("impressionsLowerBound", impr_lower);
    draft.meta("impressionsUpperBound", impr_upper);
    draft.meta("publisherPlatforms", raw.publisher_platforms.clone());

    draft.finish(FacebookAdapter::LABEL, &fallback_url, fetched_at)
}

#[async_trait]
impl AdSource for FacebookAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: FacebookArchiveResponse = self.http.get("/ads_archive", &Self::query(options)).await?;
        let fetched_at = Utc::now();
        let offset = options.offset_or_zero();
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
            .spending("/ads_archive/spend", &Self::query(options))
            .await
    }

    fn request_summary(&self) -> Option<TrackerSummary> {
        Some(self.http.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superpac_api::types::Scalar;

    #[test]
    fn ad_type_vocabulary_is_total() {
        assert_eq!(map_ad_type(Some("VIDEO")), AdType::Video);
        assert_eq!(map_ad_type(Some("IMAGE")), AdType::Image);
        assert_eq!(map_ad_type(Some("meme")), AdType::Image);
        assert_eq!(map_ad_type(Some("CAROUSEL")), AdType::Carousel);
        assert_eq!(map_ad_type(Some("NONE")), AdType::Text);
        assert_eq!(map_ad_type(Some("AR_FILTER")), AdType::Text);
        assert_eq!(map_ad_type(None), AdType::Text);
    }

    #[test]
    fn ranges_collapse_to_midpoint() {
        let raw = FacebookAd {
            id: Some(Scalar::Text("55".into())),
            spend: Some(BoundRange {
                lower_bound: Some(Scalar::Text("1000".into())),
                upper_bound: Some(Scalar::Text("1999".into())),
            }),
            impressions: Some(BoundRange {
                lower_bound: Some(Scalar::Int(100_000)),
                upper_bound: Some(Scalar::Int(124_999)),
            }),
            ..FacebookAd::default()
        };
        let ad = normalize(&raw, 0, 0, Utc::now());
        assert_eq!(ad.spend, 1499.5);
        assert_eq!(ad.impressions, 112_500);
        assert_eq!(ad.clicks, 0);
        assert_eq!(ad.metadata["spendUpperBound"], 1999.0);
        assert!(!ad.metadata.contains_key("metricsAvailable"));
    }

    #[test]
    fn page_name_is_title_fallback() {
        let raw = FacebookAd {
            page_name: Some("Leading the Future".into()),
            ..FacebookAd::default()
        };
        let ad = normalize(&raw, 10, 1, Utc::now());
        assert_eq!(ad.title, "Leading the Future");
        assert_eq!(ad.id, "facebook_row11");
    }
}
