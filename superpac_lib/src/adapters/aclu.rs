//! ACLU Political Ad Watch.
//!
//! Bearer-token only. Timestamps are unix seconds (number or numeric text).
//! Format vocabulary: `video` → video; `image`/`static` → image;
//! `carousel`/`slideshow` → carousel; `text` and anything else → text.
//! The feed labels stance directly (`left`, `right`, `center`,
//! `nonpartisan`), so no classifier is involved.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::aclu::{AdWatchItem, AdWatchResponse};
use superpac_api::{AdWatchQuery, Auth};

use crate::ad::{Ad, AdType, PoliticalLeaning};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::normalize::{from_unix_scalar, native_id_or_position, AdDraft, ProviderLabel};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

const DEFAULT_PAGE_SIZE: u32 = 50;

pub struct AcluAdapter {
    http: ProviderHttp,
}

impl AcluAdapter {
    pub const NAME: &'static str = "aclu";
    pub const DISPLAY_NAME: &'static str = "ACLU Political Ad Watch";
    pub const DEFAULT_BASE_URL: &'static str = "https://adwatch.aclu.org";
    pub const DEFAULT_RATE_LIMIT: u32 = 60;
    const LABEL: ProviderLabel = ProviderLabel {
        name: Self::NAME,
        display_name: Self::DISPLAY_NAME,
    };

    pub fn new(config: &ProviderConfig) -> Result<Self, SyncError> {
        let auth = Auth::resolve(config.access_token.as_deref(), None, "");
        Ok(Self {
            http: ProviderHttp::new(Self::NAME, config, auth, Self::DEFAULT_RATE_LIMIT)?,
        })
    }

    fn query(options: &FetchOptions) -> AdWatchQuery {
        let per_page = options.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let mut query = AdWatchQuery::default()
            .with_per_page(per_page)
            .with_page(options.page_number(per_page));
        if let Some(start) = options.range_start() {
            query = query.with_since(start.timestamp());
        }
        if let Some(end) = options.range_end() {
            query = query.with_until(end.timestamp());
        }
        query
    }
}

pub fn map_ad_type(format: Option<&str>) -> AdType {
    match format.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("video") => AdType::Video,
        Some("image") | Some("static") => AdType::Image,
        Some("carousel") | Some("slideshow") => AdType::Carousel,
        Some("text") => AdType::Text,
        _ => AdType::Text,
    }
}

pub fn map_lean(lean: Option<&str>) -> Option<PoliticalLeaning> {
    match lean?.trim().to_ascii_lowercase().as_str() {
        "left" | "progressive" => Some(PoliticalLeaning::Progressive),
        "right" | "conservative" => Some(PoliticalLeaning::Conservative),
        "center" | "centre" | "moderate" => Some(PoliticalLeaning::Moderate),
        "nonpartisan" | "non-partisan" | "none" => Some(PoliticalLeaning::NonPartisan),
        _ => None,
    }
}

pub(crate) fn normalize(raw: &AdWatchItem, offset: u32, index: usize, fetched_at: DateTime<Utc>) -> Ad {
    let native_id = native_id_or_position(raw.uid.as_ref(), offset, index);
    let fallback_url = format!("https://adwatch.aclu.org/ads/{}", native_id);

    let mut draft = AdDraft::new(native_id);
    draft.title = raw.headline.clone();
    draft.description = raw.summary.clone();
    draft.url = raw.link.clone();
    draft.thumbnail = raw.image.clone();
    draft.spend = raw.reported_spend.as_ref().and_then(|v| v.as_f64());
    draft.impressions = raw.views;
    draft.clicks = raw.clicks;
    draft.ad_type = map_ad_type(raw.format.as_deref());
    draft.political_leaning = map_lean(raw.lean.as_deref());
    draft.start_date = raw.first_seen.as_ref().and_then(from_unix_scalar);
    draft.end_date = raw.last_seen.as_ref().and_then(from_unix_scalar);
    draft.meta("sponsor", raw.sponsor.clone());
    draft.meta("lean", raw.lean.clone());
    draft.meta("format", raw.format.clone());

    draft.finish(AcluAdapter::LABEL, &fallback_url, fetched_at)
}

#[async_trait]
impl AdSource for AcluAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: AdWatchResponse = self.http.get("/api/ads", &Self::query(options)).await?;
        let fetched_at = Utc::now();
        let per_page = options.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let first_row = options.page_start(per_page);
        Ok(resp
            .items
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, first_row, i, fetched_at))
            .collect())
    }

    async fn fetch_spending_data(
        &self,
        options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        self.http.spending("/api/spend", &Self::query(options)).await
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
        assert_eq!(map_ad_type(Some("video")), AdType::Video);
        assert_eq!(map_ad_type(Some("Static")), AdType::Image);
        assert_eq!(map_ad_type(Some("slideshow")), AdType::Carousel);
        assert_eq!(map_ad_type(Some("text")), AdType::Text);
        assert_eq!(map_ad_type(Some("hologram")), AdType::Text);
        assert_eq!(map_ad_type(None), AdType::Text);
    }

    #[test]
    fn lean_tags() {
        assert_eq!(map_lean(Some("left")), Some(PoliticalLeaning::Progressive));
        assert_eq!(map_lean(Some("RIGHT")), Some(PoliticalLeaning::Conservative));
        assert_eq!(map_lean(Some("center")), Some(PoliticalLeaning::Moderate));
        assert_eq!(map_lean(Some("nonpartisan")), Some(PoliticalLeaning::NonPartisan));
        assert_eq!(map_lean(Some("unclear")), None);
        assert_eq!(map_lean(None), None);
    }

    #[test]
    fn inverted_window_drops_end() {
        let raw = AdWatchItem {
            uid: Some(Scalar::Int(3302)),
            reported_spend: Some(Scalar::Text("-50".into())),
            first_seen: Some(Scalar::Text("1717286400".into())),
            last_seen: Some(Scalar::Int(1_717_000_000)),
            ..AdWatchItem::default()
        };
        let ad = normalize(&raw, 0, 0, Utc::now());
        assert_eq!(ad.id, "aclu_3302");
        assert_eq!(ad.spend, 50.0);
        assert_eq!(ad.start_date.timestamp(), 1_717_286_400);
        assert_eq!(ad.end_date, None);
    }

    #[test]
    fn window_in_unix_seconds() {
        let options = FetchOptions::default()
            .with_start_date(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let query = AcluAdapter::query(&options);
        assert_eq!(query.since, Some(1_717_200_000));
        assert_eq!(query.until, None);
        assert_eq!(query.page, Some(1));
    }
}
