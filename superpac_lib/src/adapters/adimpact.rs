//! AdImpact political airings.
//!
//! Spend is an estimate in cents. AdImpact counts airings rather than
//! impressions, so impressions and clicks are unavailable and the airing
//! count is kept in metadata. Medium vocabulary: `Broadcast`, `Cable`, `CTV`,
//! `Satellite` → video; `Digital` → image; `Radio` and anything else → text.
//! Leaning comes from the sponsor party through the classifier.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::adimpact::{AdImpactAd, AiringsResponse};
use superpac_api::{AiringsQuery, Auth};

use crate::ad::{Ad, AdType};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::leaning::{LeaningClassifier, LeaningSignal};
use crate::normalize::{native_id_or_position, parse_opt_timestamp, AdDraft, ProviderLabel};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

pub struct AdImpactAdapter {
    http: ProviderHttp,
    classifier: Arc<dyn LeaningClassifier>,
}

impl AdImpactAdapter {
    pub const NAME: &'static str = "adimpact";
    pub const DISPLAY_NAME: &'static str = "AdImpact";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.adimpact.com";
    pub const DEFAULT_RATE_LIMIT: u32 = 60;
    const LABEL: ProviderLabel = ProviderLabel {
        name: Self::NAME,
        display_name: Self::DISPLAY_NAME,
    };

    pub fn new(config: &ProviderConfig, classifier: Arc<dyn LeaningClassifier>) -> Result<Self, SyncError> {
        let auth = Auth::resolve(None, config.api_key.as_deref(), "X-Api-Key");
        Ok(Self {
            http: ProviderHttp::new(Self::NAME, config, auth, Self::DEFAULT_RATE_LIMIT)?,
            classifier,
        })
    }

    fn query(options: &FetchOptions) -> AiringsQuery {
        let mut query = AiringsQuery::default();
        if let Some(start) = options.start_date {
            query = query.with_start(start);
        }
        if let Some(end) = options.end_date {
            query = query.with_end(end);
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

pub fn map_ad_type(medium: Option<&str>) -> AdType {
    match medium.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("broadcast") | Some("cable") | Some("ctv") | Some("satellite") => AdType::Video,
        Some("digital") => AdType::Image,
        Some("radio") => AdType::Text,
        _ => AdType::Text,
    }
}

pub(crate) fn normalize(
    raw: &AdImpactAd,
    classifier: &dyn LeaningClassifier,
    offset: u32,
    index: usize,
    fetched_at: DateTime<Utc>,
) -> Ad {
    let native_id = native_id_or_position(raw.creative_id.as_ref(), offset, index);
    let fallback_url = format!("https://adimpact.com/creative/{}", native_id);

    let mut draft = AdDraft::new(native_id);
    draft.title = raw.title.clone();
    draft.url = raw.video_url.clone();
    draft.thumbnail = raw.thumbnail_url.clone();
    draft.spend = raw
        .est_spend_cents
        .as_ref()
        .and_then(|v| v.as_f64())
        .map(|cents| cents / 100.0);
    draft.ad_type = map_ad_type(raw.medium.as_deref());
    draft.political_leaning = classifier.classify(&LeaningSignal::party(raw.party.as_deref()));
    draft.start_date = parse_opt_timestamp(raw.first_aired.as_deref());
    draft.end_date = parse_opt_timestamp(raw.last_aired.as_deref());
    draft.meta("sponsor", raw.sponsor.clone());
    draft.meta("medium", raw.medium.clone());
    draft.meta("airings", raw.airings);
    draft.meta("party", raw.party.clone());
    draft.meta("race", raw.race.clone());
    draft.meta("market", raw.market.clone());

    draft.finish(AdImpactAdapter::LABEL, &fallback_url, fetched_at)
}

#[async_trait]
impl AdSource for AdImpactAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: AiringsResponse = self
            .http
            .get("/v1/political/airings", &Self::query(options))
            .await?;
        let fetched_at = Utc::now();
        let offset = options.offset_or_zero();
        Ok(resp
            .ads
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, self.classifier.as_ref(), offset, i, fetched_at))
            .collect())
    }

    async fn fetch_spending_data(
        &self,
        options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        self.http
            .spending("/v1/political/spend", &Self::query(options))
            .await
    }

    fn request_summary(&self) -> Option<TrackerSummary> {
        Some(self.http.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ad::PoliticalLeaning;
    use crate::leaning::SupportOpposeClassifier;
    use superpac_api::types::Scalar;

    #[test]
    fn ad_type_vocabulary_is_total() {
        assert_eq!(map_ad_type(Some("Broadcast")), AdType::Video);
        assert_eq!(map_ad_type(Some("CTV")), AdType::Video);
        assert_eq!(map_ad_type(Some("Digital")), AdType::Image);
        assert_eq!(map_ad_type(Some("Radio")), AdType::Text);
        assert_eq!(map_ad_type(Some("Skywriting")), AdType::Text);
        assert_eq!(map_ad_type(None), AdType::Text);
    }

    #[test]
    fn cents_become_dollars_and_airings_kept() {
        let raw = AdImpactAd {
            creative_id: Some(Scalar::Int(55012)),
            est_spend_cents: Some(Scalar::Int(4_275_050)),
            airings: Some(312),
            party: Some("DEM".into()),
            first_aired: Some("2024-05-01".into()),
            ..AdImpactAd::default()
        };
        let ad = normalize(&raw, &SupportOpposeClassifier::default(), 0, 0, Utc::now());
        assert_eq!(ad.spend, 42_750.5);
        assert_eq!(ad.impressions, 0);
        assert_eq!(ad.metadata["airings"], 312);
        assert_eq!(ad.metadata["metricsAvailable"], false);
        assert_eq!(ad.political_leaning, Some(PoliticalLeaning::Progressive));
    }
}
