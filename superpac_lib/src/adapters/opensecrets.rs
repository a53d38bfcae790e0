//! OpenSecrets latest independent expenditures.
//!
//! The upstream method takes no date filter and no paging, so the requested
//! window and offset/limit are applied locally after normalization. The
//! payload is a single object when there is exactly one expenditure.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::opensecrets::{IndependentExpendAttributes, IndependentExpendResponse};
use superpac_api::{Auth, IndependentExpendQuery};

use crate::ad::{Ad, AdType};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::leaning::{LeaningClassifier, LeaningSignal};
use crate::normalize::{
    infer_ad_type_from_purpose, native_id_or_position, parse_opt_timestamp, AdDraft, ProviderLabel,
};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

pub struct OpenSecretsAdapter {
    http: ProviderHttp,
    classifier: Arc<dyn LeaningClassifier>,
}

impl OpenSecretsAdapter {
    pub const NAME: &'static str = "opensecrets";
    pub const DISPLAY_NAME: &'static str = "OpenSecrets";
    pub const DEFAULT_BASE_URL: &'static str = "https://www.opensecrets.org/api";
    pub const DEFAULT_RATE_LIMIT: u32 = 10;
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
}

/// Expenditure notes are free text, read like a filing purpose line.
pub fn map_ad_type(note: Option<&str>) -> AdType {
    infer_ad_type_from_purpose(note)
}

pub(crate) fn normalize(
    raw: &IndependentExpendAttributes,
    classifier: &dyn LeaningClassifier,
    index: usize,
    fetched_at: DateTime<Utc>,
) -> Ad {
    let native_id = native_id_or_position(raw.id.as_ref(), 0, index);
    let fallback_url = match raw.cmteid.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(cmte) => format!("https://www.opensecrets.org/outsidespending/detail?cmte={}", cmte),
        None => "https://www.opensecrets.org/outsidespending".to_string(),
    };
    let amount = raw.amount.as_ref().and_then(|v| v.as_f64());

    let mut draft = AdDraft::new(native_id);
    draft.description = raw.note.clone();
    draft.spend = amount;
    draft.ad_type = map_ad_type(raw.note.as_deref());
    draft.political_leaning = classifier.classify(&LeaningSignal::new(
        raw.suppopp.as_deref(),
        raw.party.as_deref(),
    ));
    draft.start_date = parse_opt_timestamp(raw.date.as_deref());
    draft.fec_id = raw.fecid.clone();
    draft.committee_id = raw.cmteid.clone();
    draft.meta("pacShort", raw.pacshort.clone());
    draft.meta("supportOppose", raw.suppopp.clone());
    draft.meta("candidateName", raw.candname.clone());
    draft.meta("district", raw.district.clone());
    draft.meta("party", raw.party.clone());
    draft.meta("payee", raw.payee.clone());
    draft.meta("source", raw.source.clone());
    if amount.is_some_and(|a| a < 0.0) {
        draft.meta("signCorrected", Some(true));
    }

    draft.finish(OpenSecretsAdapter::LABEL, &fallback_url, fetched_at)
}

/// Date window, then offset and limit, applied in that order.
pub(crate) fn apply_window(ads: Vec<Ad>, options: &FetchOptions) -> Vec<Ad> {
    let limit = options.limit.map_or(usize::MAX, |l| l as usize);
    ads.into_iter()
        .filter(|ad| options.contains(ad.start_date))
        .skip(options.offset_or_zero() as usize)
        .take(limit)
        .collect()
}

#[async_trait]
impl AdSource for OpenSecretsAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: IndependentExpendResponse =
            self.http.get("/", &IndependentExpendQuery::default()).await?;
        let fetched_at = Utc::now();
        let ads: Vec<Ad> = resp
            .response
            .indexp
            .into_vec()
            .iter()
            .enumerate()
            .map(|(i, entry)| normalize(&entry.attributes, self.classifier.as_ref(), i, fetched_at))
            .collect();
        let total = ads.len();
        let ads = apply_window(ads, options);
        tracing::debug!("{}: kept {} of {} after local filtering", Self::NAME, ads.len(), total);
        Ok(ads)
    }

    async fn fetch_spending_data(
        &self,
        _options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        self.http.spending("/", &IndependentExpendQuery::default()).await
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
    use chrono::NaiveDate;
    use superpac_api::types::Scalar;

    fn entry(id: i64, date: &str, amount: &str) -> IndependentExpendAttributes {
        IndependentExpendAttributes {
            id: Some(Scalar::Int(id)),
            date: Some(date.to_string()),
            amount: Some(Scalar::Text(amount.to_string())),
            ..IndependentExpendAttributes::default()
        }
    }

    #[test]
    fn ad_type_vocabulary_is_total() {
        assert_eq!(map_ad_type(Some("Broadcast TV")), AdType::Video);
        assert_eq!(map_ad_type(Some("Online display ads")), AdType::Image);
        assert_eq!(map_ad_type(Some("Polling")), AdType::Text);
        assert_eq!(map_ad_type(None), AdType::Text);
    }

    #[test]
    fn string_amounts_and_party_leaning() {
        let mut raw = entry(124, "2023-12-01", "-4,500.00");
        raw.suppopp = Some("Oppose".into());
        raw.party = Some("R".into());
        let ad = normalize(&raw, &SupportOpposeClassifier::default(), 0, Utc::now());
        assert_eq!(ad.spend, 4500.0);
        assert_eq!(ad.political_leaning, Some(PoliticalLeaning::Conservative));
        assert_eq!(ad.id, "opensecrets_124");
    }

    #[test]
    fn window_filters_then_pages() {
        let classifier = SupportOpposeClassifier::default();
        let ads: Vec<Ad> = [
            entry(1, "2024-01-05", "1"),
            entry(2, "2024-02-05", "1"),
            entry(3, "2024-02-06", "1"),
            entry(4, "2024-02-07", "1"),
        ]
        .iter()
        .enumerate()
        .map(|(i, e)| normalize(e, &classifier, i, Utc::now()))
        .collect();

        let options = FetchOptions::default()
            .with_start_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .with_offset(1)
            .with_limit(1);
        let kept = apply_window(ads, &options);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "opensecrets_3");
    }
}
