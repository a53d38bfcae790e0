//! OpenFEC Schedule E independent expenditures.
//!
//! Each expenditure becomes one record. Amended and refunded lines carry
//! negative amounts and are sign-corrected. The filing has no creative
//! format, so the ad type is inferred from the purpose description, and the
//! leaning comes from the support/oppose indicator through the configured
//! classifier.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use superpac_api::types::fec::{IndependentExpenditure, ScheduleEResponse};
use superpac_api::{Auth, ScheduleEQuery};

use crate::ad::{Ad, AdType};
use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::leaning::{LeaningClassifier, LeaningSignal};
use crate::normalize::{
    first_non_blank, infer_ad_type_from_purpose, native_id_or_position, parse_opt_timestamp,
    AdDraft, ProviderLabel,
};
use crate::rate_limiter::TrackerSummary;
use crate::source::{AdSource, FetchOptions, ProviderSpendingSummary};
use crate::transport::ProviderHttp;

const DEFAULT_PAGE_SIZE: u32 = 50;

pub struct FecAdapter {
    http: ProviderHttp,
    classifier: Arc<dyn LeaningClassifier>,
}

impl FecAdapter {
    pub const NAME: &'static str = "fec";
    pub const DISPLAY_NAME: &'static str = "Federal Election Commission";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.open.fec.gov/v1";
    /// OpenFEC allows 1,000 requests/hour with a key.
    pub const DEFAULT_RATE_LIMIT: u32 = 15;
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

    fn query(options: &FetchOptions) -> ScheduleEQuery {
        let per_page = page_size(options);
        let mut query = ScheduleEQuery::default()
            .with_per_page(per_page)
            .with_page(options.page_number(per_page));
        if let Some(start) = options.start_date {
            query = query.with_min_date(start);
        }
        if let Some(end) = options.end_date {
            query = query.with_max_date(end);
        }
        query
    }
}

fn page_size(options: &FetchOptions) -> u32 {
    options.limit.unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Purpose-text inference; see [`infer_ad_type_from_purpose`].
pub fn map_ad_type(expenditure_description: Option<&str>) -> AdType {
    infer_ad_type_from_purpose(expenditure_description)
}

pub(crate) fn normalize(
    raw: &IndependentExpenditure,
    classifier: &dyn LeaningClassifier,
    offset: u32,
    index: usize,
    fetched_at: DateTime<Utc>,
) -> Ad {
    let native_id = match raw.sub_id.as_ref().and_then(|v| v.as_text()) {
        Some(id) => id,
        None => first_non_blank([raw.transaction_id.as_deref()])
            .unwrap_or_else(|| native_id_or_position(None, offset, index)),
    };
    let committee_id = first_non_blank([
        raw.committee_id.as_deref(),
        raw.committee.as_ref().and_then(|c| c.committee_id.as_deref()),
    ]);
    let fallback_url = match &committee_id {
        Some(id) => format!("https://www.fec.gov/data/committee/{}/", id),
        None => "https://www.fec.gov/data/independent-expenditures/".to_string(),
    };
    let amount = raw.expenditure_amount.as_ref().and_then(|v| v.as_f64());

    let mut draft = AdDraft::new(native_id);
    draft.description = raw.expenditure_description.clone();
    draft.url = raw.pdf_url.clone();
    draft.spend = amount;
    draft.ad_type = map_ad_type(raw.expenditure_description.as_deref());
    draft.political_leaning = classifier.classify(&LeaningSignal::new(
        raw.support_oppose_indicator.as_deref(),
        raw.candidate_party.as_deref(),
    ));
    draft.start_date = parse_opt_timestamp(raw.expenditure_date.as_deref())
        .or_else(|| parse_opt_timestamp(raw.dissemination_date.as_deref()));
    draft.fec_id = raw.file_number.as_ref().and_then(|v| v.as_text());
    draft.committee_id = committee_id;
    draft.meta("committeeName", raw.committee.as_ref().and_then(|c| c.name.clone()));
    draft.meta("transactionId", raw.transaction_id.clone());
    draft.meta("supportOpposeIndicator", raw.support_oppose_indicator.clone());
    draft.meta("candidateId", raw.candidate_id.clone());
    draft.meta("candidateName", raw.candidate_name.clone());
    draft.meta("candidateParty", raw.candidate_party.clone());
    draft.meta("payeeName", raw.payee_name.clone());
    draft.meta("memoCode", raw.memo_code.clone());
    draft.meta("disseminationDate", raw.dissemination_date.clone());
    if amount.is_some_and(|a| a < 0.0) {
        draft.meta("signCorrected", Some(true));
    }

    draft.finish(FecAdapter::LABEL, &fallback_url, fetched_at)
}

#[async_trait]
impl AdSource for FecAdapter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    async fn fetch_ads(&self, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let resp: ScheduleEResponse = self
            .http
            .get("/schedules/schedule_e/", &Self::query(options))
            .await?;
        if let Some(count) = resp.pagination.as_ref().and_then(|p| p.count) {
            tracing::debug!("{}: {} expenditure(s) match upstream", Self::NAME, count);
        }
        let fetched_at = Utc::now();
        // Paging is by page number, so rows start at the page boundary.
        let first_row = options.page_start(page_size(options));
        Ok(resp
            .results
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, self.classifier.as_ref(), first_row, i, fetched_at))
            .collect())
    }

    async fn fetch_spending_data(
        &self,
        options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        self.http
            .spending("/schedules/schedule_e/totals/by_candidate/", &Self::query(options))
            .await
    }

    fn request_summary(&self) -> Option<TrackerSummary> {
        Some(self.http.summary())
    }
}
