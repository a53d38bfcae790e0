//! OpenFEC Schedule E (independent expenditure) payloads.

use serde::{Deserialize, Serialize};

use super::{lenient, Scalar};

/// Response wrapper for `/schedules/schedule_e/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleEResponse {
    pub results: Vec<IndependentExpenditure>,
    #[serde(default, deserialize_with = "lenient")]
    pub pagination: Option<Pagination>,
}

/// A single independent expenditure line.
///
/// Amended and memo entries can carry a negative `expenditure_amount`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndependentExpenditure {
    #[serde(default, deserialize_with = "lenient")]
    pub sub_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub transaction_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub committee_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub committee: Option<CommitteeRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub expenditure_amount: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub expenditure_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dissemination_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub expenditure_description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub support_oppose_indicator: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub candidate_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub candidate_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub candidate_party: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub payee_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pdf_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub file_number: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub memo_code: Option<String>,
}

/// Committee reference nested in expenditure records.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommitteeRef {
    #[serde(default, deserialize_with = "lenient")]
    pub committee_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Page-number pagination block.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub pages: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub per_page: Option<i64>,
}
