//! Meta Ad Library archive payloads.

use serde::{Deserialize, Serialize};

use super::{lenient, Scalar};

/// Response wrapper for `/ads_archive`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FacebookArchiveResponse {
    pub data: Vec<FacebookAd>,
    #[serde(default)]
    pub paging: Option<serde_json::Value>,
}

/// Archived ad. Spend and impressions are only published as ranges.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FacebookAd {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub page_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub page_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bylines: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_creative_bodies: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_creative_link_titles: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_snapshot_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub spend: Option<BoundRange>,
    #[serde(default, deserialize_with = "lenient")]
    pub impressions: Option<BoundRange>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_delivery_start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_delivery_stop_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub publisher_platforms: Option<Vec<String>>,
}

/// `{"lower_bound": "100", "upper_bound": "199"}`; the upper bound is
/// missing for the top bucket.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoundRange {
    #[serde(default, deserialize_with = "lenient")]
    pub lower_bound: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub upper_bound: Option<Scalar>,
}
