//! AdImpact political airings payloads.

use serde::{Deserialize, Serialize};

use super::{lenient, Scalar};

/// Response wrapper for `/v1/political/airings`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiringsResponse {
    pub ads: Vec<AdImpactAd>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
}

/// A creative with its estimated spend in cents and airing count.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdImpactAd {
    #[serde(default, deserialize_with = "lenient")]
    pub creative_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sponsor: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub est_spend_cents: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub airings: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_aired: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_aired: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub party: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub race: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub market: Option<String>,
}
