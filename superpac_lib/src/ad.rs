//! The canonical normalized ad record every adapter produces.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creative format. Closed set; unknown provider vocabulary maps to `Text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdType {
    Video,
    Image,
    #[default]
    Text,
    Carousel,
}

impl fmt::Display for AdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AdType::Video => "VIDEO",
                AdType::Image => "IMAGE",
                AdType::Text => "TEXT",
                AdType::Carousel => "CAROUSEL",
            }
        )
    }
}

/// Political leaning, only set when a provider carries a usable signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoliticalLeaning {
    Progressive,
    Conservative,
    Moderate,
    NonPartisan,
}

impl fmt::Display for PoliticalLeaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PoliticalLeaning::Progressive => "PROGRESSIVE",
                PoliticalLeaning::Conservative => "CONSERVATIVE",
                PoliticalLeaning::Moderate => "MODERATE",
                PoliticalLeaning::NonPartisan => "NON_PARTISAN",
            }
        )
    }
}

/// A normalized ad or spend record.
///
/// Invariants held by construction through [`crate::normalize::AdDraft`]:
/// `spend` is finite and non-negative, `title` is non-empty, `id` is
/// `"{provider}_{nativeId}"`, and `end_date` is never before `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: String,
    /// Registry name of the provider that produced the record.
    pub provider: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// US dollars.
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub ad_type: AdType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_leaning: Option<PoliticalLeaning>,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Provider-specific fields with no place in the schema.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fec_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committee_id: Option<String>,
}
