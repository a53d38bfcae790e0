//! Normalization rules shared by the adapters.
//!
//! Adapters translate a native record into an [`AdDraft`] and call
//! [`AdDraft::finish`], which applies the schema-wide defaults:
//!
//! - id: `"{provider}_{nativeId}"`
//! - title: trimmed, `"{Display name} Ad"` when blank or missing
//! - spend: absolute value; NaN/infinite/missing becomes `0.0`
//! - impressions/clicks: `0` when missing; when both are missing the record
//!   gets `metadata.metricsAvailable = false`
//! - start date: falls back to the end date, then to the fetch time, and sets
//!   `metadata.startDateInferred = true`
//! - end date: dropped when earlier than the start date

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use superpac_api::types::Scalar;

use crate::ad::{Ad, AdType, PoliticalLeaning};

/// Identity of the provider a record is being normalized for.
#[derive(Debug, Clone, Copy)]
pub struct ProviderLabel {
    pub name: &'static str,
    pub display_name: &'static str,
}

/// A partially normalized record. Every field except `native_id` may be
/// absent; `finish` fills in the documented defaults.
#[derive(Debug, Clone, Default)]
pub struct AdDraft {
    pub native_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub spend: Option<f64>,
    pub impressions: Option<u64>,
    pub clicks: Option<u64>,
    pub ad_type: AdType,
    pub political_leaning: Option<PoliticalLeaning>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub fec_id: Option<String>,
    pub committee_id: Option<String>,
}

impl AdDraft {
    pub fn new(native_id: impl Into<String>) -> Self {
        Self {
            native_id: native_id.into(),
            ..Self::default()
        }
    }

    /// Stores `value` under `key` in metadata when present.
    pub fn meta(&mut self, key: &str, value: Option<impl Into<serde_json::Value>>) {
        if let Some(value) = value {
            self.metadata.insert(key.to_string(), value.into());
        }
    }

    /// Applies the shared defaults. `fallback_url` is used when the record has
    /// no link of its own.
    pub fn finish(self, provider: ProviderLabel, fallback_url: &str, fetched_at: DateTime<Utc>) -> Ad {
        let mut metadata = self.metadata;

        let start_date = match (self.start_date, self.end_date) {
            (Some(start), _) => start,
            (None, Some(end)) => {
                metadata.insert("startDateInferred".to_string(), true.into());
                end
            }
            (None, None) => {
                metadata.insert("startDateInferred".to_string(), true.into());
                fetched_at
            }
        };
        let end_date = self.end_date.filter(|end| *end >= start_date);

        if self.impressions.is_none() && self.clicks.is_none() {
            metadata.insert("metricsAvailable".to_string(), false.into());
        }

        Ad {
            id: namespaced_id(provider.name, &self.native_id),
            provider: provider.name.to_string(),
            title: fallback_title(self.title.as_deref(), provider.display_name),
            description: non_blank(self.description.as_deref()),
            url: non_blank(self.url.as_deref()).unwrap_or_else(|| fallback_url.to_string()),
            thumbnail: non_blank(self.thumbnail.as_deref()),
            spend: non_negative_spend(self.spend),
            impressions: self.impressions.unwrap_or(0),
            clicks: self.clicks.unwrap_or(0),
            ad_type: self.ad_type,
            political_leaning: self.political_leaning,
            start_date,
            end_date,
            metadata,
            fec_id: non_blank(self.fec_id.as_deref()),
            committee_id: non_blank(self.committee_id.as_deref()),
        }
    }
}

/// `"{provider}_{nativeId}"`.
pub fn namespaced_id(provider: &str, native_id: &str) -> String {
    format!("{}_{}", provider, native_id.trim())
}

/// Native id from a scalar, or a positional id when the provider omitted it.
/// Positions include the request offset so pages never collide.
pub fn native_id_or_position(id: Option<&Scalar>, offset: u32, index: usize) -> String {
    id.and_then(Scalar::as_text)
        .unwrap_or_else(|| format!("row{}", offset as usize + index))
}

pub fn fallback_title(title: Option<&str>, display_name: &str) -> String {
    non_blank(title).unwrap_or_else(|| format!("{} Ad", display_name))
}

/// Sign correction for providers that report refunds or amendments as
/// negative amounts. Non-finite values become zero.
pub fn non_negative_spend(amount: Option<f64>) -> f64 {
    match amount {
        Some(v) if v.is_finite() => v.abs(),
        _ => 0.0,
    }
}

/// Trimmed text, `None` when blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// First present, non-blank value.
pub fn first_non_blank<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    values.into_iter().find_map(non_blank)
}

/// Parses the timestamp shapes seen across providers: RFC 3339, naive
/// `YYYY-MM-DDTHH:MM:SS` (taken as UTC), `YYYY-MM-DD`, `MM/DD/YYYY`, and
/// unix seconds.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(start_of_day(date));
        }
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return value.parse::<i64>().ok().and_then(from_unix);
    }
    None
}

/// Timestamp from an optional text field.
pub fn parse_opt_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(parse_timestamp)
}

pub fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

/// Unix seconds sent either as a number or as numeric text.
pub fn from_unix_scalar(value: &Scalar) -> Option<DateTime<Utc>> {
    match value {
        Scalar::Int(n) => from_unix(*n),
        Scalar::Float(n) if n.is_finite() => from_unix(*n as i64),
        Scalar::Float(_) => None,
        Scalar::Text(s) => parse_timestamp(s),
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(23, 59, 59).unwrap_or_default())
}

/// Midpoint of a reported range. An open top bucket (no upper bound) uses
/// the lower bound; a range with only an upper bound uses half of it.
pub fn range_midpoint(lower: Option<f64>, upper: Option<f64>) -> Option<f64> {
    match (lower, upper) {
        (Some(l), Some(u)) => Some((l + u) / 2.0),
        (Some(l), None) => Some(l),
        (None, Some(u)) => Some(u / 2.0),
        (None, None) => None,
    }
}

/// Creative format guessed from a free-text purpose line, as filed with
/// expenditure reports ("DIGITAL VIDEO ADVERTISING", "DIRECT MAIL").
/// Checked in order; anything unmatched is `Text`.
pub fn infer_ad_type_from_purpose(purpose: Option<&str>) -> AdType {
    static RULES: OnceLock<Vec<(Regex, AdType)>> = OnceLock::new();
    let rules = RULES.get_or_init(|| {
        [
            (
                r"(?i)\b(tv|television|video|broadcast|cable|streaming|ctv|ott|youtube)\b",
                AdType::Video,
            ),
            (r"(?i)\b(carousel|slideshow)\b", AdType::Carousel),
            (
                r"(?i)\b(mail|mailers?|print|billboards?|display|banner|digital|online|social|newspaper|image)\b",
                AdType::Image,
            ),
        ]
        .into_iter()
        .filter_map(|(pattern, ad_type)| match Regex::new(pattern) {
            Ok(re) => Some((re, ad_type)),
            Err(e) => {
                tracing::error!("Bad ad type pattern {}: {}", pattern, e);
                None
            }
        })
        .collect()
    });

    let Some(purpose) = purpose else {
        return AdType::Text;
    };
    rules
        .iter()
        .find(|(re, _)| re.is_match(purpose))
        .map(|(_, ad_type)| *ad_type)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: ProviderLabel = ProviderLabel {
        name: "fec",
        display_name: "FEC",
    };

    fn fetched_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn finish_applies_defaults() {
        let ad = AdDraft::new(" 123 ").finish(LABEL, "https://www.fec.gov", fetched_at());
        assert_eq!(ad.id, "fec_123");
        assert_eq!(ad.title, "FEC Ad");
        assert_eq!(ad.url, "https://www.fec.gov");
        assert_eq!(ad.spend, 0.0);
        assert_eq!(ad.impressions, 0);
        assert_eq!(ad.ad_type, AdType::Text);
        assert_eq!(ad.start_date, fetched_at());
        assert_eq!(ad.metadata["startDateInferred"], true);
        assert_eq!(ad.metadata["metricsAvailable"], false);
    }

    #[test]
    fn finish_corrects_sign_and_drops_inverted_end() {
        let mut draft = AdDraft::new("9");
        draft.spend = Some(-250.5);
        draft.impressions = Some(10);
        draft.start_date = parse_timestamp("2024-03-10");
        draft.end_date = parse_timestamp("2024-03-01");
        let ad = draft.finish(LABEL, "https://www.fec.gov", fetched_at());
        assert_eq!(ad.spend, 250.5);
        assert_eq!(ad.end_date, None);
        assert!(!ad.metadata.contains_key("metricsAvailable"));
        assert!(!ad.metadata.contains_key("startDateInferred"));
    }

    #[test]
    fn start_falls_back_to_end() {
        let mut draft = AdDraft::new("1");
        draft.end_date = parse_timestamp("2024-03-01");
        let ad = draft.finish(LABEL, "u", fetched_at());
        assert_eq!(Some(ad.start_date), ad.end_date);
    }

    #[test]
    fn spend_rejects_non_finite() {
        assert_eq!(non_negative_spend(Some(f64::NAN)), 0.0);
        assert_eq!(non_negative_spend(Some(f64::NEG_INFINITY)), 0.0);
        assert_eq!(non_negative_spend(Some(-3.0)), 3.0);
        assert_eq!(non_negative_spend(None), 0.0);
    }

    #[test]
    fn timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15"), Some(expected));
        assert_eq!(parse_timestamp("01/15/2024"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T01:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("1705276800"), Some(expected));
        assert_eq!(parse_timestamp("soon"), None);
        assert_eq!(parse_timestamp("  "), None);
    }

    #[test]
    fn unix_scalar_number_or_text() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(from_unix_scalar(&Scalar::Int(1_705_276_800)), Some(expected));
        assert_eq!(
            from_unix_scalar(&Scalar::Text("1705276800".into())),
            Some(expected)
        );
    }

    #[test]
    fn positional_ids_include_offset() {
        assert_eq!(native_id_or_position(None, 40, 2), "row42");
        assert_eq!(
            native_id_or_position(Some(&Scalar::Int(7)), 40, 2),
            "7"
        );
    }

    #[test]
    fn purpose_keywords() {
        assert_eq!(
            infer_ad_type_from_purpose(Some("DIGITAL VIDEO ADVERTISING")),
            AdType::Video
        );
        assert_eq!(infer_ad_type_from_purpose(Some("Cable TV buy")), AdType::Video);
        assert_eq!(infer_ad_type_from_purpose(Some("DIRECT MAIL - REFUND")), AdType::Image);
        assert_eq!(infer_ad_type_from_purpose(Some("Instagram carousel")), AdType::Carousel);
        assert_eq!(infer_ad_type_from_purpose(Some("PHONE BANKING")), AdType::Text);
        assert_eq!(infer_ad_type_from_purpose(None), AdType::Text);
    }

    #[test]
    fn midpoint_variants() {
        assert_eq!(range_midpoint(Some(100.0), Some(200.0)), Some(150.0));
        assert_eq!(range_midpoint(Some(100.0), None), Some(100.0));
        assert_eq!(range_midpoint(None, Some(100.0)), Some(50.0));
        assert_eq!(range_midpoint(None, None), None);
    }
}
