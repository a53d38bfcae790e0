use superpac_api::types::aclu::AdWatchResponse;
use superpac_api::types::adimpact::AiringsResponse;
use superpac_api::types::facebook::FacebookArchiveResponse;
use superpac_api::types::fec::ScheduleEResponse;
use superpac_api::types::opensecrets::IndependentExpendResponse;
use superpac_api::types::tvarchive::ArchiveSearchResponse;
use superpac_api::types::twitter::TwitterAdsResponse;
use superpac_api::types::youtube::YouTubeCreativesResponse;
use superpac_api::types::{OneOrMany, Scalar};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_twitter_ads() {
    let resp: TwitterAdsResponse = serde_json::from_str(&load_fixture("twitter_ads.json")).unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.next_cursor.as_deref(), Some("2"));

    let first = &resp.data[0];
    assert_eq!(first.id, Some(Scalar::Text("1760001".to_string())));
    assert_eq!(first.spend_micro, Some(Scalar::Int(12_500_000_000)));
    assert_eq!(first.impressions, Some(840_000));

    // A numeric id and a string impressions count in the same payload
    let second = &resp.data[1];
    assert_eq!(second.id, Some(Scalar::Int(1_760_002)));
    assert_eq!(second.impressions, None);
    assert_eq!(second.name, None);
}

#[test]
fn deserialize_facebook_ranges() {
    let resp: FacebookArchiveResponse =
        serde_json::from_str(&load_fixture("facebook_ads.json")).unwrap();
    assert_eq!(resp.data.len(), 2);
    let spend = resp.data[0].spend.as_ref().unwrap();
    assert_eq!(spend.lower_bound, Some(Scalar::Text("1000".to_string())));
    assert_eq!(spend.upper_bound, Some(Scalar::Text("1999".to_string())));

    let open = resp.data[1].spend.as_ref().unwrap();
    assert!(open.upper_bound.is_none());
    assert!(resp.data[1].impressions.is_none());
}

#[test]
fn deserialize_youtube_camel_case() {
    let resp: YouTubeCreativesResponse =
        serde_json::from_str(&load_fixture("youtube_creatives.json")).unwrap();
    assert_eq!(resp.creatives.len(), 2);
    assert!(resp.next_page_token.is_none());
    assert_eq!(resp.creatives[0].impressions.as_deref(), Some("1M-10M"));
    assert_eq!(
        resp.creatives[1].spend_range_max_usd,
        Some(Scalar::Text("100".to_string()))
    );
}

#[test]
fn deserialize_fec_schedule_e() {
    let resp: ScheduleEResponse =
        serde_json::from_str(&load_fixture("fec_schedule_e.json")).unwrap();
    assert_eq!(resp.results.len(), 2);
    assert_eq!(resp.pagination.as_ref().unwrap().count, Some(2));

    let refund = &resp.results[1];
    assert_eq!(refund.expenditure_amount, Some(Scalar::Float(-12000.5)));
    assert_eq!(refund.support_oppose_indicator.as_deref(), Some("O"));
    assert_eq!(
        refund.committee.as_ref().unwrap().name.as_deref(),
        Some("AMERICAN TECHNOLOGY EXCELLENCE PROJECT")
    );
}

#[test]
fn deserialize_fec_empty_page() {
    let resp: ScheduleEResponse =
        serde_json::from_str(&load_fixture("empty_results.json")).unwrap();
    assert!(resp.results.is_empty());
}

#[test]
fn deserialize_opensecrets_list_and_single() {
    let list: IndependentExpendResponse =
        serde_json::from_str(&load_fixture("opensecrets_indexp.json")).unwrap();
    let entries = list.response.indexp.into_vec();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].attributes.suppopp.as_deref(), Some("Support"));

    let single: IndependentExpendResponse =
        serde_json::from_str(&load_fixture("opensecrets_single.json")).unwrap();
    assert!(matches!(single.response.indexp, OneOrMany::One(_)));
}

#[test]
fn deserialize_opensecrets_without_results() {
    let resp: IndependentExpendResponse = serde_json::from_str(r#"{"response": {}}"#).unwrap();
    assert!(resp.response.indexp.into_vec().is_empty());
}

#[test]
fn deserialize_adimpact() {
    let resp: AiringsResponse =
        serde_json::from_str(&load_fixture("adimpact_airings.json")).unwrap();
    assert_eq!(resp.total, Some(2));
    assert_eq!(resp.ads[0].est_spend_cents, Some(Scalar::Int(4_275_050)));
    assert_eq!(resp.ads[1].airings, None);
}

#[test]
fn deserialize_tvarchive_string_or_list() {
    let resp: ArchiveSearchResponse =
        serde_json::from_str(&load_fixture("tvarchive_search.json")).unwrap();
    assert_eq!(resp.response.num_found, Some(2));
    let docs = &resp.response.docs;
    assert!(matches!(docs[0].title, Some(OneOrMany::One(_))));
    assert!(matches!(docs[0].description, Some(OneOrMany::Many(_))));
    assert!(docs[1].title.is_none());
}

#[test]
fn deserialize_aclu() {
    let resp: AdWatchResponse = serde_json::from_str(&load_fixture("aclu_ads.json")).unwrap();
    assert_eq!(resp.items.len(), 2);
    assert_eq!(resp.items[0].first_seen, Some(Scalar::Int(1_717_200_000)));
    assert_eq!(
        resp.items[1].first_seen,
        Some(Scalar::Text("1717286400".to_string()))
    );
}

#[test]
fn missing_envelope_is_an_error() {
    let result = serde_json::from_str::<TwitterAdsResponse>(r#"{"errors": [{"message": "x"}]}"#);
    assert!(result.is_err());
}
