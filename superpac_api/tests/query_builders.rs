use chrono::{NaiveDate, TimeZone, Utc};
use superpac_api::{
    AdWatchQuery, AiringsQuery, ArchiveSearchQuery, FacebookArchiveQuery, IndependentExpendQuery,
    Query, ScheduleEQuery, TwitterAdsQuery, YouTubeCreativeQuery,
};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn twitter_end_time_is_rfc3339() {
    let end = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let url = TwitterAdsQuery::default().with_end_time(end).add_to_url(&base_url());
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![("end_time".to_string(), "2024-03-01T12:30:00Z".to_string())]
    );
}

#[test]
fn facebook_offset_paging() {
    let url = FacebookArchiveQuery::default()
        .with_offset(40)
        .with_limit(20)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("limit=20"));
    assert!(query.contains("offset=40"));
}

#[test]
fn youtube_region_and_token() {
    let url = YouTubeCreativeQuery::default()
        .with_date_range_start(day(2024, 4, 1))
        .with_page_token("20")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("region=US"));
    assert!(query.contains("date_range_start=2024-04-01"));
    assert!(query.contains("page_token=20"));
}

#[test]
fn fec_committee_ids_repeat() {
    let url = ScheduleEQuery::default()
        .with_committee_id("C00708475")
        .with_committee_id("C00709123")
        .with_max_date(day(2024, 12, 31))
        .add_to_url(&base_url());
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let committees: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "committee_id")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(committees, vec!["C00708475", "C00709123"]);
    assert!(pairs.contains(&("max_date".to_string(), "12/31/2024".to_string())));
}

#[test]
fn fec_never_sends_empty_dates() {
    let url = ScheduleEQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(!query.contains("min_date"));
    assert!(!query.contains("max_date"));
}

#[test]
fn opensecrets_fixed_method() {
    let url = IndependentExpendQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), Some("method=independentExpend&output=json"));
}

#[test]
fn adimpact_window() {
    let url = AiringsQuery::default()
        .with_start(day(2024, 5, 1))
        .with_end(day(2024, 5, 31))
        .with_offset(0)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("start=2024-05-01"));
    assert!(query.contains("end=2024-05-31"));
    assert!(query.contains("offset=0"));
}

#[test]
fn tvarchive_query_carries_lucene_window_and_fields() {
    let url = ArchiveSearchQuery::default()
        .with_date_from(day(2024, 6, 1))
        .with_date_to(day(2024, 6, 30))
        .with_rows(50)
        .add_to_url(&base_url());
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&(
        "q".to_string(),
        "collection:(political_ads) AND date:[2024-06-01 TO 2024-06-30]".to_string()
    )));
    assert!(pairs.contains(&("fl[]".to_string(), "identifier".to_string())));
    assert!(pairs.contains(&("output".to_string(), "json".to_string())));
    assert!(pairs.contains(&("rows".to_string(), "50".to_string())));
}

#[test]
fn aclu_unix_window() {
    let url = AdWatchQuery::default()
        .with_since(1_717_200_000)
        .with_until(1_719_792_000)
        .with_page(2)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("since=1717200000"));
    assert!(query.contains("until=1719792000"));
    assert!(query.contains("page=2"));
}
