use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use superpac_lib::{Ad, ProviderStatus, Registry, TrackerSummary};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

const TITLE_WIDTH: usize = 60;

#[derive(Tabled, Serialize)]
struct AdRow {
    #[tabled(rename = "Provider")]
    #[serde(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Start")]
    #[serde(rename = "Start")]
    start: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    ad_type: String,
    #[tabled(rename = "Leaning")]
    #[serde(rename = "Leaning")]
    leaning: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Impressions")]
    #[serde(rename = "Impressions")]
    impressions: u64,
    #[tabled(rename = "Clicks")]
    #[serde(rename = "Clicks")]
    clicks: u64,
}

#[derive(Tabled, Serialize)]
struct StatusRow {
    #[tabled(rename = "Provider")]
    #[serde(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Ads")]
    #[serde(rename = "Ads")]
    count: usize,
    #[tabled(rename = "Elapsed")]
    #[serde(rename = "Elapsed")]
    elapsed: String,
    #[tabled(rename = "Error")]
    #[serde(rename = "Error")]
    error: String,
}

#[derive(Tabled, Serialize)]
struct ProviderRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Display Name")]
    #[serde(rename = "Display Name")]
    display_name: String,
}

// -- Row builders --

fn build_ad_rows(ads: &[Ad], truncate_titles: bool) -> Vec<AdRow> {
    ads.iter()
        .map(|ad| AdRow {
            provider: ad.provider.clone(),
            start: ad.start_date.format("%Y-%m-%d").to_string(),
            title: if truncate_titles {
                truncate(&ad.title, TITLE_WIDTH)
            } else {
                ad.title.clone()
            },
            ad_type: ad.ad_type.to_string(),
            leaning: ad
                .political_leaning
                .map(|l| l.to_string())
                .unwrap_or_default(),
            spend: format_spend(ad.spend),
            impressions: ad.impressions,
            clicks: ad.clicks,
        })
        .collect()
}

fn build_status_rows(statuses: &BTreeMap<String, ProviderStatus>) -> Vec<StatusRow> {
    statuses
        .iter()
        .map(|(name, status)| StatusRow {
            provider: name.clone(),
            count: status.count,
            elapsed: format!("{}ms", status.elapsed_ms),
            error: status.error.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_provider_rows(registry: &Registry) -> Vec<ProviderRow> {
    registry
        .list_providers()
        .into_iter()
        .filter_map(|name| {
            let adapter = registry.get(&name)?;
            Some(ProviderRow {
                display_name: adapter.display_name().to_string(),
                name,
            })
        })
        .collect()
}

// -- Rendering --

fn render_table<T: Tabled>(rows: Vec<T>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn render_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(rows, false)),
        OutputFormat::Markdown => println!("{}", render_table(rows, true)),
        OutputFormat::Csv => print!("{}", render_csv(&rows)?),
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_ads(ads: &[Ad], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&ads);
            Ok(())
        }
        OutputFormat::Csv => print_rows(build_ad_rows(ads, false), format),
        _ => print_rows(build_ad_rows(ads, true), format),
    }
}

pub fn print_providers(registry: &Registry, format: &OutputFormat) -> Result<()> {
    print_rows(build_provider_rows(registry), format)
}

/// Per-provider outcome, written to stderr so it never mixes with the ads.
pub fn eprint_statuses(statuses: &BTreeMap<String, ProviderStatus>) {
    if statuses.is_empty() {
        return;
    }
    eprintln!("{}", render_table(build_status_rows(statuses), false));
}

pub fn eprint_request_summary(provider: &str, summary: &TrackerSummary) {
    eprintln!(
        "{}: {} request(s), {} ok, {} rate-limited, {} failed, {} out of time, {:.1}s backoff",
        provider,
        summary.requests_made,
        summary.requests_succeeded,
        summary.requests_rate_limited,
        summary.requests_failed,
        summary.deadlines_exceeded,
        summary.total_backoff_secs
    );
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_spend(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
