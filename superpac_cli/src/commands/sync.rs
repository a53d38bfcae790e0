//! The `sync` subcommand: fetch normalized ads from one provider or all.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use superpac_lib::{Aggregator, Registry, SyncReport};

use crate::output::{eprint_request_summary, eprint_statuses, print_ads, print_json, OutputFormat};

/// Arguments for the `sync` subcommand.
#[derive(Args)]
pub struct SyncArgs {
    /// Only fetch from this provider (see `superpac providers`)
    #[arg(long)]
    pub provider: Option<String>,

    /// Earliest ad start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest ad date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Maximum records per provider
    #[arg(long)]
    pub limit: Option<u32>,

    /// Records to skip per provider
    #[arg(long)]
    pub offset: Option<u32>,

    /// Abort providers still running after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Exit with an error when no ads came back or every provider failed
    #[arg(long)]
    pub require_results: bool,
}

pub async fn run(args: &SyncArgs, registry: Registry, format: &OutputFormat) -> Result<()> {
    let options = super::fetch_options(
        args.start_date.as_deref(),
        args.end_date.as_deref(),
        args.limit,
        args.offset,
    )?;

    let mut aggregator = Aggregator::new(registry);
    if let Some(secs) = args.deadline_secs {
        aggregator = aggregator.with_deadline(Duration::from_secs(secs));
    }

    if let Some(name) = &args.provider {
        let ads = aggregator.sync_one(name, &options).await?;
        print_ads(&ads, format)?;
        print_request_summaries(&aggregator, Some(name));
        if args.require_results && ads.is_empty() {
            bail!("{} returned no ads", name);
        }
        return Ok(());
    }

    if aggregator.registry().is_empty() {
        bail!("no providers registered; set provider credentials in the environment or .env");
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!(
        "syncing {} provider(s)...",
        aggregator.registry().len()
    ));
    pb.enable_steady_tick(Duration::from_millis(120));
    let report = aggregator.sync_all(&options).await;
    pb.finish_and_clear();

    match format {
        OutputFormat::Json => print_json(&report),
        _ => {
            print_ads(&report.ads, format)?;
            eprint_statuses(&report.per_provider_status);
        }
    }
    print_request_summaries(&aggregator, None);
    eprintln!(
        "Sync complete: {} ad(s), ${:.2} total spend, {} provider(s) failed",
        report.ads.len(),
        report.total_spend(),
        report.failed_providers().len()
    );

    if args.require_results {
        check_results(&report)?;
    }
    Ok(())
}

fn check_results(report: &SyncReport) -> Result<()> {
    if report.all_failed() {
        bail!(
            "every provider failed: {}",
            report.failed_providers().join(", ")
        );
    }
    if report.ads.is_empty() {
        bail!("sync returned no ads");
    }
    Ok(())
}

fn print_request_summaries(aggregator: &Aggregator, only: Option<&str>) {
    for name in aggregator.list_providers() {
        if only.is_some_and(|o| o != name) {
            continue;
        }
        if let Some(summary) = aggregator
            .registry()
            .get(&name)
            .and_then(|adapter| adapter.request_summary())
        {
            eprint_request_summary(&name, &summary);
        }
    }
}
