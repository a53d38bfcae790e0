//! CLI subcommand implementations.

pub mod providers;
pub mod spending;
pub mod sync;

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use superpac_lib::FetchOptions;

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date '{}': expected YYYY-MM-DD", value))
}

/// Builds fetch options from the shared date/paging flags.
pub(crate) fn fetch_options(
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<FetchOptions> {
    let mut options = FetchOptions::default();
    let start = start_date.map(parse_date).transpose()?;
    let end = end_date.map(parse_date).transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            bail!("--start-date {} is after --end-date {}", s, e);
        }
    }
    if let Some(start) = start {
        options = options.with_start_date(start);
    }
    if let Some(end) = end {
        options = options.with_end_date(end);
    }
    if let Some(limit) = limit {
        if limit == 0 {
            bail!("--limit must be at least 1");
        }
        options = options.with_limit(limit);
    }
    if let Some(offset) = offset {
        options = options.with_offset(offset);
    }
    Ok(options)
}
