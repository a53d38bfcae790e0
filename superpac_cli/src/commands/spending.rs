//! The `spending` subcommand: a provider's aggregate spend payload as JSON.

use anyhow::Result;
use clap::Args;
use superpac_lib::{Aggregator, Registry};

use crate::output::print_json;

#[derive(Args)]
pub struct SpendingArgs {
    /// Provider to query
    #[arg(long)]
    pub provider: String,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub end_date: Option<String>,
}

pub async fn run(args: &SpendingArgs, registry: Registry) -> Result<()> {
    let options =
        super::fetch_options(args.start_date.as_deref(), args.end_date.as_deref(), None, None)?;
    let aggregator = Aggregator::new(registry);
    let summary = aggregator.spending_one(&args.provider, &options).await?;
    print_json(&summary);
    Ok(())
}
