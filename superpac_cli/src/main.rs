mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use superpac_lib::{configure_adapters, EnvCredentials, SyncConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "superpac")]
#[command(about = "Collect and normalize political ad spend across ad-transparency providers")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// TOML file with per-provider overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the providers that are configured and registered
    Providers,
    /// Fetch ads from one provider or all of them
    Sync(commands::sync::SyncArgs),
    /// Fetch a provider's aggregate spending payload
    Spending(commands::spending::SpendingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("superpac=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        other => bail!(
            "unknown output format '{}': expected table, json, csv, or markdown",
            other
        ),
    };

    let config = match &cli.config {
        Some(path) => SyncConfig::load(path)?,
        None => SyncConfig::default(),
    };
    let registry = configure_adapters(&EnvCredentials, &config)?;

    match &cli.command {
        Commands::Providers => commands::providers::run(&registry, &format)?,
        Commands::Sync(args) => commands::sync::run(args, registry, &format).await?,
        Commands::Spending(args) => commands::spending::run(args, registry).await?,
    }

    Ok(())
}
