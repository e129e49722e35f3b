use anyhow::{Context, Result};
use api_client::{ApiClientConfig, BudgetApiClient};
use clap::Parser;
use dashboard_engine::{generate_dashboard, write_dashboard_json};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fetch the budget query once and write the computed dashboard as JSON.
#[derive(Debug, Parser)]
#[command(name = "generate-dashboard", version, about, long_about = None)]
struct Args {
    /// Path to settings.json (falls back to ./settings.json, then defaults)
    #[arg(short = 's', long = "settings")]
    settings: Option<PathBuf>,

    /// Output file
    #[arg(short = 'o', long = "out", default_value = "dashboard/dashboard.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_engine=debug,api_client=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = settings_loader::load_runtime_config(args.settings.as_ref())?;
    let client = BudgetApiClient::new(ApiClientConfig::from_settings(
        &config.settings,
        config.credentials,
    ))
    .context("build API client")?;

    tracing::info!(url = %client.url(), out = %args.out.display(), "generating dashboard");

    let dashboard =
        generate_dashboard(&client, &config.settings.page_title).context("generate dashboard")?;
    write_dashboard_json(&dashboard, &args.out).context("write dashboard.json")?;

    tracing::info!(
        generated_at = %dashboard.metadata.generated_at,
        warnings = dashboard.warnings.len(),
        "done"
    );
    Ok(())
}
