use anyhow::Context;
use backend_api::{build_state, init_tracing, run_server};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // SETTINGS_PATH, HOST and PORT override settings.json
    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let config = settings_loader::load_runtime_config(settings_path.as_ref())
        .context("Loading dashboard configuration")?;

    let host = env::var("HOST").unwrap_or_else(|_| config.settings.host.clone());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.settings.port);

    tracing::info!(
        api_url = %config.settings.api_url,
        branding = %config.settings.branding_path,
        user = %config.credentials.user,
        "configuration loaded"
    );

    let state = build_state(config).context("Building server state")?;
    run_server(state, &host, port).await?;

    Ok(())
}
