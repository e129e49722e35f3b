use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use api_client::ApiClientConfig;
use dashboard_engine::{load_branding, presentation};
use settings_loader::RuntimeConfig;

use crate::{handlers::AppState, router::create_router, source::ApiRecordSource};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "backend_api=debug,dashboard_engine=debug,api_client=info,tower_http=debug".into()
            }),
        )
        .init();
}

/// Build the shared state from configuration: HTTP record source plus the sidebar,
/// whose branding image is read from disk here, once. A malformed `api_url` fails here.
pub fn build_state(config: RuntimeConfig) -> anyhow::Result<AppState> {
    api_client::parse_url(&config.settings.api_url)
        .context("Invalid api_url in dashboard settings")?;

    let branding = load_branding(Path::new(&config.settings.branding_path));
    let source = ApiRecordSource::new(ApiClientConfig::from_settings(
        &config.settings,
        config.credentials,
    ));

    Ok(AppState {
        source: Arc::new(source),
        sidebar: Arc::new(presentation::sidebar(branding)),
        page_title: Arc::from(config.settings.page_title.as_str()),
    })
}

/// Run the dashboard server
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Branding, Credentials, Settings};

    fn config(api_url: &str) -> RuntimeConfig {
        RuntimeConfig {
            settings: Settings {
                api_url: api_url.to_string(),
                branding_path: "missing-logo.svg".to_string(),
                ..Settings::default()
            },
            credentials: Credentials::new("reader", "pw"),
        }
    }

    #[test]
    fn test_build_state_rejects_bad_api_url() {
        let err = build_state(config("not a url")).err().unwrap();
        assert!(err.to_string().contains("api_url"));
    }

    #[test]
    fn test_build_state_keeps_title_and_missing_logo_notice() {
        let state = build_state(config("http://127.0.0.1:9/RealizaConsulta")).unwrap();
        assert_eq!(&*state.page_title, "Senar Pernambuco");
        assert!(matches!(state.sidebar.branding, Branding::Unavailable { .. }));
    }
}
