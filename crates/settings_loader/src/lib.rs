//! # Settings Loader
//!
//! Centralized configuration loading for the budget dashboard.
//! Two sources are combined once at startup:
//!
//! - `settings.json`: endpoint URL, branding asset path, page title, bind address.
//!   Every field is optional and falls back to the built-in defaults.
//! - API secrets: `API_USER` and `API_PASSWORD` from the process environment.
//!   A `.env` file in the working directory is loaded first when present.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Settings from an explicit path, falling back to ./settings.json, then defaults
//! let path = Some(PathBuf::from("config/settings.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?;
//!
//! // Everything the server needs, secrets included
//! let config = settings_loader::load_runtime_config(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use models::{Credentials, Settings};

pub const API_USER_VAR: &str = "API_USER";
pub const API_PASSWORD_VAR: &str = "API_PASSWORD";
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Settings and secrets resolved once at startup.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub settings: Settings,
    pub credentials: Credentials,
}

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Resolves settings from the provided path, then `settings.json` in the current
/// directory, then the built-in defaults. A file that exists but does not parse is an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path);
        }
        tracing::warn!(path = %settings_path.display(), "settings file not found, trying default location");
    }

    if settings_file_exists(DEFAULT_SETTINGS_FILE) {
        return load_settings(DEFAULT_SETTINGS_FILE);
    }

    tracing::info!("no settings file found, using defaults");
    Ok(Settings::default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Reads the API credentials from the environment, loading `.env` first if present.
pub fn load_credentials() -> Result<Credentials> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    credentials_from(|key| std::env::var(key).ok())
}

/// Builds credentials from an arbitrary key lookup. Empty values count as missing.
pub fn credentials_from<F>(lookup: F) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| {
        lookup(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("Missing secret {key}; set it in the environment or in .env"))
    };
    let user = read(API_USER_VAR)?;
    let password = read(API_PASSWORD_VAR)?;
    Ok(Credentials::new(user, password))
}

/// Loads settings and secrets together.
pub fn load_runtime_config(settings_path: Option<&PathBuf>) -> Result<RuntimeConfig> {
    let settings = load_settings_with_fallback(settings_path)?;
    let credentials = load_credentials().context("Loading API credentials")?;
    Ok(RuntimeConfig {
        settings,
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_partial_settings_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "port": 9000, "page_title": "Painel" }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.page_title, "Painel");
        assert_eq!(settings.api_url, models::DEFAULT_API_URL);
        assert_eq!(settings.branding_path, models::DEFAULT_BRANDING_PATH);
    }

    #[test]
    fn test_malformed_settings_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_settings_with_fallback(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Parsing settings JSON"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{ "api_url": "http://localhost:1/q/1/T?" }"#).unwrap();

        let settings = load_settings_with_fallback(Some(&path)).unwrap();
        assert_eq!(settings.api_url, "http://localhost:1/q/1/T?");
    }

    #[test]
    fn test_credentials_from_lookup() {
        let vars: HashMap<&str, &str> = [(API_USER_VAR, "reader"), (API_PASSWORD_VAR, "pw")].into();
        let creds = credentials_from(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds, Credentials::new("reader", "pw"));
    }

    #[test]
    fn test_missing_password_is_reported() {
        let vars: HashMap<&str, &str> = [(API_USER_VAR, "reader"), (API_PASSWORD_VAR, "  ")].into();
        let err = credentials_from(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(err.to_string().contains(API_PASSWORD_VAR));
    }
}
