use models::{Credentials, RawRecord, Settings};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("API request failed with HTTP status {status}")]
    Status { status: u16 },

    #[error("Unexpected response shape: {reason}")]
    Format { reason: String },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    fn format(reason: impl Into<String>) -> Self {
        FetchError::Format {
            reason: reason.into(),
        }
    }
}

/// Where the budget query lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub url: String,
    pub credentials: Credentials,
}

impl ApiClientConfig {
    pub fn from_settings(settings: &Settings, credentials: Credentials) -> Self {
        Self {
            url: settings.api_url.clone(),
            credentials,
        }
    }
}

/// Blocking client for the SQL query endpoint. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct BudgetApiClient {
    http: Client,
    url: Url,
    credentials: Credentials,
}

impl BudgetApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, FetchError> {
        let http = http_client_builder().build()?;
        Self::with_http_client(config, http)
    }

    /// Uses a caller-built HTTP client (proxy or TLS settings of its own).
    pub fn with_http_client(config: ApiClientConfig, http: Client) -> Result<Self, FetchError> {
        let url = parse_url(&config.url)?;

        Ok(Self {
            http,
            url,
            credentials: config.credentials,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Runs the query and returns every row of the response.
    pub fn fetch_records(&self) -> Result<Vec<RawRecord>, FetchError> {
        let response = self
            .http
            .get(self.url.clone())
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .send()
            .map_err(|e| {
                tracing::warn!(url = %self.url, error = %e, "budget API unreachable");
                FetchError::Transport(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text()?;
        let records = parse_response(status, &body).inspect_err(|e| {
            tracing::warn!(url = %self.url, status, error = %e, "budget API response rejected");
        })?;
        tracing::info!(url = %self.url, rows = records.len(), "fetched budget records");
        Ok(records)
    }
}

/// Client settings shared by every request: JSON accept header and no request timeout.
pub fn http_client_builder() -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    // The blocking client defaults to 30s; slow queries are waited for.
    Client::builder()
        .default_headers(headers)
        .timeout(Option::<Duration>::None)
}

/// Validates the configured endpoint.
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// One-shot fetch: builds a client for `url` and runs the query once.
pub fn fetch(url: &str, credentials: &Credentials) -> Result<Vec<RawRecord>, FetchError> {
    BudgetApiClient::new(ApiClientConfig {
        url: url.to_string(),
        credentials: credentials.clone(),
    })?
    .fetch_records()
}

/// Turns a response into records, applying the status rule first.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<RawRecord>, FetchError> {
    if status != StatusCode::OK.as_u16() {
        return Err(FetchError::Status { status });
    }
    parse_records(body)
}

/// Parses a 200 body. Anything other than a non-empty array of objects is a format error.
pub fn parse_records(body: &str) -> Result<Vec<RawRecord>, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::format(format!("body is not JSON ({e})")))?;

    let rows = match value {
        Value::Array(rows) if !rows.is_empty() => rows,
        Value::Array(_) => return Err(FetchError::format("empty array")),
        other => {
            return Err(FetchError::format(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            if !row.is_object() {
                return Err(FetchError::format(format!(
                    "row {idx} is {}, expected an object",
                    json_kind(&row)
                )));
            }
            serde_json::from_value::<RawRecord>(row)
                .map_err(|e| FetchError::format(format!("row {idx}: {e}")))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
