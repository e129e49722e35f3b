use api_client::ApiClientConfig;
use async_trait::async_trait;
use models::RawRecord;

use crate::error::{ApiError, Result};

/// Where a render gets its rows from.
/// The HTTP implementation is swapped for fixed rows in tests.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>>;
}

/// Queries the budget API on every call.
pub struct ApiRecordSource {
    config: ApiClientConfig,
}

impl ApiRecordSource {
    pub fn new(config: ApiClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RecordSource for ApiRecordSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        // The blocking client is built, used and dropped off the async workers.
        let config = self.config.clone();
        let records = tokio::task::spawn_blocking(move || {
            api_client::fetch(&config.url, &config.credentials)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("fetch task failed: {e}")))??;
        Ok(records)
    }
}
