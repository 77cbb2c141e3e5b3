use crate::config::Config;
use crate::constants::{FETCH_TIMEOUT_SECS, FINMIND_API_BASE, FINMIND_SUCCESS_STATUS};
use crate::error::{AppError, Result};
use crate::models::{StockInfo, TickSnapshot};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Response envelope shared by all FinMind v4 endpoints.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: i64,
    #[serde(default)]
    msg: String,
    data: Option<Vec<T>>,
}

/// Unwrap a FinMind envelope: a non-success status surfaces the source's own
/// message, a success without a data array is a malformed response.
fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<Vec<T>> {
    if envelope.status != FINMIND_SUCCESS_STATUS {
        return Err(AppError::Remote(envelope.msg));
    }
    envelope
        .data
        .ok_or_else(|| AppError::Parse("FinMind response has no data array".to_string()))
}

/// Client for the FinMind v4 HTTP API.
///
/// Requests carry the API token as a query parameter and are bounded by a
/// fixed timeout so a stalled fetch aborts the current refresh instead of
/// hanging past its own period.
#[derive(Debug, Clone)]
pub struct FinMindClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl FinMindClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, FINMIND_API_BASE)
    }

    /// Build a client against a non-default base URL.
    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    /// Fetch the current per-stock tick snapshot for the whole market.
    pub async fn tick_snapshot(&self) -> Result<Vec<TickSnapshot>> {
        let url = format!("{}/taiwan_stock_tick_snapshot", self.base_url);
        let rows: Vec<TickSnapshot> = self.get_rows(&url, &[]).await?;
        debug!(row_count = rows.len(), "Fetched tick snapshot");
        Ok(rows)
    }

    /// Fetch the full per-stock metadata table. Called once at startup.
    pub async fn stock_info(&self) -> Result<Vec<StockInfo>> {
        let url = format!("{}/data", self.base_url);
        let rows: Vec<StockInfo> = self
            .get_rows(&url, &[("dataset", "TaiwanStockInfo")])
            .await?;
        info!(row_count = rows.len(), "Fetched stock info catalog");
        Ok(rows)
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        url: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut params: Vec<(&str, &str)> = vec![("token", self.token.as_str())];
        params.extend_from_slice(extra_params);

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request to {} failed: {}", url, e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Malformed FinMind response: {}", e)))?;

        unwrap_envelope(envelope)
    }
}
