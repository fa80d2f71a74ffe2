//! HTTP implementation of the engine client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics;

use super::types::{
    Document, EngineClient, EngineError, EngineInfo, JudgeEntry, SearchParams,
};

/// Engine connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine base URL (e.g. "http://localhost:5000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Error body shape for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Serialize)]
struct JudgeRequest<'a> {
    query: &'a str,
    ids: &'a [String],
}

/// reqwest-backed engine client.
pub struct HttpEngineClient {
    client: Client,
    base_url: String,
}

impl HttpEngineClient {
    /// Create a new client from the given configuration.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, EngineError> {
        let timer = metrics::ENGINE_REQUEST_DURATION
            .with_label_values(&[endpoint])
            .start_timer();
        let result = Self::execute_inner(request).await;
        timer.observe_duration();

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::ENGINE_REQUESTS
            .with_label_values(&[endpoint, outcome])
            .inc();

        result
    }

    async fn execute_inner<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, EngineError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else {
                EngineError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("unknown").to_string();
            // The engine reports failures as { "detail": ... }; fall back
            // to the status line when the body is not in that shape.
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.detail,
                Err(_) => status_text.clone(),
            };
            return Err(EngineError::Server {
                status: status.as_u16(),
                status_text,
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl EngineClient for HttpEngineClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn info(&self) -> Result<EngineInfo, EngineError> {
        debug!("requesting engine info");
        self.execute("/info", self.client.get(self.url("/info"))).await
    }

    async fn search(&self, params: &SearchParams) -> Result<Vec<Document>, EngineError> {
        debug!(query = %params.query, "requesting search");
        let documents: Vec<Document> = self
            .execute("/search", self.client.post(self.url("/search")).json(params))
            .await?;

        metrics::DOCUMENTS_RETURNED
            .with_label_values(&[])
            .observe(documents.len() as f64);

        Ok(documents)
    }

    async fn judge(&self, query: &str, ids: &[String]) -> Result<Vec<JudgeEntry>, EngineError> {
        debug!(ids = ids.len(), "requesting judge");
        let body = JudgeRequest { query, ids };
        self.execute("/judge", self.client.post(self.url("/judge")).json(&body))
            .await
    }
}
