//! Opaque relay to the upstream chat-completion API.

use crate::config::UpstreamConfig;
use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use reqwest::Client;
use serde_json::{Map, Value};
use service_core::error::AppError;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// What the upstream answered, passed back to the caller unchanged.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    completions_url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            completions_url: completions_url(&config.base_url),
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    /// POSTs `payload` upstream. Any status the upstream returns is a
    /// success here; only transport failures become errors.
    pub async fn forward_chat_completion(
        &self,
        payload: &Value,
    ) -> Result<UpstreamResponse, AppError> {
        tracing::debug!(url = %self.completions_url, "Forwarding chat completion");

        let response = self
            .client
            .post(&self.completions_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %self.completions_url, error = %e, "Upstream request failed");
                AppError::from(e)
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Upstream responded");

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH)
}

/// The JSON object to forward: the inbound body when it is one, else `{}`.
pub fn payload_from_body(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Value::Object(map),
        _ => Value::Object(Map::new()),
    }
}
