use crate::core::{ApiConfig, ApiResponse, HttpClient};
use crate::errors::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// `HttpClient` over reqwest. Non-2xx statuses come back as responses; only
/// transport failures are errors.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();

        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "response");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<ApiResponse> {
        debug!(url, "GET");
        self.send(self.client.get(url)).await
    }

    async fn post(&self, url: &str, data: &Value) -> Result<ApiResponse> {
        debug!(url, "POST");
        self.send(self.client.post(url).json(data)).await
    }

    async fn put(&self, url: &str, data: &Value) -> Result<ApiResponse> {
        debug!(url, "PUT");
        self.send(self.client.put(url).json(data)).await
    }

    async fn delete(&self, url: &str) -> Result<ApiResponse> {
        debug!(url, "DELETE");
        self.send(self.client.delete(url)).await
    }
}
