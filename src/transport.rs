use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use tracing::warn;

/// What came back from the server, whatever the status class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,

    pub body: String,
}

/// One-shot request to the collector. `Ok` means a status line was received.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, content_type: &'static str, body: String) -> Result<Response>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Url,
    client: Client,
}

impl HttpTransport {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, content_type: &'static str, body: String) -> Result<Response> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .with_context(|| format!("failed to send POST to {}", self.endpoint))?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(status, "failed to read response body: {err}");
                String::new()
            }
        };

        Ok(Response { status, body })
    }
}
