// reqwest-backed upstream for live inventory data
use crate::application::inventory_upstream::{InventoryUpstream, UpstreamError, UpstreamReply};
use crate::infrastructure::config::UpstreamSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpInventoryUpstream {
    client: reqwest::Client,
    dashboard_url: String,
    timeout: Duration,
}

impl HttpInventoryUpstream {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let timeout = Duration::from_millis(settings.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            client,
            dashboard_url: settings.dashboard_url(),
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl InventoryUpstream for HttpInventoryUpstream {
    async fn fetch_dashboard(&self) -> Result<UpstreamReply, UpstreamError> {
        let response = self
            .client
            .get(&self.dashboard_url)
            .header(CACHE_CONTROL, "no-store")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(UpstreamReply::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let value =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(UpstreamReply::Payload(value))
    }
}
