// reqwest-backed dashboard source - polls the proxy endpoint like a browser would
use crate::application::dashboard_source::{DashboardSource, SourceError, SourceResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: reqwest::Client,
    url: String,
}

impl HttpDashboardSource {
    /// `timeout` bounds a single poll; the proxy itself bounds the upstream call.
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build dashboard HTTP client")?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn fetch(&self) -> Result<SourceResponse, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Body(e.to_string()))?;

        Ok(SourceResponse::new(status, body))
    }
}
