// Source trait for the dashboard's view of the proxy endpoint
use async_trait::async_trait;
use bytes::Bytes;

/// Raw answer from the proxy endpoint: status plus undecoded body.
#[derive(Debug, Clone)]
pub struct SourceResponse {
    pub status: u16,
    pub body: Bytes,
}

impl SourceResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch(&self) -> Result<SourceResponse, SourceError>;
}
