// Upstream trait for live inventory data access
use async_trait::async_trait;
use std::time::Duration;

/// What the upstream said, when it said anything at all.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// Success status with a JSON body, kept verbatim
    Payload(serde_json::Value),
    /// Non-success status
    Rejected { status: u16 },
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream unreachable: {0}")]
    Transport(String),

    #[error("upstream returned an unreadable body: {0}")]
    Decode(String),
}

#[async_trait]
pub trait InventoryUpstream: Send + Sync {
    /// Fetch the current dashboard data set
    async fn fetch_dashboard(&self) -> Result<UpstreamReply, UpstreamError>;
}
