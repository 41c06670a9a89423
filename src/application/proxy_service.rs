// Proxy service - Forward the dashboard request upstream, fall back to static data
use crate::application::inventory_upstream::{InventoryUpstream, UpstreamReply};
use crate::domain::fallback::fallback_records;
use crate::domain::inventory::InventoryRecord;
use crate::infrastructure::config::UpstreamSettings;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Status returned when the upstream could not be reached or read.
pub const UNREACHABLE_STATUS: u16 = 502;

/// Why the proxy answered the way it did. Carried alongside the status so an
/// upstream that literally returned 502 stays distinguishable from one that
/// never answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    LocalFallback,
    UpstreamRejected,
    UpstreamUnreachable,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::Live => "live",
            DataOrigin::LocalFallback => "local-fallback",
            DataOrigin::UpstreamRejected => "upstream-rejected",
            DataOrigin::UpstreamUnreachable => "upstream-unreachable",
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self != DataOrigin::Live
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProxyBody {
    Upstream(serde_json::Value),
    Fallback(Vec<InventoryRecord>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: ProxyBody,
    pub origin: DataOrigin,
}

impl ProxyReply {
    fn fallback(status: u16, origin: DataOrigin) -> Self {
        Self {
            status,
            body: ProxyBody::Fallback(fallback_records(Utc::now())),
            origin,
        }
    }
}

#[derive(Clone)]
pub struct ProxyService {
    upstream: Arc<dyn InventoryUpstream>,
    short_circuit: bool,
}

impl ProxyService {
    pub fn new(upstream: Arc<dyn InventoryUpstream>, settings: &UpstreamSettings) -> Self {
        Self {
            upstream,
            short_circuit: settings.short_circuits_to_fallback(),
        }
    }

    pub async fn fetch_dashboard(&self) -> ProxyReply {
        // A loopback backend cannot be reached from a hosted deployment
        if self.short_circuit {
            tracing::debug!("Loopback upstream in a hosted deployment, serving fallback data");
            return ProxyReply::fallback(200, DataOrigin::LocalFallback);
        }

        match self.upstream.fetch_dashboard().await {
            Ok(UpstreamReply::Payload(body)) => ProxyReply {
                status: 200,
                body: ProxyBody::Upstream(body),
                origin: DataOrigin::Live,
            },
            Ok(UpstreamReply::Rejected { status }) => {
                tracing::error!("Upstream returned: {}", status);
                ProxyReply::fallback(status, DataOrigin::UpstreamRejected)
            }
            Err(e) => {
                tracing::error!("Proxy error: {}", e);
                ProxyReply::fallback(UNREACHABLE_STATUS, DataOrigin::UpstreamUnreachable)
            }
        }
    }
}
