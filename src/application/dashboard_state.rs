// Dashboard state - What the dashboard shows, and how poll responses change it
use crate::application::dashboard_source::{SourceError, SourceResponse};
use crate::application::proxy_service::UNREACHABLE_STATUS;
use crate::domain::inventory::{DashboardPayload, InventoryRecord};
use crate::domain::summary::{InventorySummary, StatusFilter, filter_records};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A poll response reduced to the only two things the state cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded {
        records: Vec<InventoryRecord>,
        using_mock_data: bool,
    },
    Failed(String),
}

impl FetchOutcome {
    pub fn from_response(result: Result<SourceResponse, SourceError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed(e.to_string()),
        };

        // 502 still carries the fallback set, so it is rendered, not reported
        if !response.is_success() && response.status != UNREACHABLE_STATUS {
            return FetchOutcome::Failed(format!("HTTP error! status: {}", response.status));
        }

        match serde_json::from_slice::<DashboardPayload>(&response.body) {
            Ok(payload) => FetchOutcome::Loaded {
                records: payload.into_records(),
                using_mock_data: response.status == UNREACHABLE_STATUS,
            },
            Err(e) => FetchOutcome::Failed(format!("Invalid dashboard payload: {}", e)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub records: Vec<InventoryRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub using_mock_data: bool,
    pub status_filter: StatusFilter,
    latest_request: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
            last_updated: None,
            using_mock_data: false,
            status_filter: StatusFilter::All,
            latest_request: 0,
        }
    }

    /// Tag a new request. Any response for an earlier tag becomes stale.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.loading = true;
        self.latest_request
    }

    /// Apply the outcome of `request`. Returns false, leaving the state
    /// untouched, when a newer request has been issued since.
    pub fn apply(&mut self, request: u64, outcome: FetchOutcome, now: DateTime<Utc>) -> bool {
        if request != self.latest_request {
            return false;
        }

        match outcome {
            FetchOutcome::Loaded {
                records,
                using_mock_data,
            } => {
                self.records = records;
                self.last_updated = Some(now);
                self.error = None;
                self.using_mock_data = using_mock_data;
            }
            FetchOutcome::Failed(message) => {
                self.error = Some(message);
            }
        }
        self.loading = false;
        true
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary::from_records(&self.records)
    }

    pub fn visible_records(&self, filter: StatusFilter) -> Vec<InventoryRecord> {
        filter_records(&self.records, filter)
    }

    /// Render-ready view. `filter` overrides the stored filter for this view only.
    pub fn snapshot(&self, filter: Option<StatusFilter>) -> DashboardSnapshot {
        let status_filter = filter.unwrap_or(self.status_filter);

        DashboardSnapshot {
            records: self.visible_records(status_filter),
            summary: self.summary(),
            loading: self.loading,
            error: self.error.clone(),
            last_updated: self
                .last_updated
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            using_mock_data: self.using_mock_data,
            status_filter,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub records: Vec<InventoryRecord>,
    pub summary: InventorySummary,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<String>,
    pub using_mock_data: bool,
    pub status_filter: StatusFilter,
}
