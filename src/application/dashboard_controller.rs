// Dashboard controller - Periodic polling of the proxy endpoint
use crate::application::dashboard_source::DashboardSource;
use crate::application::dashboard_state::{DashboardSnapshot, DashboardState, FetchOutcome};
use crate::domain::summary::StatusFilter;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

pub struct DashboardController {
    source: Arc<dyn DashboardSource>,
    state: RwLock<DashboardState>,
}

impl DashboardController {
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        Self {
            source,
            state: RwLock::new(DashboardState::new()),
        }
    }

    /// Run one poll. Returns whether the response was applied; a response
    /// overtaken by a later request is dropped.
    pub async fn refresh(&self) -> bool {
        let request = self.state.write().await.begin_request();

        let outcome = FetchOutcome::from_response(self.source.fetch().await);
        if let FetchOutcome::Failed(message) = &outcome {
            tracing::warn!("Error fetching data: {}", message);
        }

        let applied = self.state.write().await.apply(request, outcome, Utc::now());
        if !applied {
            tracing::debug!("Discarding stale response for request {}", request);
        }
        applied
    }

    pub async fn set_filter(&self, filter: StatusFilter) {
        self.state.write().await.set_filter(filter);
    }

    pub async fn snapshot(&self, filter: Option<StatusFilter>) -> DashboardSnapshot {
        self.state.read().await.snapshot(filter)
    }

    /// Poll immediately, then every `period`. Ticks are time-based, so a slow
    /// fetch can overlap the next one; sequencing in the state settles which wins.
    pub fn spawn_poller(self: &Arc<Self>, period: Duration) -> PollerHandle {
        let controller = Arc::clone(self);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let controller = Arc::clone(&controller);
                        in_flight.spawn(async move {
                            controller.refresh().await;
                        });
                    }
                    Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                }
            }
        });

        PollerHandle { task }
    }
}

/// Owns the polling task. Dropping it stops the timer and aborts in-flight fetches.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
