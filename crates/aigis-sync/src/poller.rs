//! Repeating dual-source poll loop.
//!
//! Every tick fetches both job collections concurrently and applies each
//! result to the [`JobStore`] independently: one source failing logs a
//! warning and leaves that source's last good snapshot in place without
//! blocking the other source's update.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use aigis_client::ApiClient;
use aigis_models::{normalize, JobKind};

use crate::store::JobStore;

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Interval between poll ticks
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
        }
    }
}

impl PollerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            interval: Duration::from_secs(
                std::env::var("AIGIS_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3),
            ),
        }
    }
}

/// Handle for requesting an out-of-band poll, cloneable so the submission
/// path can trigger a refresh without owning the poller.
///
/// A refresh wakes the loop immediately and neither resets nor doubles the
/// interval timer.
#[derive(Debug, Clone, Default)]
pub struct Refresher {
    notify: Arc<Notify>,
}

impl Refresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an immediate poll. Safe to call before the loop is waiting;
    /// the wakeup is retained.
    pub fn refresh_now(&self) {
        self.notify.notify_one();
    }

    /// Wait for the next refresh request.
    pub async fn triggered(&self) {
        self.notify.notified().await;
    }
}

/// The repeating dual-source fetch cycle.
pub struct Poller {
    client: Arc<ApiClient>,
    store: Arc<JobStore>,
    config: PollerConfig,
}

/// Running poller. Dropping the handle does not stop the loop; call
/// [`PollerHandle::shutdown`] for clean teardown.
pub struct PollerHandle {
    refresher: Refresher,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Trigger an immediate poll without disturbing the timer.
    pub fn refresh_now(&self) {
        self.refresher.refresh_now();
    }

    /// Cloneable refresh handle for the submission path.
    pub fn refresher(&self) -> Refresher {
        self.refresher.clone()
    }

    /// Stop the loop. After this returns the loop has exited and any
    /// in-flight fetch is barred from mutating the store.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("poller task did not shut down cleanly: {e}");
        }
    }
}

impl Poller {
    pub fn new(client: Arc<ApiClient>, store: Arc<JobStore>, config: PollerConfig) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    /// Start the poll loop as a background task.
    ///
    /// The first tick fires immediately, so the store fills without waiting
    /// a full interval.
    pub fn spawn(self) -> PollerHandle {
        let refresher = Refresher::new();
        let cancel = CancellationToken::new();

        info!(interval = ?self.config.interval, "starting job poller");

        let task = tokio::spawn(self.run(refresher.clone(), cancel.clone()));

        PollerHandle {
            refresher,
            cancel,
            task,
        }
    }

    async fn run(self, refresher: Refresher, cancel: CancellationToken) {
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
                _ = refresher.triggered() => {
                    debug!("out-of-band refresh requested");
                }
            }

            // Each tick's fetch pair runs as its own task so a slow pair
            // never delays the next tick. Overlapping pairs may apply in
            // completion order; strict per-source ordering of applied
            // results is deliberately not guaranteed.
            let client = Arc::clone(&self.client);
            let store = Arc::clone(&self.store);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                poll_once(&client, &store, &cancel).await;
            });
        }

        info!("job poller stopped");
    }
}

/// One poll tick: fetch both collections concurrently and apply each
/// success independently.
async fn poll_once(client: &ApiClient, store: &JobStore, cancel: &CancellationToken) {
    let (clips, generated) = tokio::join!(
        client.list_jobs(JobKind::Clip),
        client.list_jobs(JobKind::Generate),
    );

    // Liveness guard: results from a fetch that was in flight during
    // shutdown must not land in the store.
    if cancel.is_cancelled() {
        return;
    }

    apply_result(store, JobKind::Clip, clips);
    apply_result(store, JobKind::Generate, generated);
}

fn apply_result(
    store: &JobStore,
    kind: JobKind,
    result: aigis_client::ClientResult<aigis_models::JobPayload>,
) {
    match result {
        Ok(payload) => {
            let records = normalize(kind, payload);
            debug!(kind = %kind, count = records.len(), "applied job snapshot");
            store.apply(kind, records);
        }
        Err(e) => {
            // Transient by assumption: keep the previous snapshot, the next
            // tick retries.
            warn!(kind = %kind, "poll fetch failed, retaining last snapshot: {e}");
        }
    }
}
