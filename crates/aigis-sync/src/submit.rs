//! Submission state machine for creating new jobs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use aigis_client::ApiClient;
use aigis_models::JobKind;

use crate::poller::Refresher;

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Job accepted; input cleared and an immediate poll requested
    Accepted,
    /// Input was empty, nothing sent
    Ignored,
    /// A submission is already in flight
    Busy,
    /// Service rejected the request or the transport failed; input preserved
    Rejected(String),
}

/// Validates and dispatches create-job requests.
///
/// Owns the input buffer (single writer besides the user) and a
/// `Idle -> Submitting -> Idle` state machine that rejects re-entry while a
/// request is in flight. The `Submitting` flag is released on every path,
/// including transport errors and cancellation of the submit future.
pub struct SubmissionController {
    client: Arc<ApiClient>,
    refresher: Refresher,
    input: Mutex<String>,
    submitting: AtomicBool,
}

impl SubmissionController {
    pub fn new(client: Arc<ApiClient>, refresher: Refresher) -> Self {
        Self {
            client,
            refresher,
            input: Mutex::new(String::new()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Replace the input buffer with what the user typed.
    pub fn set_input(&self, value: impl Into<String>) {
        *self.input.lock().expect("input lock poisoned") = value.into();
    }

    /// Current input buffer contents.
    pub fn input(&self) -> String {
        self.input.lock().expect("input lock poisoned").clone()
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Submit the current input as a new job of the given kind.
    ///
    /// Empty (or whitespace-only) input is a no-op, not an error: no request
    /// is issued and the state stays idle. On success the input buffer is
    /// cleared and an immediate poll is requested; on failure the input is
    /// preserved for retry and the server's error message (or a generic
    /// status-keyed fallback) is returned for display.
    pub async fn submit(&self, kind: JobKind) -> SubmitOutcome {
        let subject = self
            .input
            .lock()
            .expect("input lock poisoned")
            .trim()
            .to_string();
        if subject.is_empty() {
            return SubmitOutcome::Ignored;
        }

        if self.submitting.swap(true, Ordering::SeqCst) {
            return SubmitOutcome::Busy;
        }
        // Released on drop so the flag clears even if the submit future is
        // cancelled mid-await.
        let _guard = SubmittingGuard(&self.submitting);

        match self.client.create_job(kind, &subject).await {
            Ok(created) => {
                info!(kind = %kind, job_id = %created.job_id, "job submitted");
                self.input.lock().expect("input lock poisoned").clear();
                self.refresher.refresh_now();
                SubmitOutcome::Accepted
            }
            Err(e) => {
                warn!(kind = %kind, "job submission failed: {e}");
                SubmitOutcome::Rejected(e.user_message())
            }
        }
    }
}

struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
