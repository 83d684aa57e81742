//! Typed job records for the merged dashboard view.

use serde::{Deserialize, Serialize};

use crate::status::JobStatus;

/// Which remote collection a job belongs to.
///
/// Set at normalization time from the call site, never inferred from
/// payload content, and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Clip an existing video given its URL
    Clip,
    /// Generate a new short video from a topic
    Generate,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Clip => "clip",
            JobKind::Generate => "generate",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One job as shown in the dashboard.
///
/// The store is a live mirror of server state: a record exists while the
/// server reports it and is replaced wholesale on every poll. Ids are only
/// unique within a kind, so the identity of a record is [`JobRecord::key`],
/// not `id` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Opaque server-assigned identifier, stable for the job's lifetime
    pub id: String,
    /// Source collection
    pub kind: JobKind,
    /// The submitted URL (clip) or topic (generate)
    pub subject: String,
    /// Current lifecycle status
    pub status: JobStatus,
    /// Progress percentage (0-100)
    pub progress: u8,
    /// Creation time as epoch seconds; 0 when the server omitted it
    pub created_at: f64,
    /// Path to the finished artifact, present once completed
    pub output_url: Option<String>,
    /// Error message for failed or partially failed jobs
    pub error: Option<String>,
    /// Predicted engagement score (0-100) for analyzed clip jobs
    pub virality_score: Option<f64>,
}

impl JobRecord {
    /// Identity of this record in the merged view.
    pub fn key(&self) -> (JobKind, &str) {
        (self.kind, &self.id)
    }

    /// Whether the finished artifact can be downloaded.
    pub fn download_available(&self) -> bool {
        self.status == JobStatus::Completed && self.output_url.is_some()
    }
}
