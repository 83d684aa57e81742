//! Job status classification for display.
//!
//! The server reports status as a free-form string; [`JobStatus::classify`]
//! maps every possible input to a display category, falling back to
//! `Pending` for anything unrecognized.

use serde::{Deserialize, Serialize};

/// Server-reported job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is queued waiting for a worker
    #[default]
    Pending,
    /// Source video is being fetched
    Downloading,
    /// Job is actively being processed
    Processing,
    /// Job completed successfully
    Completed,
    /// Job failed with an error
    Failed,
}

/// Display styling class for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Amber,
    Blue,
    Green,
    Red,
}

impl StyleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKey::Amber => "amber",
            StyleKey::Blue => "blue",
            StyleKey::Green => "green",
            StyleKey::Red => "red",
        }
    }
}

impl JobStatus {
    /// Map a raw server status string to a display category.
    ///
    /// Total over all inputs: unrecognized values resolve to `Pending`.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "pending" => JobStatus::Pending,
            "downloading" => JobStatus::Downloading,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Pending,
        }
    }

    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Downloading => "downloading",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Badge styling for this status.
    ///
    /// `Downloading` shares the waiting style, matching the badge set the
    /// dashboard ships with.
    pub fn style_key(&self) -> StyleKey {
        match self {
            JobStatus::Pending | JobStatus::Downloading => StyleKey::Amber,
            JobStatus::Processing => StyleKey::Blue,
            JobStatus::Completed => StyleKey::Green,
            JobStatus::Failed => StyleKey::Red,
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
