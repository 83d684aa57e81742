//! Request and response bodies for the service endpoints.

use serde::{Deserialize, Serialize};

/// Body for `POST /jobs`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateClipRequest<'a> {
    pub url: &'a str,
}

/// Body for `POST /generate`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGenerateRequest<'a> {
    pub topic: &'a str,
}

/// Acknowledgement returned by both create endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    pub job_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    // FastAPI-style services send `detail` instead of `error`
    #[serde(alias = "detail")]
    pub error: String,
}
