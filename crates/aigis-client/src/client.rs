//! Aigis service HTTP client.

use aigis_models::{JobKind, JobPayload};
use reqwest::{Client, Response};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::types::{CreateClipRequest, CreateGenerateRequest, CreatedJob, ErrorBody};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service API, including the `/api` suffix
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("AIGIS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
        }
    }
}

/// Client for the Aigis job service.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().build().map_err(ClientError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Origin for downloadable artifacts: the base URL without its `/api`
    /// suffix. Output paths returned by the server are relative to this, not
    /// to the API base.
    pub fn asset_origin(&self) -> &str {
        self.config
            .base_url
            .trim_end_matches('/')
            .trim_end_matches("/api")
    }

    /// Absolute URL for a server-reported output path.
    pub fn download_url(&self, output_path: &str) -> String {
        if output_path.starts_with("http://") || output_path.starts_with("https://") {
            return output_path.to_string();
        }
        let origin = self.asset_origin();
        if output_path.starts_with('/') {
            format!("{origin}{output_path}")
        } else {
            format!("{origin}/{output_path}")
        }
    }

    /// Fetch the job collection for one source.
    ///
    /// The payload is returned as the server sent it (array or id-keyed
    /// map); callers normalize it.
    pub async fn list_jobs(&self, kind: JobKind) -> ClientResult<JobPayload> {
        let url = match kind {
            JobKind::Clip => format!("{}/jobs", self.config.base_url),
            JobKind::Generate => format!("{}/generate/jobs", self.config.base_url),
        };

        debug!(kind = %kind, "fetching job collection from {url}");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload = response
            .json::<JobPayload>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(payload)
    }

    /// Submit a new job of the given kind.
    ///
    /// `subject` is the video URL for clip jobs and the topic for generate
    /// jobs; the endpoint and body shape are selected by `kind`.
    pub async fn create_job(&self, kind: JobKind, subject: &str) -> ClientResult<CreatedJob> {
        let response = match kind {
            JobKind::Clip => {
                let url = format!("{}/jobs", self.config.base_url);
                self.http
                    .post(&url)
                    .json(&CreateClipRequest { url: subject })
                    .send()
                    .await?
            }
            JobKind::Generate => {
                let url = format!("{}/generate", self.config.base_url);
                self.http
                    .post(&url)
                    .json(&CreateGenerateRequest { topic: subject })
                    .send()
                    .await?
            }
        };

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let created = response
            .json::<CreatedJob>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(created)
    }
}

/// Build an [`ClientError::Api`] from a non-success response, preferring the
/// server-provided error body over a generic status-keyed message.
async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    };
    ClientError::Api { status, message }
}
