//! HTTP client for the Aigis video processing service.
//!
//! Wraps the four endpoints the dashboard consumes: the two job-collection
//! listings and the two job-creation calls. The client returns raw
//! [`aigis_models::JobPayload`]s; translation into typed records happens in
//! the normalizer, not here.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use types::CreatedJob;
