//! Shared data models for the Aigis dashboard client.
//!
//! This crate provides:
//! - Typed job records and their lifecycle status
//! - Status classification for display (category + style key)
//! - The payload normalizer, the single translation boundary from the
//!   server's heterogeneous JSON shapes into typed records

pub mod normalize;
pub mod record;
pub mod status;

// Re-export common types
pub use normalize::{normalize, JobPayload, RawJob};
pub use record::{JobKind, JobRecord};
pub use status::{JobStatus, StyleKey};
