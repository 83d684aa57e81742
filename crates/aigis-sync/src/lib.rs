//! Job synchronization engine for the Aigis dashboard.
//!
//! Three pieces, wired together by the binary:
//! - [`JobStore`] keeps the last good snapshot per source and produces the
//!   merged, time-ordered display list
//! - [`Poller`] drives the repeating dual-source fetch cycle with per-source
//!   failure isolation, manual refresh, and cancel-safe shutdown
//! - [`SubmissionController`] owns the input buffer and the
//!   Idle/Submitting state machine for creating new jobs

pub mod poller;
pub mod store;
pub mod submit;

pub use poller::{Poller, PollerConfig, PollerHandle, Refresher};
pub use store::JobStore;
pub use submit::{SubmissionController, SubmitOutcome};
