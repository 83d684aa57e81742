//! Payload normalization: the single translation boundary from server JSON
//! into typed [`JobRecord`]s.
//!
//! The server may return a job collection as either a JSON array or an
//! id-keyed object; both shapes produce the same record sequence. All field
//! leniency (missing progress, datetime-or-epoch timestamps, unknown status
//! strings) lives here so everything downstream is strictly typed.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::record::{JobKind, JobRecord};
use crate::status::JobStatus;

/// Progress shown for jobs the server has not started reporting on, so the
/// progress bar stays visible pre-processing.
const PLACEHOLDER_PROGRESS: u8 = 10;

/// A job collection as returned by the server.
///
/// Either an array of job objects or a mapping from job id to job object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JobPayload {
    List(Vec<Value>),
    Map(serde_json::Map<String, Value>),
}

impl JobPayload {
    /// Flatten into raw entries in arrival order.
    fn into_entries(self) -> Vec<Value> {
        match self {
            JobPayload::List(values) => values,
            JobPayload::Map(map) => map.into_iter().map(|(_, v)| v).collect(),
        }
    }
}

/// One job object as the server sends it, before translation.
///
/// Every field is optional; entries without an `id` are dropped during
/// normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_epoch")]
    pub created_at: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub output_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub virality_score: Option<f64>,
}

impl RawJob {
    /// Translate into a typed record, or `None` when the entry has no id.
    fn into_record(self, kind: JobKind) -> Option<JobRecord> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(JobRecord {
            id,
            kind,
            subject: self.url.or(self.topic).unwrap_or_default(),
            status: self
                .status
                .as_deref()
                .map(JobStatus::classify)
                .unwrap_or_default(),
            progress: self
                .progress
                .map(|p| p.clamp(0.0, 100.0) as u8)
                .unwrap_or(PLACEHOLDER_PROGRESS),
            created_at: self.created_at.unwrap_or(0.0),
            output_url: self.output_url,
            error: self.error,
            virality_score: self.virality_score,
        })
    }
}

/// Convert a server payload into typed records tagged with `kind`.
///
/// Output is reversed relative to arrival order (most-recently-returned
/// first) to approximate recency when `created_at` is missing. Entries that
/// fail to parse or lack an id are dropped; a bad entry never fails the
/// batch.
pub fn normalize(kind: JobKind, payload: JobPayload) -> Vec<JobRecord> {
    let mut records: Vec<JobRecord> = payload
        .into_entries()
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawJob>(value) {
            Ok(raw) => raw.into_record(kind),
            Err(e) => {
                debug!(kind = %kind, "dropping malformed job entry: {e}");
                None
            }
        })
        .collect();
    records.reverse();
    records
}

/// Accept `created_at` as epoch seconds or an ISO-8601 datetime string.
///
/// The service historically serialized naive datetimes as ISO strings;
/// anything unparsable is treated as absent.
fn deserialize_epoch<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(parse_epoch))
}

fn parse_epoch(value: Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.timestamp_millis() as f64 / 1000.0)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|dt| dt.and_utc().timestamp_millis() as f64 / 1000.0)
                    .ok()
            }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> JobPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_array_shape() {
        let records = normalize(
            JobKind::Clip,
            payload(json!([
                {"id": "a", "url": "https://youtu.be/a", "status": "processing", "progress": 40, "created_at": 100},
                {"id": "b", "url": "https://youtu.be/b", "status": "pending", "created_at": 200},
            ])),
        );

        // Most-recently-returned first
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[1].id, "a");
        assert_eq!(records[1].status, JobStatus::Processing);
        assert_eq!(records[1].progress, 40);
        assert_eq!(records[1].created_at, 100.0);
    }

    #[test]
    fn test_normalize_map_shape_matches_array() {
        let from_map = normalize(
            JobKind::Clip,
            payload(json!({
                "a": {"id": "a", "url": "u1", "status": "processing", "progress": 40},
                "b": {"id": "b", "url": "u2", "status": "completed", "progress": 100},
            })),
        );
        let from_list = normalize(
            JobKind::Clip,
            payload(json!([
                {"id": "a", "url": "u1", "status": "processing", "progress": 40},
                {"id": "b", "url": "u2", "status": "completed", "progress": 100},
            ])),
        );
        assert_eq!(from_map, from_list);
    }

    #[test]
    fn test_kind_comes_from_call_site() {
        let records = normalize(
            JobKind::Generate,
            payload(json!([{"id": "g", "topic": "space", "kind": "clip"}])),
        );
        assert_eq!(records[0].kind, JobKind::Generate);
        assert_eq!(records[0].subject, "space");
    }

    #[test]
    fn test_entries_without_id_are_dropped() {
        let records = normalize(
            JobKind::Clip,
            payload(json!([
                {"url": "no-id"},
                {"id": "", "url": "empty-id"},
                {"id": "ok", "url": "kept"},
                42,
            ])),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "ok");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let records = normalize(JobKind::Clip, payload(json!([{"id": "a"}])));
        let job = &records[0];
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.progress, PLACEHOLDER_PROGRESS);
        assert_eq!(job.created_at, 0.0);
        assert_eq!(job.subject, "");
        assert!(job.output_url.is_none());
    }

    #[test]
    fn test_unknown_status_maps_to_pending() {
        let records = normalize(
            JobKind::Clip,
            payload(json!([{"id": "a", "status": "rendering-v2"}])),
        );
        assert_eq!(records[0].status, JobStatus::Pending);
    }

    #[test]
    fn test_created_at_accepts_iso_strings() {
        let records = normalize(
            JobKind::Generate,
            payload(json!([
                {"id": "naive", "created_at": "2024-06-01T12:00:00.500000"},
                {"id": "offset", "created_at": "2024-06-01T12:00:00+00:00"},
                {"id": "junk", "created_at": "not a date"},
            ])),
        );
        let by_id = |id: &str| records.iter().find(|r| r.id == id).unwrap();
        assert_eq!(by_id("naive").created_at, 1717243200.5);
        assert_eq!(by_id("offset").created_at, 1717243200.0);
        assert_eq!(by_id("junk").created_at, 0.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let records = normalize(
            JobKind::Clip,
            payload(json!([
                {"id": "over", "progress": 250},
                {"id": "under", "progress": -5},
            ])),
        );
        let by_id = |id: &str| records.iter().find(|r| r.id == id).unwrap();
        assert_eq!(by_id("over").progress, 100);
        assert_eq!(by_id("under").progress, 0);
    }
}
