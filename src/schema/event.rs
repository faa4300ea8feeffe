//! attention.event.v1 schema definition
//!
//! The wire shape of an ingested event is the `AttentionEvent` itself:
//! `{id, ts, domain, title?, isIdle, kind}`. Batches arrive as a single
//! object, a JSON array, or NDJSON. Events that parse but fail validation
//! are rejected with a client error rather than stored; the previous
//! generation of this system accepted anything and let `NaN` bucket keys
//! leak into the analytics.

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::error::ComputeError;
use crate::types::{AttentionEvent, EventKind};

/// Current schema version
pub const SCHEMA_VERSION: &str = "attention.event.v1";

/// Validation errors for ingested events
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("event id must not be empty")]
    EmptyId,

    #[error("timestamp {0} is not a positive epoch-millisecond value")]
    NonPositiveTimestamp(i64),

    #[error("timestamp {0} is outside the representable datetime range")]
    TimestampOutOfRange(i64),

    #[error("unrecognized event kind {0:?} (expected ACTIVE, IDLE or DISTRACTION)")]
    UnknownKind(String),
}

/// Result of validating one event inside a batch
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    /// Position of the event in the submitted batch
    pub index: usize,
    pub event_id: String,
    pub error: ValidationError,
}

/// A batch body: the ingestion route accepts one event or many.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventPayload {
    Many(Vec<AttentionEvent>),
    One(Box<AttentionEvent>),
}

/// Adapter between wire payloads and validated event batches
pub struct EventAdapter;

impl EventAdapter {
    /// Parse a JSON body containing either a single event or an array.
    pub fn parse_payload(json: &str) -> Result<Vec<AttentionEvent>, ComputeError> {
        let payload: EventPayload = serde_json::from_str(json)
            .map_err(|e| ComputeError::ParseError(format!("invalid event payload: {e}")))?;
        Ok(match payload {
            EventPayload::Many(events) => events,
            EventPayload::One(event) => vec![*event],
        })
    }

    /// Parse NDJSON (newline-delimited JSON), one event per line.
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<AttentionEvent>, ComputeError> {
        let mut events = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<AttentionEvent>(trimmed) {
                Ok(event) => events.push(event),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(events)
    }

    /// Validate a single event against the schema rules.
    pub fn validate(event: &AttentionEvent) -> Result<(), ValidationError> {
        if event.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if event.ts <= 0 {
            return Err(ValidationError::NonPositiveTimestamp(event.ts));
        }
        // The aggregations bucket by wall-clock hour, so the timestamp must
        // map to a real datetime.
        if Utc.timestamp_millis_opt(event.ts).single().is_none() {
            return Err(ValidationError::TimestampOutOfRange(event.ts));
        }
        if let EventKind::Unknown(kind) = &event.kind {
            return Err(ValidationError::UnknownKind(kind.clone()));
        }
        Ok(())
    }

    /// Validate a batch, reporting every failing event.
    pub fn validate_events(events: &[AttentionEvent]) -> Vec<ValidationFailure> {
        events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| {
                Self::validate(event).err().map(|error| ValidationFailure {
                    index,
                    event_id: event.id.clone(),
                    error,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, ts: i64, kind: EventKind) -> AttentionEvent {
        AttentionEvent {
            id: id.to_string(),
            ts,
            domain: "example.com".to_string(),
            title: None,
            is_idle: false,
            kind,
        }
    }

    #[test]
    fn parses_single_object_payload() {
        let json = r#"{"id":"e1","ts":1700000000000,"domain":"a.com","isIdle":false,"kind":"ACTIVE"}"#;
        let events = EventAdapter::parse_payload(json).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1");
    }

    #[test]
    fn parses_array_payload() {
        let json = r#"[
            {"id":"e1","ts":1,"domain":"a.com","isIdle":false,"kind":"ACTIVE"},
            {"id":"e2","ts":2,"domain":"b.com","isIdle":true,"kind":"IDLE"}
        ]"#;
        let events = EventAdapter::parse_payload(json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, EventKind::Idle);
    }

    #[test]
    fn parses_ndjson_and_reports_bad_line() {
        let good = "{\"id\":\"e1\",\"ts\":1,\"domain\":\"\",\"isIdle\":false,\"kind\":\"ACTIVE\"}\n\n{\"id\":\"e2\",\"ts\":2,\"domain\":\"\",\"isIdle\":false,\"kind\":\"IDLE\"}\n";
        let events = EventAdapter::parse_ndjson(good).unwrap();
        assert_eq!(events.len(), 2);

        let bad = "{\"id\":\"e1\",\"ts\":1,\"domain\":\"\",\"isIdle\":false,\"kind\":\"ACTIVE\"}\nnot json\n";
        let err = EventAdapter::parse_ndjson(bad).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_empty_id() {
        let ev = event("  ", 1_700_000_000_000, EventKind::Active);
        assert!(matches!(
            EventAdapter::validate(&ev),
            Err(ValidationError::EmptyId)
        ));
    }

    #[test]
    fn rejects_non_positive_timestamp() {
        let ev = event("e1", 0, EventKind::Active);
        assert!(matches!(
            EventAdapter::validate(&ev),
            Err(ValidationError::NonPositiveTimestamp(0))
        ));
    }

    #[test]
    fn rejects_unknown_kind() {
        let ev = event("e1", 1_700_000_000_000, EventKind::Unknown("WAT".to_string()));
        assert!(matches!(
            EventAdapter::validate(&ev),
            Err(ValidationError::UnknownKind(_))
        ));
    }

    #[test]
    fn batch_report_carries_indexes() {
        let events = vec![
            event("e1", 1_700_000_000_000, EventKind::Active),
            event("", 1_700_000_000_000, EventKind::Active),
            event("e3", -5, EventKind::Distraction),
        ];
        let failures = EventAdapter::validate_events(&events);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].index, 1);
        assert_eq!(failures[1].index, 2);
        assert_eq!(failures[1].event_id, "e3");
    }

    #[test]
    fn accepts_valid_event() {
        let ev = event("e1", 1_700_000_000_000, EventKind::Distraction);
        assert!(EventAdapter::validate(&ev).is_ok());
    }
}
