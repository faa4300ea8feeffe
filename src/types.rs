//! Core types for the tabtrace engine
//!
//! This module defines the data structures that flow through the engine: the
//! ingested attention event, and the derived view models each aggregation
//! produces. Wire names (camelCase) match the dashboard API exactly.

use serde::{Deserialize, Serialize};

/// Classification of a single attention observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Active,
    Idle,
    Distraction,
    /// Catch-all for kinds this engine does not recognize. Deserializes
    /// leniently so a batch can be inspected, but validation rejects it
    /// before anything reaches the store.
    #[serde(untagged)]
    Unknown(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Active => "ACTIVE",
            EventKind::Idle => "IDLE",
            EventKind::Distraction => "DISTRACTION",
            EventKind::Unknown(kind) => kind.as_str(),
        }
    }
}

/// One observation of which domain a browser tab was on, and how that moment
/// was classified. Immutable once ingested: never mutated, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionEvent {
    /// Unique event identifier
    pub id: String,
    /// Observation timestamp (epoch milliseconds)
    pub ts: i64,
    /// Domain the tab was on; may be empty when the capturer saw none
    #[serde(default)]
    pub domain: String,
    /// Page title, if the capturer had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether the user was idle at capture time
    pub is_idle: bool,
    /// Classification of the observation
    pub kind: EventKind,
}

impl AttentionEvent {
    /// Create an event with a generated id.
    pub fn new(ts: i64, domain: impl Into<String>, kind: EventKind) -> Self {
        AttentionEvent {
            id: uuid::Uuid::new_v4().to_string(),
            ts,
            domain: domain.into(),
            title: None,
            is_idle: kind == EventKind::Idle,
            kind,
        }
    }

    /// Attach a page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Per-domain distraction tally inside one fingerprint bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMinutes {
    pub domain: String,
    /// Distraction event count attributed to the domain (labeled "minutes"
    /// on the wire because each capture tick approximates one)
    pub minutes: u32,
}

/// One cell of the 24×7 procrastination fingerprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintBucket {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Day of week, 1=Monday .. 7=Sunday
    pub dow: u8,
    /// Procrastination score, clamped to 0-100
    pub score: u32,
    /// Tab-switch-rate estimate per 5 minutes
    pub tab_switches_per5: u32,
    /// Distraction event count for the cell
    pub minutes_distracted: u32,
    /// Up to 3 worst domains, descending by count
    pub top_domains: Vec<DomainMinutes>,
}

impl FingerprintBucket {
    /// An untouched cell: every counter zero.
    pub fn empty(hour: u8, dow: u8) -> Self {
        FingerprintBucket {
            hour,
            dow,
            score: 0,
            tab_switches_per5: 0,
            minutes_distracted: 0,
            top_domains: Vec::new(),
        }
    }
}

/// Dominant activity of a timeline segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Focus,
    Distraction,
    Idle,
    Active,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Focus => "focus",
            SegmentKind::Distraction => "distraction",
            SegmentKind::Idle => "idle",
            SegmentKind::Active => "active",
        }
    }

    /// Fixed display score for the segment type. Not derived from segment
    /// content; the dashboard colors segments by type alone.
    pub fn score(&self) -> u32 {
        match self {
            SegmentKind::Focus => 20,
            SegmentKind::Idle => 30,
            SegmentKind::Distraction => 70,
            SegmentKind::Active => 40,
        }
    }
}

/// A sub-hour slice of today's timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    /// May be 60 when the segment closes the hour
    pub end_minute: u8,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub score: u32,
    /// Up to 3 distinct domains seen in the segment, first-seen order
    pub domains: Vec<String>,
}

/// One calendar day of the weekly rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    /// Local calendar date, YYYY-MM-DD
    pub date: String,
    /// Event count for the day (minute labels approximate capture ticks)
    pub total_minutes: u32,
    pub focus_minutes: u32,
    pub distraction_minutes: u32,
    pub idle_minutes: u32,
    /// Distraction share of the day, 0-100
    pub avg_score: u32,
    /// Most frequent distraction domain, or "—" when the day had none
    pub top_distraction: String,
    /// Focus-share heuristic scaled to 120; not a contiguous-run measurement
    pub focus_streak_min: u32,
}

impl DayStats {
    /// A day with no observations.
    pub fn empty(date: String) -> Self {
        DayStats {
            date,
            total_minutes: 0,
            focus_minutes: 0,
            distraction_minutes: 0,
            idle_minutes: 0,
            avg_score: 0,
            top_distraction: NO_DISTRACTION.to_string(),
            focus_streak_min: 0,
        }
    }
}

/// Placeholder shown when a day or ranking has no distraction domain
pub const NO_DISTRACTION: &str = "—";

/// Week-over-week movement of a trigger. Only `Stable` is produced today;
/// `Up`/`Down` are reserved wire values for when real trend comparison
/// lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// One ranked distraction source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTrigger {
    pub domain: String,
    /// Distraction event count across the whole history
    pub minutes: u32,
    /// Rounded share of all distraction events, 0-100
    pub percentage: u32,
    pub trend: Trend,
}

/// The recommended hour to start a focus session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextBestWindow {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Distraction ratio of the chosen hour, 0-100
    pub score: u32,
    /// Inverse of the ratio, 0-100
    pub confidence: u32,
    /// Fixed explanatory string shown under the recommendation
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_wire_shape_is_camel_case() {
        let ev = AttentionEvent {
            id: "e1".to_string(),
            ts: 1_700_000_000_000,
            domain: "youtube.com".to_string(),
            title: Some("watch".to_string()),
            is_idle: false,
            kind: EventKind::Distraction,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["isIdle"], false);
        assert_eq!(json["kind"], "DISTRACTION");
        assert_eq!(json["domain"], "youtube.com");
    }

    #[test]
    fn unknown_kind_deserializes_leniently() {
        let json = r#"{"id":"e1","ts":1,"domain":"","isIdle":false,"kind":"SOMETHING_NEW"}"#;
        let ev: AttentionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(ev.kind, EventKind::Unknown("SOMETHING_NEW".to_string()));
        assert_eq!(ev.title, None);
    }

    #[test]
    fn bucket_wire_shape() {
        let bucket = FingerprintBucket {
            hour: 10,
            dow: 1,
            score: 2,
            tab_switches_per5: 2,
            minutes_distracted: 1,
            top_domains: vec![DomainMinutes {
                domain: "a.com".to_string(),
                minutes: 1,
            }],
        };
        let json = serde_json::to_value(&bucket).unwrap();
        assert_eq!(json["tabSwitchesPer5"], 2);
        assert_eq!(json["minutesDistracted"], 1);
        assert_eq!(json["topDomains"][0]["domain"], "a.com");
    }

    #[test]
    fn segment_type_field_name() {
        let seg = TimelineSegment {
            start_hour: 9,
            start_minute: 0,
            end_hour: 9,
            end_minute: 60,
            kind: SegmentKind::Focus,
            score: SegmentKind::Focus.score(),
            domains: vec![],
        };
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["type"], "focus");
        assert_eq!(json["startHour"], 9);
        assert_eq!(json["endMinute"], 60);
        assert_eq!(json["score"], 20);
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Trend::Stable).unwrap(), "stable");
    }
}
