//! Engine facade
//!
//! Bundles the event store, settings, and focus sessions behind one stateful
//! processor, and exposes the five dashboard queries plus a combined payload
//! stamped with producer metadata. Every query recomputes from a full
//! snapshot: there is no cache to invalidate, and two calls over the same
//! unchanged store return identical results.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::error::ComputeError;
use crate::focus::{FocusSession, FocusTracker};
use crate::schema::EventAdapter;
use crate::settings::Settings;
use crate::stats;
use crate::store::EventStore;
use crate::types::{
    AttentionEvent, DayStats, FingerprintBucket, NextBestWindow, TimelineSegment, TopTrigger,
};
use crate::{PRODUCER_NAME, VERSION};

/// Producer metadata stamped onto combined payloads
#[derive(Debug, Clone, Serialize)]
pub struct ProducerInfo {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Everything the dashboard needs in one response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub buckets: Vec<FingerprintBucket>,
    pub timeline: Vec<TimelineSegment>,
    pub weekly: Vec<DayStats>,
    pub triggers: Vec<TopTrigger>,
    pub next_window: NextBestWindow,
}

/// A dashboard snapshot plus provenance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub producer: ProducerInfo,
    /// RFC 3339 instant the payload was computed for
    pub generated_at: String,
    pub snapshot: DashboardSnapshot,
}

/// Stateful processor owning the event store and ancillary state.
///
/// "Today"-anchored queries take an explicit `now` so results are
/// deterministic under test; production callers pass `Local::now()`.
pub struct AttentionEngine {
    store: EventStore,
    settings: Settings,
    focus: FocusTracker,
    instance_id: String,
}

impl Default for AttentionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AttentionEngine {
    pub fn new() -> Self {
        Self::with_store(EventStore::new())
    }

    /// Wrap an existing store, e.g. one restored from JSON.
    pub fn with_store(store: EventStore) -> Self {
        AttentionEngine {
            store,
            settings: Settings::default(),
            focus: FocusTracker::new(),
            instance_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    // --- ingestion ---------------------------------------------------------

    /// Ingest a JSON body holding one event or an array of events.
    pub fn ingest_json(&mut self, json: &str) -> Result<usize, ComputeError> {
        let events = EventAdapter::parse_payload(json)?;
        self.ingest(events)
    }

    /// Validate and append a batch. All-or-nothing: one invalid event
    /// rejects the whole batch and the store is left untouched.
    pub fn ingest(&mut self, events: Vec<AttentionEvent>) -> Result<usize, ComputeError> {
        if let Some(failure) = EventAdapter::validate_events(&events).into_iter().next() {
            log::warn!(
                "rejecting batch of {}: event {} ({:?}) invalid: {}",
                events.len(),
                failure.index,
                failure.event_id,
                failure.error
            );
            return Err(ComputeError::InvalidEvent(failure.error));
        }
        let count = events.len();
        self.store.extend(events);
        log::debug!("ingested {} events, {} stored", count, self.store.len());
        Ok(count)
    }

    // --- queries -----------------------------------------------------------

    pub fn buckets<Tz: TimeZone>(&self, tz: &Tz) -> Vec<FingerprintBucket> {
        stats::compute_buckets(self.store.snapshot(), tz)
    }

    pub fn today_timeline<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<TimelineSegment> {
        stats::compute_today_timeline(self.store.snapshot(), now)
    }

    pub fn weekly_stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<DayStats> {
        stats::compute_weekly_stats(self.store.snapshot(), now)
    }

    pub fn top_triggers(&self) -> Vec<TopTrigger> {
        stats::compute_top_triggers(self.store.snapshot())
    }

    pub fn next_best_window<Tz: TimeZone>(&self, tz: &Tz) -> NextBestWindow {
        stats::compute_next_best_window(self.store.snapshot(), tz)
    }

    /// All five reports in one payload, stamped with producer metadata.
    pub fn dashboard<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardPayload {
        let tz = now.timezone();
        DashboardPayload {
            producer: ProducerInfo {
                name: PRODUCER_NAME.to_string(),
                version: VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at: now.clone().fixed_offset().to_rfc3339(),
            snapshot: DashboardSnapshot {
                buckets: self.buckets(&tz),
                timeline: self.today_timeline(now),
                weekly: self.weekly_stats(now),
                triggers: self.top_triggers(),
                next_window: self.next_best_window(&tz),
            },
        }
    }

    // --- settings ----------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings wholesale; invalid payloads are rejected and the
    /// previous settings stay in force.
    pub fn replace_settings(&mut self, settings: Settings) -> Result<(), ComputeError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    // --- focus sessions ----------------------------------------------------

    pub fn start_focus(&mut self, now_ms: i64) -> &FocusSession {
        self.focus.start(now_ms)
    }

    pub fn end_focus(&mut self, now_ms: i64) -> Option<&FocusSession> {
        self.focus.end(now_ms)
    }

    pub fn focus_sessions(&self) -> &[FocusSession] {
        self.focus.sessions()
    }
}
