//! tabtrace - On-device analytics engine for browser attention events
//!
//! tabtrace turns a stream of timestamped attention events (which domain a
//! browser tab was on, and whether the moment counted as active, idle or
//! distracting) into dashboard analytics through pure aggregations over an
//! append-only in-memory store:
//!
//! - **Fingerprint**: a complete 24×7 hour-by-weekday procrastination grid
//! - **Timeline**: today's sub-hour segments classified by dominant activity
//! - **Weekly**: a 7-day rollup, one summary per local calendar day
//! - **Triggers**: the top 5 distraction domains, ranked
//! - **Recommendation**: the hour with the lowest distraction ratio
//!
//! Every aggregation is a deterministic, total function of an event
//! snapshot; ingestion validates events up front so corruption never reaches
//! the analytics.

pub mod engine;
pub mod error;
pub mod focus;
pub mod schema;
pub mod settings;
pub mod stats;
pub mod store;
pub mod types;

pub use engine::{AttentionEngine, DashboardPayload, DashboardSnapshot};
pub use error::ComputeError;
pub use schema::{EventAdapter, ValidationError, SCHEMA_VERSION};
pub use settings::Settings;
pub use stats::{
    compute_buckets, compute_next_best_window, compute_today_timeline, compute_top_triggers,
    compute_weekly_stats,
};
pub use store::EventStore;
pub use types::{
    AttentionEvent, DayStats, EventKind, FingerprintBucket, NextBestWindow, TimelineSegment,
    TopTrigger,
};

/// Engine version embedded in dashboard payloads
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for dashboard payloads
pub const PRODUCER_NAME: &str = "tabtrace";
