//! Derived analytics
//!
//! Five pure aggregations over an event snapshot. Each is a deterministic,
//! total function of its input: the same snapshot produces bit-identical
//! output, the empty snapshot produces a well-formed default, and nothing is
//! ever mutated or cached. Wall-clock structure (hours, weekdays, "today")
//! is parameterized by a [`chrono::TimeZone`] so results stay testable;
//! production callers pass `Local`.

pub mod fingerprint;
pub mod recommend;
pub mod timeline;
pub mod triggers;
pub mod weekly;

pub use fingerprint::compute_buckets;
pub use recommend::compute_next_best_window;
pub use timeline::compute_today_timeline;
pub use triggers::compute_top_triggers;
pub use weekly::compute_weekly_stats;

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike};

/// Map an epoch-millisecond timestamp to its local hour (0-23).
///
/// Returns `None` for timestamps chrono cannot represent; aggregations skip
/// such events instead of failing.
pub(crate) fn local_hour<Tz: TimeZone>(ts_ms: i64, tz: &Tz) -> Option<u8> {
    let dt = tz.timestamp_millis_opt(ts_ms).single()?;
    Some(dt.hour() as u8)
}

/// Map an epoch-millisecond timestamp to `(hour 0-23, dow 1=Mon..7=Sun)`.
pub(crate) fn hour_dow<Tz: TimeZone>(ts_ms: i64, tz: &Tz) -> Option<(u8, u8)> {
    let dt = tz.timestamp_millis_opt(ts_ms).single()?;
    Some((dt.hour() as u8, dt.weekday().number_from_monday() as u8))
}

/// Start of a local calendar day as an instant in `tz`.
///
/// On an ambiguous midnight (DST fall-back) the earlier instant wins; when a
/// DST gap removes midnight entirely the day starts at 01:00.
pub(crate) fn day_start<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&day.and_time(NaiveTime::MIN)) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let one_am = day.and_time(NaiveTime::from_hms_opt(1, 0, 0)?);
            tz.from_local_datetime(&one_am).earliest()
        }
    }
}
