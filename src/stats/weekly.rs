//! Weekly rollup
//!
//! Folds the last 7 local calendar days into one summary record per day,
//! oldest first. Every day is always present; a day with no events rolls up
//! to zeros and the "—" placeholder.

use chrono::{DateTime, Days, TimeZone};

use crate::stats::day_start;
use crate::types::{AttentionEvent, DayStats, EventKind, NO_DISTRACTION};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Compute exactly 7 day summaries anchored on `now`'s local calendar day,
/// ordered oldest (6 days back) to newest (today).
pub fn compute_weekly_stats<Tz: TimeZone>(
    events: &[AttentionEvent],
    now: &DateTime<Tz>,
) -> Vec<DayStats> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut stats = Vec::with_capacity(7);
    for back in (0..7u64).rev() {
        let day = today.checked_sub_days(Days::new(back)).unwrap_or(today);
        let date = day.format("%Y-%m-%d").to_string();

        let Some(start) = day_start(day, &tz) else {
            stats.push(DayStats::empty(date));
            continue;
        };
        let start_ms = start.timestamp_millis();
        let end_ms = start_ms + DAY_MS;

        let day_events: Vec<&AttentionEvent> = events
            .iter()
            .filter(|e| e.ts >= start_ms && e.ts < end_ms)
            .collect();

        let total = day_events.len() as u32;
        let focus = count_kind(&day_events, EventKind::Active);
        let distr = count_kind(&day_events, EventKind::Distraction);
        let idle = count_kind(&day_events, EventKind::Idle);

        stats.push(DayStats {
            date,
            total_minutes: total,
            focus_minutes: focus,
            distraction_minutes: distr,
            idle_minutes: idle,
            avg_score: ratio_rounded(distr, total, 100.0),
            top_distraction: top_domain(&day_events)
                .unwrap_or_else(|| NO_DISTRACTION.to_string()),
            // Focus-share heuristic, not a contiguous-run measurement.
            focus_streak_min: ratio_rounded(focus, total, 120.0),
        });
    }
    stats
}

fn count_kind(events: &[&AttentionEvent], kind: EventKind) -> u32 {
    events.iter().filter(|e| e.kind == kind).count() as u32
}

fn ratio_rounded(part: u32, total: u32, scale: f64) -> u32 {
    (part as f64 / total.max(1) as f64 * scale).round() as u32
}

/// Most frequent distraction domain of the day; ties keep first-seen order.
fn top_domain(events: &[&AttentionEvent]) -> Option<String> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for event in events {
        if event.kind != EventKind::Distraction {
            continue;
        }
        match counts.iter_mut().find(|(d, _)| *d == event.domain) {
            Some((_, count)) => *count += 1,
            None => counts.push((event.domain.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.first().map(|(domain, _)| domain.to_string())
}
