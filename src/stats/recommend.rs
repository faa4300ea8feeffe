//! Focus-window recommendation
//!
//! Scans per-hour distraction ratios across the whole history and picks the
//! single best hour to start a focus session.

use chrono::TimeZone;

use crate::stats::local_hour;
use crate::types::{AttentionEvent, EventKind, NextBestWindow};

/// Fixed explanation shown under the recommendation
pub const RECOMMENDATION_REASON: &str =
    "Picked hour with the lowest distraction ratio over last 7 days";

/// Compute the recommended hour. Hours with no observations count as
/// maximally risky (ratio 1.0), not unknown, and the strict less-than scan
/// in ascending hour order keeps the earliest hour on ties; both rules are
/// part of the contract.
pub fn compute_next_best_window<Tz: TimeZone>(
    events: &[AttentionEvent],
    tz: &Tz,
) -> NextBestWindow {
    // (distraction, total) observation counts per hour of day
    let mut by_hour = [(0u32, 0u32); 24];
    for event in events {
        let Some(hour) = local_hour(event.ts, tz) else {
            continue;
        };
        let cell = &mut by_hour[hour as usize];
        cell.1 += 1;
        if event.kind == EventKind::Distraction {
            cell.0 += 1;
        }
    }

    let mut best_hour = 9u8;
    let mut best_rate = f64::INFINITY;
    for (hour, (distr, total)) in by_hour.iter().enumerate() {
        let rate = if *total > 0 {
            f64::from(*distr) / f64::from(*total)
        } else {
            1.0
        };
        if rate < best_rate {
            best_rate = rate;
            best_hour = hour as u8;
        }
    }

    NextBestWindow {
        hour: best_hour,
        score: (best_rate * 100.0).round() as u32,
        confidence: ((1.0 - best_rate) * 100.0).round() as u32,
        reason: RECOMMENDATION_REASON.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // 2024-01-15T00:00:00Z
    const MIDNIGHT: i64 = 1_705_276_800_000;
    const HOUR_MS: i64 = 3_600_000;

    fn at_hour(hour: i64, kind: EventKind) -> AttentionEvent {
        AttentionEvent::new(MIDNIGHT + hour * HOUR_MS, "a.com", kind)
    }

    #[test]
    fn empty_history_falls_to_hour_zero() {
        let window = compute_next_best_window(&[], &Utc);
        assert_eq!(window.hour, 0);
        assert_eq!(window.score, 100);
        assert_eq!(window.confidence, 0);
        assert_eq!(window.reason, RECOMMENDATION_REASON);
    }

    #[test]
    fn observed_clean_hour_beats_unobserved_hours() {
        // one clean ACTIVE observation at 14:00; every other hour is
        // unobserved and counts as ratio 1.0
        let events = vec![at_hour(14, EventKind::Active)];
        let window = compute_next_best_window(&events, &Utc);
        assert_eq!(window.hour, 14);
        assert_eq!(window.score, 0);
        assert_eq!(window.confidence, 100);
    }

    #[test]
    fn picks_the_lowest_ratio() {
        let events = vec![
            // hour 9: 1/2 distracted
            at_hour(9, EventKind::Distraction),
            at_hour(9, EventKind::Active),
            // hour 15: 1/3 distracted
            at_hour(15, EventKind::Distraction),
            at_hour(15, EventKind::Active),
            at_hour(15, EventKind::Active),
        ];
        let window = compute_next_best_window(&events, &Utc);
        assert_eq!(window.hour, 15);
        assert_eq!(window.score, 33);
        assert_eq!(window.confidence, 67);
    }

    #[test]
    fn tie_keeps_the_earliest_hour() {
        let events = vec![
            at_hour(16, EventKind::Active),
            at_hour(8, EventKind::Active),
        ];
        // both hours have ratio 0.0; hour 8 comes first in the scan
        let window = compute_next_best_window(&events, &Utc);
        assert_eq!(window.hour, 8);
    }

    #[test]
    fn fully_distracted_history_still_recommends() {
        let events = vec![at_hour(10, EventKind::Distraction)];
        let window = compute_next_best_window(&events, &Utc);
        // every hour is ratio 1.0, so the scan never improves past hour 0
        assert_eq!(window.hour, 0);
        assert_eq!(window.score, 100);
        assert_eq!(window.confidence, 0);
    }
}
