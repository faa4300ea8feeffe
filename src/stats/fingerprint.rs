//! Procrastination fingerprint
//!
//! Folds the entire event history into a complete 24×7 grid of scored
//! buckets, one per (hour-of-day, day-of-week) cell. The grid is never
//! sparse: cells no event ever touched come out zero-valued, so the
//! dashboard heatmap can index blindly.

use std::collections::HashMap;

use chrono::TimeZone;

use crate::stats::hour_dow;
use crate::types::{AttentionEvent, DomainMinutes, EventKind, FingerprintBucket};

/// Per-cell accumulator prior to rounding and clamping
#[derive(Default)]
struct CellAcc {
    score: f64,
    minutes_distracted: u32,
    /// Domain tallies in first-seen order; that order is the documented
    /// tie-break for `topDomains`, not an accident of map iteration.
    domains: Vec<(String, u32)>,
}

/// Compute the full fingerprint grid, 168 buckets in hour-major order
/// (hour 0 dow 1..7, hour 1 dow 1..7, ...).
pub fn compute_buckets<Tz: TimeZone>(
    events: &[AttentionEvent],
    tz: &Tz,
) -> Vec<FingerprintBucket> {
    let mut cells: HashMap<(u8, u8), CellAcc> = HashMap::new();

    for event in events {
        let Some((hour, dow)) = hour_dow(event.ts, tz) else {
            continue;
        };
        let cell = cells.entry((hour, dow)).or_default();
        cell.score += match event.kind {
            EventKind::Distraction => 2.0,
            EventKind::Idle => 1.0,
            _ => 0.5,
        };
        if event.kind == EventKind::Distraction {
            cell.minutes_distracted += 1;
            match cell.domains.iter_mut().find(|(d, _)| d == &event.domain) {
                Some((_, count)) => *count += 1,
                None => cell.domains.push((event.domain.clone(), 1)),
            }
        }
    }

    let mut grid = Vec::with_capacity(24 * 7);
    for hour in 0..24u8 {
        for dow in 1..=7u8 {
            grid.push(match cells.remove(&(hour, dow)) {
                Some(cell) => finalize(hour, dow, cell),
                None => FingerprintBucket::empty(hour, dow),
            });
        }
    }
    grid
}

fn finalize(hour: u8, dow: u8, cell: CellAcc) -> FingerprintBucket {
    // The switch-rate estimate derives from the raw score before clamping.
    let score = (cell.score.round() as i64).clamp(0, 100) as u32;
    let tab_switches_per5 = (cell.score / 10.0).round() as u32 + 2;

    let mut domains = cell.domains;
    // Stable sort: equal counts keep first-seen order.
    domains.sort_by(|a, b| b.1.cmp(&a.1));
    domains.truncate(3);

    FingerprintBucket {
        hour,
        dow,
        score,
        tab_switches_per5,
        minutes_distracted: cell.minutes_distracted,
        top_domains: domains
            .into_iter()
            .map(|(domain, minutes)| DomainMinutes { domain, minutes })
            .collect(),
    }
}
