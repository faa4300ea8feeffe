//! Trigger ranking
//!
//! Ranks distraction domains by event count over the entire history. The
//! dashboard labels this "top triggers (7 days)" but the window has always
//! been all-time; that behavior is kept as-is.

use crate::types::{AttentionEvent, EventKind, TopTrigger, Trend};

/// Maximum number of ranked triggers returned
pub const MAX_TRIGGERS: usize = 5;

/// Compute up to 5 triggers, descending by distraction-event count. Ties
/// keep first-encountered order, and percentages are shares of ALL counted
/// distraction events, not just the returned five.
pub fn compute_top_triggers(events: &[AttentionEvent]) -> Vec<TopTrigger> {
    // First-seen order doubles as the tie-break, so a Vec beats a map here.
    let mut counts: Vec<(String, u32)> = Vec::new();
    for event in events {
        if event.kind != EventKind::Distraction {
            continue;
        }
        match counts.iter_mut().find(|(d, _)| d == &event.domain) {
            Some((_, count)) => *count += 1,
            None => counts.push((event.domain.clone(), 1)),
        }
    }

    let total: u32 = counts.iter().map(|(_, count)| count).sum();

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(MAX_TRIGGERS);
    counts
        .into_iter()
        .map(|(domain, minutes)| TopTrigger {
            domain,
            minutes,
            percentage: if total > 0 {
                (minutes as f64 / total as f64 * 100.0).round() as u32
            } else {
                0
            },
            // Real trend detection needs two comparison periods nothing
            // computes yet; every trigger reports stable.
            trend: Trend::Stable,
        })
        .collect()
}
