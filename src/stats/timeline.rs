//! Today's timeline
//!
//! Folds today's events into variable-length intra-hour segments classified
//! by dominant activity. Unlike the fingerprint grid, the timeline has gaps:
//! an hour with no events produces no segment at all.

use chrono::{DateTime, TimeZone};

use crate::stats::{day_start, local_hour};
use crate::types::{AttentionEvent, EventKind, SegmentKind, TimelineSegment};

/// Compute the segments for `now`'s local calendar day.
///
/// Each populated hour is split into 1-4 slots by event volume and the
/// hour's event list is partitioned into contiguous slices by list-index
/// proportion, an even-spread approximation rather than a timestamp-ordered
/// split.
pub fn compute_today_timeline<Tz: TimeZone>(
    events: &[AttentionEvent],
    now: &DateTime<Tz>,
) -> Vec<TimelineSegment> {
    let tz = now.timezone();
    let Some(midnight) = day_start(now.date_naive(), &tz) else {
        return Vec::new();
    };
    let midnight_ms = midnight.timestamp_millis();

    let todays: Vec<&AttentionEvent> = events.iter().filter(|e| e.ts >= midnight_ms).collect();

    let mut segments = Vec::new();
    for hour in 0..24u8 {
        let hour_events: Vec<&AttentionEvent> = todays
            .iter()
            .copied()
            .filter(|e| local_hour(e.ts, &tz) == Some(hour))
            .collect();
        if hour_events.is_empty() {
            continue;
        }

        let n = hour_events.len();
        let slots = ((n as f64 / 10.0).round() as usize).clamp(1, 4);
        let minutes_per = 60 / slots;

        for i in 0..slots {
            let slice = &hour_events[i * n / slots..(i + 1) * n / slots];
            let kind = classify(slice);

            let mut domains: Vec<String> = Vec::new();
            for event in slice {
                if !domains.iter().any(|d| *d == event.domain) {
                    domains.push(event.domain.clone());
                    if domains.len() == 3 {
                        break;
                    }
                }
            }

            segments.push(TimelineSegment {
                start_hour: hour,
                start_minute: (i * minutes_per) as u8,
                end_hour: hour,
                end_minute: ((i + 1) * minutes_per).min(60) as u8,
                kind,
                score: kind.score(),
                domains,
            });
        }
    }
    segments
}

fn classify(slice: &[&AttentionEvent]) -> SegmentKind {
    let idle = slice.iter().filter(|e| e.kind == EventKind::Idle).count();
    let distr = slice
        .iter()
        .filter(|e| e.kind == EventKind::Distraction)
        .count();

    if idle > distr && idle > 0 {
        SegmentKind::Idle
    } else if distr > 0 {
        SegmentKind::Distraction
    } else if idle == 0 {
        SegmentKind::Focus
    } else {
        SegmentKind::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // 2024-01-15T00:00:00Z, a Monday
    const MIDNIGHT: i64 = 1_705_276_800_000;
    const HOUR_MS: i64 = 3_600_000;

    fn noon() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(MIDNIGHT + 12 * HOUR_MS).unwrap()
    }

    fn event(ts: i64, domain: &str, kind: EventKind) -> AttentionEvent {
        AttentionEvent {
            id: format!("e-{ts}-{domain}"),
            ts,
            domain: domain.to_string(),
            title: None,
            is_idle: kind == EventKind::Idle,
            kind,
        }
    }

    #[test]
    fn empty_when_no_events_today() {
        // yesterday's event is filtered out
        let events = vec![event(MIDNIGHT - HOUR_MS, "a.com", EventKind::Active)];
        assert!(compute_today_timeline(&events, &noon()).is_empty());
    }

    #[test]
    fn quiet_hour_fills_the_whole_hour_as_focus() {
        let events = vec![event(MIDNIGHT + 9 * HOUR_MS + 15 * 60_000, "docs.com", EventKind::Active)];
        let segments = compute_today_timeline(&events, &noon());
        assert_eq!(segments.len(), 1);

        let seg = &segments[0];
        assert_eq!((seg.start_hour, seg.start_minute), (9, 0));
        assert_eq!((seg.end_hour, seg.end_minute), (9, 60));
        // no idle and no distraction events means focus, even if all ACTIVE
        assert_eq!(seg.kind, SegmentKind::Focus);
        assert_eq!(seg.score, 20);
        assert_eq!(seg.domains, vec!["docs.com".to_string()]);
    }

    #[test]
    fn distraction_dominates_over_active() {
        let base = MIDNIGHT + 14 * HOUR_MS;
        let events = vec![
            event(base, "docs.com", EventKind::Active),
            event(base + 1, "youtube.com", EventKind::Distraction),
        ];
        let segments = compute_today_timeline(&events, &noon());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Distraction);
        assert_eq!(segments[0].score, 70);
    }

    #[test]
    fn idle_majority_beats_distraction() {
        let base = MIDNIGHT + 14 * HOUR_MS;
        let events = vec![
            event(base, "", EventKind::Idle),
            event(base + 1, "", EventKind::Idle),
            event(base + 2, "youtube.com", EventKind::Distraction),
        ];
        let segments = compute_today_timeline(&events, &noon());
        assert_eq!(segments[0].kind, SegmentKind::Idle);
        assert_eq!(segments[0].score, 30);
    }

    #[test]
    fn fifteen_events_split_into_two_slots() {
        let base = MIDNIGHT + 10 * HOUR_MS;
        // first 7 (indexes 0..7) distractions, last 8 active: the index
        // partition puts the boundary at floor(15/2) = 7
        let mut events = Vec::new();
        for i in 0..7 {
            events.push(event(base + i, "youtube.com", EventKind::Distraction));
        }
        for i in 7..15 {
            events.push(event(base + i, "docs.com", EventKind::Active));
        }

        let segments = compute_today_timeline(&events, &noon());
        assert_eq!(segments.len(), 2);

        assert_eq!((segments[0].start_minute, segments[0].end_minute), (0, 30));
        assert_eq!((segments[1].start_minute, segments[1].end_minute), (30, 60));
        assert_eq!(segments[0].kind, SegmentKind::Distraction);
        assert_eq!(segments[1].kind, SegmentKind::Focus);
    }

    #[test]
    fn slot_count_caps_at_four() {
        let base = MIDNIGHT + 10 * HOUR_MS;
        let events: Vec<AttentionEvent> = (0..50)
            .map(|i| event(base + i, "a.com", EventKind::Active))
            .collect();
        let segments = compute_today_timeline(&events, &noon());
        assert_eq!(segments.len(), 4);
        assert_eq!((segments[3].start_minute, segments[3].end_minute), (45, 60));
    }

    #[test]
    fn hours_with_no_events_leave_gaps() {
        let events = vec![
            event(MIDNIGHT + 9 * HOUR_MS, "a.com", EventKind::Active),
            event(MIDNIGHT + 11 * HOUR_MS, "b.com", EventKind::Active),
        ];
        let segments = compute_today_timeline(&events, &noon());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_hour, 9);
        assert_eq!(segments[1].start_hour, 11);
    }

    #[test]
    fn domains_deduplicate_and_cap_at_three() {
        let base = MIDNIGHT + 10 * HOUR_MS;
        let events = vec![
            event(base, "a.com", EventKind::Active),
            event(base + 1, "a.com", EventKind::Active),
            event(base + 2, "b.com", EventKind::Active),
            event(base + 3, "c.com", EventKind::Active),
            event(base + 4, "d.com", EventKind::Active),
        ];
        let segments = compute_today_timeline(&events, &noon());
        assert_eq!(
            segments[0].domains,
            vec!["a.com".to_string(), "b.com".to_string(), "c.com".to_string()]
        );
    }
}
