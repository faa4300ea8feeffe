//! Focus session tracking
//!
//! Minimal start/end bookkeeping for the focus timer. Sessions nest only in
//! the degenerate sense that `start` can be called twice; `end` always
//! closes the most recently started session that is still open.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: String,
    /// Session start (epoch milliseconds)
    pub start_time: i64,
    /// Session end, absent while the session is running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl FocusSession {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusTracker {
    sessions: Vec<FocusSession>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session starting at `now_ms`.
    pub fn start(&mut self, now_ms: i64) -> &FocusSession {
        self.sessions.push(FocusSession {
            id: format!("fs_{now_ms}"),
            start_time: now_ms,
            end_time: None,
        });
        &self.sessions[self.sessions.len() - 1]
    }

    /// Close the most recently started open session, if any.
    pub fn end(&mut self, now_ms: i64) -> Option<&FocusSession> {
        let session = self.sessions.iter_mut().rev().find(|s| s.end_time.is_none())?;
        session.end_time = Some(now_ms);
        Some(&*session)
    }

    /// The most recently started session that is still running.
    pub fn active(&self) -> Option<&FocusSession> {
        self.sessions.iter().rev().find(|s| s.is_open())
    }

    pub fn sessions(&self) -> &[FocusSession] {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_opens_a_session() {
        let mut tracker = FocusTracker::new();
        let session = tracker.start(1_000);
        assert_eq!(session.id, "fs_1000");
        assert!(session.is_open());
        assert!(tracker.active().is_some());
    }

    #[test]
    fn end_closes_the_most_recent_open_session() {
        let mut tracker = FocusTracker::new();
        tracker.start(1_000);
        tracker.start(2_000);

        let ended = tracker.end(3_000).unwrap();
        assert_eq!(ended.start_time, 2_000);
        assert_eq!(ended.end_time, Some(3_000));

        // the first session is still running
        assert_eq!(tracker.active().unwrap().start_time, 1_000);
    }

    #[test]
    fn end_without_open_session_is_a_no_op() {
        let mut tracker = FocusTracker::new();
        assert!(tracker.end(1_000).is_none());

        tracker.start(1_000);
        tracker.end(2_000);
        assert!(tracker.end(3_000).is_none());
    }
}
