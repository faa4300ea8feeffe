//! Capture settings
//!
//! Settings steer the capture side (which domains count as distracting, how
//! often to sample, whether to intercept during focus). They are replaced
//! wholesale and validated on the way in; the aggregations never read them,
//! since events arrive already classified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Domains the capturer classifies as distracting
    pub distraction_domains: Vec<String>,
    /// Sampling interval in seconds
    pub capture_interval_sec: u32,
    /// Whether distracting tabs are intercepted during a focus session
    pub focus_intercept_enabled: bool,
    /// Daily study goal in minutes
    pub daily_study_goal_min: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            distraction_domains: [
                "youtube.com",
                "tiktok.com",
                "facebook.com",
                "instagram.com",
                "twitter.com",
                "reddit.com",
                "netflix.com",
                "steamcommunity.com",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
            capture_interval_sec: 5,
            focus_intercept_enabled: true,
            daily_study_goal_min: 240,
        }
    }
}

/// Validation errors for settings replacement
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    #[error("captureIntervalSec must be at least 1")]
    ZeroCaptureInterval,

    #[error("dailyStudyGoalMin must be between 1 and 1440, got {0}")]
    GoalOutOfRange(u32),

    #[error("distraction domain entries must not be blank")]
    BlankDomain,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.capture_interval_sec == 0 {
            return Err(SettingsError::ZeroCaptureInterval);
        }
        if self.daily_study_goal_min == 0 || self.daily_study_goal_min > 1440 {
            return Err(SettingsError::GoalOutOfRange(self.daily_study_goal_min));
        }
        if self.distraction_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(SettingsError::BlankDomain);
        }
        Ok(())
    }

    /// Whether the capturer should classify this domain as a distraction.
    pub fn is_distraction(&self, domain: &str) -> bool {
        self.distraction_domains.iter().any(|d| d == domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.capture_interval_sec, 5);
        assert_eq!(settings.daily_study_goal_min, 240);
        assert!(settings.focus_intercept_enabled);
        assert!(settings.is_distraction("youtube.com"));
        assert!(!settings.is_distraction("docs.google.com"));
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json["distractionDomains"].is_array());
        assert_eq!(json["captureIntervalSec"], 5);
        assert_eq!(json["focusInterceptEnabled"], true);
        assert_eq!(json["dailyStudyGoalMin"], 240);
    }

    #[test]
    fn rejects_zero_interval() {
        let settings = Settings {
            capture_interval_sec: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::ZeroCaptureInterval)
        ));
    }

    #[test]
    fn rejects_goal_out_of_range() {
        let settings = Settings {
            daily_study_goal_min: 2000,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::GoalOutOfRange(2000))
        ));
    }

    #[test]
    fn rejects_blank_domain() {
        let settings = Settings {
            distraction_domains: vec!["a.com".to_string(), "  ".to_string()],
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::BlankDomain)
        ));
    }
}
