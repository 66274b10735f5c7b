//! Detector configuration
//!
//! Thresholds and time windows for the detection engine. All values are
//! product-tuned defaults; they deserialize from JSON with `serde(default)`
//! so partial configuration files stay valid.

use serde::{Deserialize, Serialize};

/// Rage click detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RageClickConfig {
    /// Sliding window for counting clicks on one target
    pub time_window_ms: i64,
    /// Clicks within the window required to trigger a signal
    pub click_threshold: usize,
}

impl Default for RageClickConfig {
    fn default() -> Self {
        Self {
            time_window_ms: 1_000,
            click_threshold: 3,
        }
    }
}

/// Dead click detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadClickConfig {
    /// Walk the ancestor chain and suppress the signal when any ancestor is
    /// interactive (avoids false positives for icon/text nodes inside real
    /// controls)
    pub check_parents: bool,
}

impl Default for DeadClickConfig {
    fn default() -> Self {
        Self {
            check_parents: true,
        }
    }
}

/// Scroll thrashing detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrashingConfig {
    /// Rolling window for direction-change records
    pub time_window_ms: i64,
    /// In-window direction changes required to trigger a signal
    pub min_direction_changes: usize,
}

impl Default for ThrashingConfig {
    fn default() -> Self {
        Self {
            time_window_ms: 2_000,
            min_direction_changes: 3,
        }
    }
}

/// Form interaction tracking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Dwell time on one field at or above which a blur is classified as
    /// hesitation
    pub hesitation_threshold_ms: i64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            hesitation_threshold_ms: 10_000,
        }
    }
}

/// Full monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub rage_click: RageClickConfig,
    pub dead_click: DeadClickConfig,
    pub thrashing: ThrashingConfig,
    pub form: FormConfig,
}

impl MonitorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, crate::error::TelemetryError> {
        serde_json::from_str(json)
            .map_err(|e| crate::error::TelemetryError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.rage_click.time_window_ms, 1_000);
        assert_eq!(config.rage_click.click_threshold, 3);
        assert_eq!(config.thrashing.time_window_ms, 2_000);
        assert_eq!(config.thrashing.min_direction_changes, 3);
        assert_eq!(config.form.hesitation_threshold_ms, 10_000);
        assert!(config.dead_click.check_parents);
    }

    #[test]
    fn test_partial_config_json() {
        let config = MonitorConfig::from_json(r#"{ "rage_click": { "click_threshold": 5 } }"#)
            .unwrap();
        assert_eq!(config.rage_click.click_threshold, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.rage_click.time_window_ms, 1_000);
        assert_eq!(config.form.hesitation_threshold_ms, 10_000);
    }

    #[test]
    fn test_invalid_config_json() {
        assert!(MonitorConfig::from_json("not json").is_err());
    }
}
