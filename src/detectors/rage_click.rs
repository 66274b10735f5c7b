//! Rage click detection
//!
//! Per-target sliding-window click counter. Three or more clicks on the same
//! target inside a short window produce a scored `rage_click` signal.

use crate::config::RageClickConfig;
use crate::naming::{semantic_label, target_key};
use crate::types::{ElementInfo, FrustrationSignal, FrustrationType, SignalMetrics};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Click count at which the count component of the score saturates.
const COUNT_SATURATION: f64 = 10.0;

/// Click velocity (clicks/sec) at which the velocity component saturates.
/// A zero-duration burst is treated as maximal velocity.
const VELOCITY_SATURATION: f64 = 10.0;

/// Weight of the count component in the composite score.
const COUNT_WEIGHT: f64 = 0.4;

/// Weight of the velocity component in the composite score.
const VELOCITY_WEIGHT: f64 = 0.6;

/// Detects rapid repeated clicks on a single target.
///
/// State is a map from stable target key to the time-ordered click
/// timestamps still inside the window. The window resets to empty on every
/// threshold crossing, so a sustained burst re-triggers only once a fresh
/// threshold is reached. The reset boundary must not slide.
pub struct RageClickDetector {
    config: RageClickConfig,
    clicks: HashMap<String, Vec<DateTime<Utc>>>,
    enabled: bool,
}

impl RageClickDetector {
    pub fn new(config: RageClickConfig) -> Self {
        Self {
            config,
            clicks: HashMap::new(),
            enabled: true,
        }
    }

    /// Enable signal production. Idempotent.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable signal production and stop accumulating state. Idempotent and
    /// callable even if `enable` was never called.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a click on `target` at `at`, returning a signal when the
    /// click count inside the window crosses the threshold.
    pub fn record_click(
        &mut self,
        target: &ElementInfo,
        at: DateTime<Utc>,
    ) -> Option<FrustrationSignal> {
        if !self.enabled {
            return None;
        }

        let key = target_key(target);
        let window_ms = self.config.time_window_ms;
        let timestamps = self.clicks.entry(key.clone()).or_default();

        timestamps.push(at);
        // Drop everything older than the window, measured from the newest entry
        timestamps.retain(|t| (at - *t).num_milliseconds() <= window_ms);

        if timestamps.len() < self.config.click_threshold {
            return None;
        }

        let first = *timestamps.first()?;
        let last = *timestamps.last()?;
        let count = timestamps.len() as u32;
        let duration_ms = (last - first).num_milliseconds();
        timestamps.clear();

        let score = rage_click_score(count, duration_ms);
        log::debug!("rage click on {key}: {count} clicks in {duration_ms}ms (score {score})");

        Some(FrustrationSignal {
            signal_type: FrustrationType::RageClick,
            score,
            at,
            target_name: Some(semantic_label(target)),
            target_key: Some(key),
            reason: None,
            metrics: SignalMetrics::RageClick {
                click_count: count,
                duration_ms,
            },
        })
    }

    /// Purge per-target lists whose newest click fell out of the window,
    /// bounding memory for long-running sessions. Caller-driven.
    pub fn cleanup(&mut self, now: DateTime<Utc>) {
        let window_ms = self.config.time_window_ms;
        self.clicks.retain(|_, timestamps| {
            timestamps
                .last()
                .is_some_and(|t| (now - *t).num_milliseconds() <= window_ms)
        });
    }

    /// Clear all per-target state.
    pub fn reset(&mut self) {
        self.clicks.clear();
    }

    /// Number of targets currently tracked.
    pub fn tracked_targets(&self) -> usize {
        self.clicks.len()
    }
}

/// Composite rage click score.
///
/// `count_score` saturates at 10 clicks; `velocity_score` saturates at
/// 10 clicks/sec, with a zero-duration burst treated as maximal velocity.
/// The weighted sum is rounded to two decimals and clamped to [0, 1].
fn rage_click_score(click_count: u32, duration_ms: i64) -> f64 {
    let count_score = (click_count as f64 / COUNT_SATURATION).min(1.0);

    let velocity = if duration_ms <= 0 {
        VELOCITY_SATURATION
    } else {
        click_count as f64 / duration_ms as f64 * 1_000.0
    };
    let velocity_score = (velocity / VELOCITY_SATURATION).min(1.0);

    let score = COUNT_WEIGHT * count_score + VELOCITY_WEIGHT * velocity_score;
    ((score * 100.0).round() / 100.0).clamp(0.0, 1.0)
}
