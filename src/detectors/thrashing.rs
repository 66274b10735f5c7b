//! Scroll thrashing detection
//!
//! Counts scroll direction reversals inside a rolling window. Rapid repeated
//! reversals produce a scored `thrashing` signal, the "user is lost" hint.

use crate::config::ThrashingConfig;
use crate::types::{FrustrationSignal, FrustrationType, ScrollDirection, ScrollSample, SignalMetrics};
use chrono::{DateTime, Utc};

/// Normalization denominator multiplier for the score: a burst with twice
/// the minimum direction changes scores 1.0. Product-tuned.
const SCORE_DENOMINATOR_FACTOR: f64 = 2.0;

/// A recorded direction change.
#[derive(Debug, Clone, Copy)]
struct DirectionChange {
    #[allow(dead_code)]
    position: f64,
    at: DateTime<Utc>,
}

/// Detects erratic scroll direction reversals.
pub struct ThrashingDetector {
    config: ThrashingConfig,
    changes: Vec<DirectionChange>,
    last_position: Option<f64>,
    last_direction: Option<ScrollDirection>,
    last_sample_at: Option<DateTime<Utc>>,
    total_distance: f64,
    enabled: bool,
}

impl ThrashingDetector {
    pub fn new(config: ThrashingConfig) -> Self {
        Self {
            config,
            changes: Vec::new(),
            last_position: None,
            last_direction: None,
            last_sample_at: None,
            total_distance: 0.0,
            enabled: true,
        }
    }

    /// Enable signal production. Idempotent.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable signal production. Idempotent and callable even if `enable`
    /// was never called.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one scroll observation, returning a signal when the in-window
    /// direction-change count crosses the threshold.
    pub fn record_scroll(
        &mut self,
        sample: ScrollSample,
        at: DateTime<Utc>,
    ) -> Option<FrustrationSignal> {
        if !self.enabled {
            return None;
        }

        // Window expiry: a gap longer than the window ends the burst
        if let Some(last_at) = self.last_sample_at {
            if (at - last_at).num_milliseconds() > self.config.time_window_ms {
                self.reset_burst();
            }
        }
        self.last_sample_at = Some(at);

        let Some(last_position) = self.last_position.replace(sample.position) else {
            return None;
        };

        let delta = sample.position - last_position;
        if delta == 0.0 {
            return None;
        }

        let direction = if delta > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        self.total_distance += delta.abs();

        let reversed = self
            .last_direction
            .replace(direction)
            .is_some_and(|previous| previous != direction);
        if !reversed {
            return None;
        }

        self.changes.push(DirectionChange {
            position: sample.position,
            at,
        });
        let window_ms = self.config.time_window_ms;
        self.changes
            .retain(|c| (at - c.at).num_milliseconds() <= window_ms);

        if self.changes.len() < self.config.min_direction_changes {
            return None;
        }

        let count = self.changes.len() as u32;
        let duration_ms = self
            .changes
            .first()
            .map(|first| (at - first.at).num_milliseconds())
            .unwrap_or(0);
        let scroll_distance = self.total_distance;
        let scroll_depth_pct = scroll_depth_pct(&sample);
        let score = thrashing_score(count as usize, self.config.min_direction_changes);
        log::debug!("thrashing: {count} reversals in {duration_ms}ms (score {score})");

        // Full reset so the same burst cannot re-fire
        self.reset_burst();

        Some(FrustrationSignal {
            signal_type: FrustrationType::Thrashing,
            score,
            at,
            target_name: None,
            target_key: None,
            reason: None,
            metrics: SignalMetrics::Thrashing {
                direction_changes: count,
                duration_ms,
                scroll_distance,
                scroll_depth_pct,
            },
        })
    }

    /// Clear all detector state, including the last known position.
    pub fn reset(&mut self) {
        self.reset_burst();
        self.last_position = None;
        self.last_sample_at = None;
    }

    /// Direction changes currently inside the window.
    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }

    // Resets the running burst state but keeps the last position so the next
    // sample still produces a delta.
    fn reset_burst(&mut self) {
        self.changes.clear();
        self.total_distance = 0.0;
        self.last_direction = None;
    }
}

/// Scroll depth as a percentage of the scrollable overflow. A document with
/// no scrollable overflow is treated as fully visible (100).
pub fn scroll_depth_pct(sample: &ScrollSample) -> f64 {
    let scrollable = sample.document_height - sample.viewport_height;
    if scrollable <= 0.0 {
        return 100.0;
    }
    (sample.position / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Thrashing score: reversal count normalized against twice the trigger
/// minimum, capped at 1.
fn thrashing_score(direction_changes: usize, min_direction_changes: usize) -> f64 {
    let denominator = (min_direction_changes as f64) * SCORE_DENOMINATOR_FACTOR;
    if denominator <= 0.0 {
        return 1.0;
    }
    (direction_changes as f64 / denominator).min(1.0)
}
