//! Form interaction tracking
//!
//! Tracks focus/blur pairs per field and classifies hesitation. Field-level
//! blur outcomes carry a frustration score; form-level submit/abandon
//! summaries carry timings only.

use crate::config::FormConfig;
use crate::types::{FieldInfo, FrustrationSignal, FrustrationType, SignalMetrics};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

// Product-tuned scoring weights for a field blur.
/// Score contribution of crossing the hesitation threshold.
const HESITATION_WEIGHT: f64 = 0.5;
/// Per-refocus score step beyond the second focus (repeated focus suggests
/// correction or confusion).
const REFOCUS_STEP: f64 = 0.1;
/// Cap on the refocus contribution.
const REFOCUS_CAP: f64 = 0.3;
/// Dwell time above which the long-dwell bonus applies, regardless of the
/// hesitation flag.
const LONG_DWELL_MS: i64 = 30_000;
/// Score contribution of a long dwell.
const LONG_DWELL_BONUS: f64 = 0.2;

/// Per-field focus/blur running state.
#[derive(Debug, Clone, Default)]
struct FieldState {
    focus_time: Option<DateTime<Utc>>,
    total_time_ms: i64,
    interaction_count: u32,
}

/// Whether a form summary came from a submit or an abandon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Submit,
    Abandon,
}

/// Form-level summary produced on submit or abandon. No scoring at form
/// level; only field-level blur outcomes carry frustration scores.
#[derive(Debug, Clone)]
pub struct FormSummary {
    pub form: String,
    pub outcome: FormOutcome,
    /// Accumulated dwell time across all fields
    pub total_time_ms: i64,
    /// Count of distinct fields touched
    pub field_count: usize,
    /// Whether the submission succeeded (submit only)
    pub success: Option<bool>,
    /// Error message reported on failed submission
    pub error_message: Option<String>,
}

/// Tracks per-field dwell times and produces hesitation signals.
pub struct FormInteractionTracker {
    config: FormConfig,
    fields: HashMap<String, FieldState>,
    enabled: bool,
}

impl FormInteractionTracker {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            fields: HashMap::new(),
            enabled: true,
        }
    }

    /// Enable tracking. Idempotent.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable tracking. Idempotent and callable even if `enable` was never
    /// called.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a focus on a field.
    pub fn record_focus(&mut self, field: &FieldInfo, at: DateTime<Utc>) {
        if !self.enabled {
            return;
        }
        let state = self.fields.entry(field.key()).or_default();
        state.focus_time = Some(at);
        state.interaction_count += 1;
    }

    /// Record a blur on a field, returning the field-level outcome.
    ///
    /// A blur without a matching open focus is a no-op (defensive against
    /// out-of-order events).
    pub fn record_blur(
        &mut self,
        field: &FieldInfo,
        at: DateTime<Utc>,
    ) -> Option<FrustrationSignal> {
        if !self.enabled {
            return None;
        }

        let key = field.key();
        let state = self.fields.get_mut(&key)?;
        let focus_time = state.focus_time.take()?;

        let time_spent_ms = (at - focus_time).num_milliseconds().max(0);
        state.total_time_ms += time_spent_ms;
        let interaction_count = state.interaction_count;

        let hesitation = time_spent_ms >= self.config.hesitation_threshold_ms;
        let score = field_blur_score(time_spent_ms, interaction_count, hesitation);
        if hesitation {
            log::debug!("form hesitation on {key}: {time_spent_ms}ms (score {score})");
        }

        Some(FrustrationSignal {
            signal_type: FrustrationType::FormHesitation,
            score,
            at,
            target_name: Some(key.clone()),
            target_key: Some(key.clone()),
            reason: None,
            metrics: SignalMetrics::FormField {
                field: key,
                time_spent_ms,
                interaction_count,
                hesitation,
            },
        })
    }

    /// Record a form submission and summarize accumulated field timings.
    pub fn record_submit(
        &mut self,
        form: &str,
        success: bool,
        error_message: Option<String>,
        _at: DateTime<Utc>,
    ) -> FormSummary {
        FormSummary {
            form: form.to_string(),
            outcome: FormOutcome::Submit,
            total_time_ms: self.total_time_ms(),
            field_count: self.fields.len(),
            success: Some(success),
            error_message,
        }
    }

    /// Record a form abandonment and summarize accumulated field timings.
    pub fn record_abandon(&mut self, form: &str, _at: DateTime<Utc>) -> FormSummary {
        FormSummary {
            form: form.to_string(),
            outcome: FormOutcome::Abandon,
            total_time_ms: self.total_time_ms(),
            field_count: self.fields.len(),
            success: None,
            error_message: None,
        }
    }

    /// Clear all per-field state.
    pub fn reset(&mut self) {
        self.fields.clear();
    }

    /// Count of distinct fields touched so far.
    pub fn fields_touched(&self) -> usize {
        self.fields.len()
    }

    fn total_time_ms(&self) -> i64 {
        self.fields.values().map(|s| s.total_time_ms).sum()
    }
}

/// Field blur score: hesitation contributes 0.5; refocusing beyond the
/// second focus contributes 0.1 per extra focus up to 0.3; dwelling past
/// 30s contributes another 0.2. Clamped to 1.
fn field_blur_score(time_spent_ms: i64, interaction_count: u32, hesitation: bool) -> f64 {
    let mut score = 0.0;
    if hesitation {
        score += HESITATION_WEIGHT;
    }
    if interaction_count > 2 {
        score += (f64::from(interaction_count - 2) * REFOCUS_STEP).min(REFOCUS_CAP);
    }
    if time_spent_ms > LONG_DWELL_MS {
        score += LONG_DWELL_BONUS;
    }
    score.min(1.0)
}
