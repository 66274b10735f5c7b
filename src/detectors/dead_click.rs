//! Dead click detection
//!
//! Classifies whether a clicked element is likely to respond. Clicks on
//! elements that match no interactivity heuristic produce a scored
//! `dead_click` signal with a reason.

use crate::config::DeadClickConfig;
use crate::naming::{semantic_label, target_key};
use crate::types::{DeadClickReason, ElementInfo, FrustrationSignal, FrustrationType, SignalMetrics};
use chrono::{DateTime, Utc};

/// Tag names considered interactive regardless of attributes.
const INTERACTIVE_TAGS: &[&str] = &["button", "input", "select", "textarea", "summary", "details"];

/// ARIA roles considered interactive.
const INTERACTIVE_ROLES: &[&str] = &[
    "button",
    "link",
    "menuitem",
    "tab",
    "checkbox",
    "radio",
    "switch",
    "slider",
    "spinbutton",
    "combobox",
    "listbox",
    "option",
    "textbox",
];

// Product-tuned base scores. A disabled or href-less element that still
// looks actionable frustrates more than a random static element.
/// Score for a click on a plain non-interactive element.
const SCORE_NON_INTERACTIVE: f64 = 0.3;
/// Score when the target is a disabled interactive element.
const SCORE_DISABLED: f64 = 0.5;
/// Score when the target is an anchor without an href.
const SCORE_NO_HREF: f64 = 0.6;
/// Score when the host flagged the target as visually clickable
/// (pointer cursor styling); overrides the reason-based scores.
const SCORE_LOOKS_CLICKABLE: f64 = 0.7;

/// Flags clicks on elements unlikely to respond.
pub struct DeadClickDetector {
    config: DeadClickConfig,
    enabled: bool,
}

impl DeadClickDetector {
    pub fn new(config: DeadClickConfig) -> Self {
        Self {
            config,
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

    /// Classify a click, returning a signal when the target (and, with
    /// parent traversal enabled, its whole ancestor chain) is dead.
    pub fn record_click(
        &mut self,
        target: &ElementInfo,
        at: DateTime<Utc>,
    ) -> Option<FrustrationSignal> {
        if !self.enabled {
            return None;
        }

        if is_interactive(target) {
            return None;
        }

        // A click on an icon/text node inside a real control is not dead
        if self.config.check_parents && target.ancestors.iter().any(is_interactive) {
            return None;
        }

        let reason = dead_click_reason(target);
        let score = dead_click_score(reason, target.looks_clickable);
        let key = target_key(target);
        log::debug!("dead click on {key}: {} (score {score})", reason.as_str());

        Some(FrustrationSignal {
            signal_type: FrustrationType::DeadClick,
            score,
            at,
            target_name: Some(semantic_label(target)),
            target_key: Some(key),
            reason: Some(reason),
            metrics: SignalMetrics::DeadClick {
                looks_clickable: target.looks_clickable,
            },
        })
    }
}

/// Interactivity heuristic, checked in priority order. A disabled element is
/// never interactive, even when its tag or role otherwise qualifies.
pub fn is_interactive(element: &ElementInfo) -> bool {
    if element.disabled {
        return false;
    }

    let tag = element.tag.to_ascii_lowercase();
    if INTERACTIVE_TAGS.contains(&tag.as_str()) {
        return true;
    }

    if tag == "a" && element.href.as_deref().is_some_and(|h| !h.is_empty()) {
        return true;
    }

    if let Some(role) = element.role.as_deref() {
        if INTERACTIVE_ROLES.contains(&role.to_ascii_lowercase().as_str()) {
            return true;
        }
    }

    if element.has_tabindex {
        return true;
    }

    element.has_inline_handler
}

/// Reason taxonomy for a confirmed dead click: disabled > no_href >
/// non_interactive.
fn dead_click_reason(element: &ElementInfo) -> DeadClickReason {
    if element.disabled {
        return DeadClickReason::Disabled;
    }
    let is_bare_anchor = element.tag.eq_ignore_ascii_case("a")
        && element.href.as_deref().map_or(true, |h| h.is_empty());
    if is_bare_anchor {
        return DeadClickReason::NoHref;
    }
    DeadClickReason::NonInteractive
}

fn dead_click_score(reason: DeadClickReason, looks_clickable: bool) -> f64 {
    if looks_clickable {
        return SCORE_LOOKS_CLICKABLE;
    }
    match reason {
        DeadClickReason::Disabled => SCORE_DISABLED,
        DeadClickReason::NoHref => SCORE_NO_HREF,
        DeadClickReason::NonInteractive => SCORE_NON_INTERACTIVE,
    }
}
