//! Page lifecycle and error capture
//!
//! Navigation and exception trackers that enrich emitted events with context
//! (time-on-page, last-clicked target). They perform no scoring.

use crate::types::ErrorPayload;
use chrono::{DateTime, Utc};

/// Maximum characters kept from a stack trace. Truncation, not failure.
const MAX_STACK_CHARS: usize = 2_000;

/// Maximum characters kept from an error message.
const MAX_MESSAGE_CHARS: usize = 300;

/// A navigation observed by the tracker.
#[derive(Debug, Clone)]
pub struct NavigationChange {
    /// URL the user navigated away from, if any page was entered before
    pub from_url: Option<String>,
    /// Destination URL
    pub to_url: String,
    /// Destination page title
    pub to_title: String,
    /// Time spent on the previous page
    pub time_on_page_ms: Option<i64>,
}

/// Tracks the current page and time-on-page across navigations
/// (full loads and pushState).
#[derive(Debug)]
pub struct NavigationTracker {
    current_url: Option<String>,
    current_title: String,
    entered_at: Option<DateTime<Utc>>,
    enabled: bool,
}

impl Default for NavigationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self {
            current_url: None,
            current_title: String::new(),
            entered_at: None,
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

    /// Record a navigation, returning the change with time-on-page for the
    /// page being left.
    pub fn record_navigation(
        &mut self,
        url: &str,
        title: Option<&str>,
        at: DateTime<Utc>,
    ) -> Option<NavigationChange> {
        if !self.enabled {
            return None;
        }

        let from_url = self.current_url.clone();
        let time_on_page_ms = self
            .entered_at
            .map(|entered| (at - entered).num_milliseconds().max(0));

        let title = title.unwrap_or("").to_string();
        self.current_url = Some(url.to_string());
        self.current_title = title.clone();
        self.entered_at = Some(at);

        Some(NavigationChange {
            from_url,
            to_url: url.to_string(),
            to_title: title,
            time_on_page_ms,
        })
    }

    /// Time spent on the current page so far.
    pub fn time_on_page_ms(&self, at: DateTime<Utc>) -> Option<i64> {
        self.entered_at
            .map(|entered| (at - entered).num_milliseconds().max(0))
    }

    /// Current page URL, if a navigation was recorded.
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Current page title.
    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn reset(&mut self) {
        self.current_url = None;
        self.current_title.clear();
        self.entered_at = None;
    }
}

/// A captured page error, enriched with interaction context.
#[derive(Debug, Clone)]
pub struct ErrorCapture {
    /// Truncated error message
    pub message: String,
    /// Truncated stack trace, if available
    pub stack: Option<String>,
    /// Error type/class name
    pub error_type: Option<String>,
    /// Label of the last clicked target before the error, if any
    pub last_clicked_target: Option<String>,
}

/// Captures page exceptions and attaches the last-clicked-target context.
#[derive(Debug)]
pub struct ErrorTracker {
    last_clicked: Option<String>,
    enabled: bool,
}

impl Default for ErrorTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorTracker {
    pub fn new() -> Self {
        Self {
            last_clicked: None,
            enabled: true,
        }
    }

    /// Enable capture. Idempotent.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable capture. Idempotent and callable even if `enable` was never
    /// called.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Note the label of a clicked target so later errors carry it.
    pub fn note_click(&mut self, target_label: &str) {
        self.last_clicked = Some(target_label.to_string());
    }

    /// Capture an error payload.
    pub fn record_error(&mut self, payload: &ErrorPayload) -> Option<ErrorCapture> {
        if !self.enabled {
            return None;
        }

        Some(ErrorCapture {
            message: truncate_chars(&payload.message, MAX_MESSAGE_CHARS),
            stack: payload
                .stack
                .as_deref()
                .map(|s| truncate_chars(s, MAX_STACK_CHARS)),
            error_type: payload.error_type.clone(),
            last_clicked_target: self.last_clicked.clone(),
        })
    }

    pub fn reset(&mut self) {
        self.last_clicked = None;
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}
