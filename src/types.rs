//! Interaction event and frustration signal types
//!
//! This module defines the wire types for raw interaction events flowing into
//! the detection engine and the signal/event types flowing out of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interaction event types captured from an end-user interface session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionEventType {
    Click,
    Scroll,
    FieldFocus,
    FieldBlur,
    FormSubmit,
    FormAbandon,
    Error,
    Navigation,
    IdentifyUser,
    ClearUser,
    ResetSession,
}

/// Scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Classified frustration signal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrustrationType {
    RageClick,
    DeadClick,
    Thrashing,
    FormHesitation,
}

impl FrustrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrustrationType::RageClick => "rage_click",
            FrustrationType::DeadClick => "dead_click",
            FrustrationType::Thrashing => "thrashing",
            FrustrationType::FormHesitation => "form_hesitation",
        }
    }
}

/// Why a confirmed dead click was classified as dead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadClickReason {
    /// Target is an interactive element carrying a disabled attribute
    Disabled,
    /// Target is an anchor without an href
    NoHref,
    /// Target matched no interactivity heuristic
    NonInteractive,
}

impl DeadClickReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadClickReason::Disabled => "disabled",
            DeadClickReason::NoHref => "no_href",
            DeadClickReason::NonInteractive => "non_interactive",
        }
    }
}

/// Description of a clicked element as observed by the host integration.
///
/// The detection core never touches a real document; the host extracts the
/// attributes it needs and hands them over in this shape. Every field except
/// `tag` defaults so sparse descriptions stay valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Lowercase tag name (e.g., "button", "div")
    pub tag: String,
    /// Element id attribute, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// ARIA role attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// href attribute (anchors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Whether the element carries a disabled attribute
    #[serde(default)]
    pub disabled: bool,
    /// Whether a tabindex attribute is present
    #[serde(default)]
    pub has_tabindex: bool,
    /// Whether an inline click/mousedown/mouseup handler attribute is present
    #[serde(default)]
    pub has_inline_handler: bool,
    /// Whether the element visually looks clickable (pointer cursor styling,
    /// detected externally by the host)
    #[serde(default)]
    pub looks_clickable: bool,
    /// Explicit accessible label (aria-label)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Visible text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// title attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// alt attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// placeholder attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Ancestor chain, innermost first. Ancestors carry their own attribute
    /// snapshot; their `ancestors` lists are left empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<ElementInfo>,
}

/// A single scroll observation with the document metrics needed for
/// scroll-depth computation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollSample {
    /// Vertical scroll position in pixels
    pub position: f64,
    /// Total scrollable document height in pixels
    pub document_height: f64,
    /// Viewport height in pixels
    pub viewport_height: f64,
}

/// Form field description for focus/blur events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field name attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field id attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Lowercase tag name (fallback key when name and id are absent)
    #[serde(default)]
    pub tag: String,
}

impl FieldInfo {
    /// Stable key for tracking a field: name, else id, else tag name.
    pub fn key(&self) -> String {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.id.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.tag)
            .to_string()
    }
}

/// Form-level payload for submit/abandon events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormPayload {
    /// Form name or identifier
    pub form: String,
    /// Whether the submission succeeded (submit only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Error message reported on failed submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Captured page error payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error message
    pub message: String,
    /// Stack trace, if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Error type/class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

/// Navigation payload (page load, pushState)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationPayload {
    /// Destination URL
    pub url: String,
    /// Destination page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Caller-supplied user identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable user identifier
    pub id: String,
    /// Email, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A raw interaction event with timestamp and type-specific payload.
///
/// Schema: `ux.interaction_event.v1`. Exactly one payload field is expected
/// to be present for payload-carrying event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
    /// Event type
    pub event_type: InteractionEventType,
    /// Click target (present when event_type is Click)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ElementInfo>,
    /// Scroll sample (present when event_type is Scroll)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollSample>,
    /// Field description (present when event_type is FieldFocus/FieldBlur)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldInfo>,
    /// Form payload (present when event_type is FormSubmit/FormAbandon)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormPayload>,
    /// Error payload (present when event_type is Error)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
    /// Navigation payload (present when event_type is Navigation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationPayload>,
    /// User identity (present when event_type is IdentifyUser)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,
}

/// Type-specific metrics carried by a frustration signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalMetrics {
    RageClick {
        /// Clicks in the triggering window
        click_count: u32,
        /// Time span between first and last click in the window
        duration_ms: i64,
    },
    DeadClick {
        /// Whether the host flagged the target as visually clickable
        looks_clickable: bool,
    },
    Thrashing {
        /// Direction changes in the triggering window
        direction_changes: u32,
        /// Time span of the in-window direction-change records
        duration_ms: i64,
        /// Total absolute scroll distance accumulated in the burst
        scroll_distance: f64,
        /// Scroll depth at trigger time, 0-100
        scroll_depth_pct: f64,
    },
    FormField {
        /// Tracked field key
        field: String,
        /// Dwell time for this focus/blur pair
        time_spent_ms: i64,
        /// Focus count for this field so far
        interaction_count: u32,
        /// Whether the dwell crossed the hesitation threshold
        hesitation: bool,
    },
}

/// A scored, classified frustration signal.
///
/// Immutable once created; consumed exactly once by the event emitter.
/// Invariant: `score` is always clamped to `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrustrationSignal {
    /// Signal classification
    pub signal_type: FrustrationType,
    /// Frustration score in [0, 1]
    pub score: f64,
    /// When the threshold was crossed
    pub at: DateTime<Utc>,
    /// Human-readable label of the implicated target, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// Stable key of the implicated target, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_key: Option<String>,
    /// Dead-click reason, if applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DeadClickReason>,
    /// Type-specific metrics
    pub metrics: SignalMetrics,
}

/// Severity of an emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

/// Primitive attribute value on an emitted event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::String(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        AttrValue::Int(v as i64)
    }
}

impl From<u64> for AttrValue {
    fn from(v: u64) -> Self {
        AttrValue::Int(v as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

/// A named, stamped event handed to the exporter collaborator.
///
/// Attributes always include `session.id`, `session.sequence`,
/// `session.duration_ms`, `page.url`, `page.title`, and `user.*` when a user
/// identity has been set. A `BTreeMap` keeps attribute order deterministic
/// for serialization and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmittedEvent {
    /// Event name (e.g., "frustration.rage_click", "page.error")
    pub name: String,
    /// Event severity
    pub severity: Severity,
    /// Flat attribute map of primitive values
    pub attributes: BTreeMap<String, AttrValue>,
}

impl EmittedEvent {
    /// Fetch an attribute value by key.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}
