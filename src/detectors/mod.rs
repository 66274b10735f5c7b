//! Frustration-signal detectors
//!
//! Each detector owns its state exclusively, runs synchronously inside the
//! caller's event dispatch, and produces at most one signal per observation.
//! Time windows are evaluated against the timestamps supplied with each
//! observation; stale entries are purged lazily, never by timers.

pub mod dead_click;
pub mod form;
pub mod lifecycle;
pub mod rage_click;
pub mod thrashing;

pub use dead_click::{is_interactive, DeadClickDetector};
pub use form::{FormInteractionTracker, FormOutcome, FormSummary};
pub use lifecycle::{ErrorCapture, ErrorTracker, NavigationChange, NavigationTracker};
pub use rage_click::RageClickDetector;
pub use thrashing::{scroll_depth_pct, ThrashingDetector};
