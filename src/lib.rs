//! uxsense - Frustration-signal detection engine for interface telemetry
//!
//! uxsense turns raw interaction streams (clicks, scroll positions,
//! focus/blur, errors, navigations) into scored, classified frustration
//! signals through stateful detectors: sliding time windows,
//! velocity-weighted scoring, interactivity classification, and monotonic
//! session sequencing.
//!
//! ## Components
//!
//! - **Detectors**: rage click, dead click, scroll thrashing, form
//!   hesitation, plus navigation/error context trackers
//! - **Session model**: persistent session identity with a strictly
//!   increasing event sequence
//! - **Emitter**: stamps every event with session/user/page context and
//!   hands it to the exporter collaborator

pub mod config;
pub mod detectors;
pub mod emitter;
pub mod error;
pub mod host;
pub mod naming;
pub mod pipeline;
pub mod session;
pub mod types;

pub use config::MonitorConfig;
pub use emitter::{CollectingSink, EventEmitter, EventSink};
pub use error::{StorageError, TelemetryError};
pub use pipeline::{events_to_telemetry, replay_events, FrustrationMonitor};
pub use session::{MemoryStore, SessionContext, SessionStore};
pub use types::{EmittedEvent, FrustrationSignal, FrustrationType, InteractionEvent, Severity};

/// uxsense version embedded in telemetry and CLI output
pub const UXSENSE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for telemetry payloads
pub const PRODUCER_NAME: &str = "uxsense";

/// Input wire schema identifier
pub const EVENT_SCHEMA_VERSION: &str = "ux.interaction_event.v1";
