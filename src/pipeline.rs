//! Monitor orchestration
//!
//! This module provides the public API for the detection engine. The
//! stateful [`FrustrationMonitor`] routes raw interaction events to the
//! detectors and emits every produced signal; the stateless
//! [`events_to_telemetry`] helper replays a captured event stream through a
//! monitor with in-memory collaborators and returns the emitted events.

use crate::config::MonitorConfig;
use crate::detectors::{
    DeadClickDetector, ErrorTracker, FormInteractionTracker, FormOutcome, FormSummary,
    NavigationTracker, RageClickDetector, ThrashingDetector,
};
use crate::emitter::{EventEmitter, EventSink};
use crate::error::TelemetryError;
use crate::host::ManualClock;
use crate::naming::semantic_label;
use crate::session::{MemoryStore, SessionContext};
use crate::types::{
    AttrValue, FrustrationSignal, InteractionEvent, InteractionEventType, Severity, SignalMetrics,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Stateful detection engine: routes interaction events to the detectors
/// and emits signals and lifecycle events through the event emitter.
///
/// All processing is synchronous; every state mutation and emission
/// completes before `handle` returns.
pub struct FrustrationMonitor {
    emitter: EventEmitter,
    rage_click: RageClickDetector,
    dead_click: DeadClickDetector,
    thrashing: ThrashingDetector,
    form: FormInteractionTracker,
    navigation: NavigationTracker,
    errors: ErrorTracker,
}

impl FrustrationMonitor {
    pub fn new(config: MonitorConfig, session: SessionContext, sink: Rc<dyn EventSink>) -> Self {
        Self {
            emitter: EventEmitter::new(session, sink),
            rage_click: RageClickDetector::new(config.rage_click),
            dead_click: DeadClickDetector::new(config.dead_click),
            thrashing: ThrashingDetector::new(config.thrashing),
            form: FormInteractionTracker::new(config.form),
            navigation: NavigationTracker::new(),
            errors: ErrorTracker::new(),
        }
    }

    /// Create a monitor with default configuration and an in-memory session
    /// store.
    pub fn with_defaults(sink: Rc<dyn EventSink>) -> Self {
        Self::new(
            MonitorConfig::default(),
            SessionContext::new(Box::new(MemoryStore::new())),
            sink,
        )
    }

    /// Route one raw interaction event. Events with a missing payload for
    /// their type are ignored (defensive no-op).
    pub fn handle(&mut self, event: &InteractionEvent) {
        let at = event.timestamp;
        match event.event_type {
            InteractionEventType::Click => {
                let Some(target) = event.target.as_ref() else {
                    return;
                };
                self.errors.note_click(&semantic_label(target));

                if let Some(signal) = self.rage_click.record_click(target, at) {
                    self.emitter.emit_signal(&signal);
                }
                if let Some(signal) = self.dead_click.record_click(target, at) {
                    self.emitter.emit_signal(&signal);
                }
            }
            InteractionEventType::Scroll => {
                let Some(sample) = event.scroll else {
                    return;
                };
                if let Some(signal) = self.thrashing.record_scroll(sample, at) {
                    self.emitter.emit_signal(&signal);
                }
            }
            InteractionEventType::FieldFocus => {
                let Some(field) = event.field.as_ref() else {
                    return;
                };
                self.form.record_focus(field, at);
            }
            InteractionEventType::FieldBlur => {
                let Some(field) = event.field.as_ref() else {
                    return;
                };
                if let Some(signal) = self.form.record_blur(field, at) {
                    self.emit_field_blur(&signal);
                }
            }
            InteractionEventType::FormSubmit => {
                let Some(form) = event.form.as_ref() else {
                    return;
                };
                let summary = self.form.record_submit(
                    &form.form,
                    form.success.unwrap_or(true),
                    form.error_message.clone(),
                    at,
                );
                self.emit_form_summary(&summary);
            }
            InteractionEventType::FormAbandon => {
                let Some(form) = event.form.as_ref() else {
                    return;
                };
                let summary = self.form.record_abandon(&form.form, at);
                self.emit_form_summary(&summary);
            }
            InteractionEventType::Error => {
                let Some(payload) = event.error.as_ref() else {
                    return;
                };
                if let Some(capture) = self.errors.record_error(payload) {
                    self.emit_error(capture, at);
                }
            }
            InteractionEventType::Navigation => {
                let Some(payload) = event.navigation.as_ref() else {
                    return;
                };
                let change =
                    self.navigation
                        .record_navigation(&payload.url, payload.title.as_deref(), at);
                if let Some(change) = change {
                    self.emitter
                        .set_page(change.to_url.clone(), change.to_title.clone());

                    let mut attributes: BTreeMap<String, AttrValue> = BTreeMap::new();
                    if let Some(from) = &change.from_url {
                        attributes.insert("navigation.from_url".to_string(), from.clone().into());
                    }
                    if let Some(ms) = change.time_on_page_ms {
                        attributes.insert("navigation.time_on_page_ms".to_string(), ms.into());
                    }
                    self.emitter
                        .emit("navigation.change", Severity::Info, attributes);
                }
            }
            InteractionEventType::IdentifyUser => {
                let Some(user) = event.user.clone() else {
                    return;
                };
                self.emitter.session_mut().set_user(user);
                self.emitter
                    .emit("session.identify", Severity::Info, BTreeMap::new());
            }
            InteractionEventType::ClearUser => {
                self.emitter.session_mut().clear_user();
            }
            InteractionEventType::ResetSession => {
                self.emitter.session_mut().reset_session();
            }
        }
    }

    /// A field blur always produces a field-level event carrying its
    /// frustration score; when the dwell crossed the hesitation threshold it
    /// is emitted as the frustration signal itself.
    fn emit_field_blur(&mut self, signal: &FrustrationSignal) {
        let SignalMetrics::FormField {
            field,
            time_spent_ms,
            interaction_count,
            hesitation,
        } = &signal.metrics
        else {
            return;
        };

        if *hesitation {
            self.emitter.emit_signal(signal);
            return;
        }

        let mut attributes: BTreeMap<String, AttrValue> = BTreeMap::new();
        attributes.insert("form.field".to_string(), field.clone().into());
        attributes.insert("form.time_spent_ms".to_string(), (*time_spent_ms).into());
        attributes.insert(
            "form.interaction_count".to_string(),
            (*interaction_count).into(),
        );
        attributes.insert("form.hesitation".to_string(), false.into());
        attributes.insert("frustration.score".to_string(), signal.score.into());
        self.emitter
            .emit("form.field_blur", Severity::Info, attributes);
    }

    fn emit_form_summary(&mut self, summary: &FormSummary) {
        let mut attributes: BTreeMap<String, AttrValue> = BTreeMap::new();
        attributes.insert("form.name".to_string(), summary.form.clone().into());
        attributes.insert(
            "form.total_time_ms".to_string(),
            summary.total_time_ms.into(),
        );
        attributes.insert(
            "form.field_count".to_string(),
            (summary.field_count as u64).into(),
        );
        if let Some(success) = summary.success {
            attributes.insert("form.success".to_string(), success.into());
        }
        if let Some(message) = &summary.error_message {
            attributes.insert("form.error_message".to_string(), message.clone().into());
        }

        let name = match summary.outcome {
            FormOutcome::Submit => "form.submit",
            FormOutcome::Abandon => "form.abandon",
        };
        self.emitter.emit(name, Severity::Info, attributes);
    }

    fn emit_error(&mut self, capture: crate::detectors::ErrorCapture, at: DateTime<Utc>) {
        let mut attributes: BTreeMap<String, AttrValue> = BTreeMap::new();
        attributes.insert("error.message".to_string(), capture.message.into());
        if let Some(stack) = capture.stack {
            attributes.insert("error.stack".to_string(), stack.into());
        }
        if let Some(error_type) = capture.error_type {
            attributes.insert("error.type".to_string(), error_type.into());
        }
        if let Some(target) = capture.last_clicked_target {
            attributes.insert("interaction.last_clicked_target".to_string(), target.into());
        }
        if let Some(ms) = self.navigation.time_on_page_ms(at) {
            attributes.insert("page.time_on_page_ms".to_string(), ms.into());
        }
        self.emitter.emit("page.error", Severity::Error, attributes);
    }

    // Detector access for enable/disable and cleanup.

    pub fn rage_click_mut(&mut self) -> &mut RageClickDetector {
        &mut self.rage_click
    }

    pub fn dead_click_mut(&mut self) -> &mut DeadClickDetector {
        &mut self.dead_click
    }

    pub fn thrashing_mut(&mut self) -> &mut ThrashingDetector {
        &mut self.thrashing
    }

    pub fn form_mut(&mut self) -> &mut FormInteractionTracker {
        &mut self.form
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationTracker {
        &mut self.navigation
    }

    pub fn errors_mut(&mut self) -> &mut ErrorTracker {
        &mut self.errors
    }

    /// Session access (identity, explicit reset).
    pub fn session_mut(&mut self) -> &mut SessionContext {
        self.emitter.session_mut()
    }

    /// Purge stale detector state; caller-driven, for long-lived pages.
    pub fn cleanup(&mut self, now: DateTime<Utc>) {
        self.rage_click.cleanup(now);
    }

    /// Clear all detector state (session identity is untouched).
    pub fn reset(&mut self) {
        self.rage_click.reset();
        self.thrashing.reset();
        self.form.reset();
        self.navigation.reset();
        self.errors.reset();
    }
}

/// Parse a JSON array of interaction events.
pub fn parse_events_json(json: &str) -> Result<Vec<InteractionEvent>, TelemetryError> {
    serde_json::from_str(json).map_err(|e| TelemetryError::ParseError(e.to_string()))
}

/// Parse newline-delimited JSON, one interaction event per line. Blank
/// lines are skipped.
pub fn parse_events_ndjson(input: &str) -> Result<Vec<InteractionEvent>, TelemetryError> {
    let mut events = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: InteractionEvent = serde_json::from_str(trimmed)
            .map_err(|e| TelemetryError::ParseError(format!("line {}: {}", lineno + 1, e)))?;
        events.push(event);
    }
    Ok(events)
}

/// Replay a captured event stream (JSON array) through a fresh monitor with
/// in-memory collaborators and return the emitted events as JSON
/// (stateless, one-shot).
///
/// Events are replayed in timestamp order; the session clock follows the
/// event timestamps so durations are faithful to the recording.
pub fn events_to_telemetry(events_json: &str) -> Result<String, TelemetryError> {
    events_to_telemetry_with_config(events_json, MonitorConfig::default())
}

/// [`events_to_telemetry`] with explicit detector configuration.
pub fn events_to_telemetry_with_config(
    events_json: &str,
    config: MonitorConfig,
) -> Result<String, TelemetryError> {
    let events = parse_events_json(events_json)?;
    let emitted = replay_events(events, config);
    serde_json::to_string_pretty(&emitted).map_err(TelemetryError::JsonError)
}

/// Replay already-parsed events through a fresh monitor with in-memory
/// collaborators, returning the emitted events. Events are replayed in
/// timestamp order; the session clock follows the event timestamps.
pub fn replay_events(
    mut events: Vec<InteractionEvent>,
    config: MonitorConfig,
) -> Vec<crate::types::EmittedEvent> {
    events.sort_by_key(|e| e.timestamp);

    let clock = Rc::new(ManualClock::new(
        events.first().map(|e| e.timestamp).unwrap_or_else(Utc::now),
    ));
    let session = SessionContext::with_clock(
        Box::new(MemoryStore::new()),
        Box::new(Rc::clone(&clock)),
    );
    let sink = crate::emitter::CollectingSink::new();
    let mut monitor = FrustrationMonitor::new(
        config,
        session,
        Rc::clone(&sink) as Rc<dyn EventSink>,
    );

    for event in &events {
        clock.set(event.timestamp);
        monitor.handle(event);
    }

    sink.take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::CollectingSink;
    use crate::types::{ElementInfo, FieldInfo, NavigationPayload, ScrollSample, UserIdentity};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap()
    }

    fn empty_event(event_type: InteractionEventType, at: DateTime<Utc>) -> InteractionEvent {
        InteractionEvent {
            timestamp: at,
            event_type,
            target: None,
            scroll: None,
            field: None,
            form: None,
            error: None,
            navigation: None,
            user: None,
        }
    }

    fn click(target: ElementInfo, at: DateTime<Utc>) -> InteractionEvent {
        InteractionEvent {
            target: Some(target),
            ..empty_event(InteractionEventType::Click, at)
        }
    }

    fn button(id: &str) -> ElementInfo {
        ElementInfo {
            tag: "button".to_string(),
            id: Some(id.to_string()),
            text: Some("Submit".to_string()),
            ..Default::default()
        }
    }

    fn monitor_with_sink() -> (FrustrationMonitor, Rc<CollectingSink>) {
        let sink = CollectingSink::new();
        let monitor = FrustrationMonitor::with_defaults(Rc::clone(&sink) as Rc<dyn EventSink>);
        (monitor, sink)
    }

    #[test]
    fn test_rage_click_burst_emits_signal_event() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();

        for i in 0..3 {
            monitor.handle(&click(button("buy"), start + Duration::milliseconds(i * 80)));
        }

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "frustration.rage_click");
        assert_eq!(events[0].attr("session.sequence"), Some(&AttrValue::Int(0)));
        assert!(events[0].attr("session.id").is_some());
    }

    #[test]
    fn test_dead_click_and_rage_click_are_independent() {
        let (mut monitor, sink) = monitor_with_sink();
        let div = ElementInfo {
            tag: "div".to_string(),
            classes: vec!["banner".to_string()],
            ..Default::default()
        };

        // Three rapid clicks on a dead element produce three dead_click
        // events plus one rage_click event
        let start = t0();
        for i in 0..3 {
            monitor.handle(&click(div.clone(), start + Duration::milliseconds(i * 80)));
        }

        let events = sink.events();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        let dead = names.iter().filter(|n| **n == "frustration.dead_click").count();
        let rage = names.iter().filter(|n| **n == "frustration.rage_click").count();
        assert_eq!(dead, 3);
        assert_eq!(rage, 1);
    }

    #[test]
    fn test_sequences_strictly_increase_across_detectors() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();

        for i in 0..4 {
            monitor.handle(&click(
                ElementInfo {
                    tag: "div".to_string(),
                    ..Default::default()
                },
                start + Duration::seconds(i * 2),
            ));
        }

        let sequences: Vec<i64> = sink
            .events()
            .iter()
            .map(|e| match e.attr("session.sequence") {
                Some(AttrValue::Int(n)) => *n,
                other => panic!("unexpected sequence attr: {other:?}"),
            })
            .collect();
        let mut sorted = sequences.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sequences.len(), sorted.len());
        assert_eq!(sequences, sorted);
    }

    #[test]
    fn test_thrashing_routed() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();
        let positions = [0.0, 400.0, 100.0, 500.0, 200.0];

        for (i, position) in positions.iter().enumerate() {
            monitor.handle(&InteractionEvent {
                scroll: Some(ScrollSample {
                    position: *position,
                    document_height: 4_000.0,
                    viewport_height: 1_000.0,
                }),
                ..empty_event(
                    InteractionEventType::Scroll,
                    start + Duration::milliseconds(i as i64 * 100),
                )
            });
        }

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "frustration.thrashing");
    }

    #[test]
    fn test_form_flow() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();
        let email = FieldInfo {
            name: Some("email".to_string()),
            id: None,
            tag: "input".to_string(),
        };

        monitor.handle(&InteractionEvent {
            field: Some(email.clone()),
            ..empty_event(InteractionEventType::FieldFocus, start)
        });
        monitor.handle(&InteractionEvent {
            field: Some(email),
            ..empty_event(
                InteractionEventType::FieldBlur,
                start + Duration::milliseconds(15_000),
            )
        });
        monitor.handle(&InteractionEvent {
            form: Some(crate::types::FormPayload {
                form: "signup".to_string(),
                success: Some(true),
                error_message: None,
            }),
            ..empty_event(InteractionEventType::FormSubmit, start + Duration::seconds(20))
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "frustration.form_hesitation");
        assert_eq!(events[0].attr("form.hesitation"), Some(&AttrValue::Bool(true)));
        assert_eq!(events[1].name, "form.submit");
        assert_eq!(events[1].attr("form.total_time_ms"), Some(&AttrValue::Int(15_000)));
        assert_eq!(events[1].attr("form.field_count"), Some(&AttrValue::Int(1)));
    }

    #[test]
    fn test_quick_blur_emits_plain_field_event() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();
        let email = FieldInfo {
            name: Some("email".to_string()),
            id: None,
            tag: "input".to_string(),
        };

        monitor.handle(&InteractionEvent {
            field: Some(email.clone()),
            ..empty_event(InteractionEventType::FieldFocus, start)
        });
        monitor.handle(&InteractionEvent {
            field: Some(email),
            ..empty_event(
                InteractionEventType::FieldBlur,
                start + Duration::milliseconds(3_000),
            )
        });

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "form.field_blur");
        assert_eq!(events[0].attr("form.hesitation"), Some(&AttrValue::Bool(false)));
    }

    #[test]
    fn test_navigation_updates_page_context() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();

        monitor.handle(&InteractionEvent {
            navigation: Some(NavigationPayload {
                url: "https://example.com/".to_string(),
                title: Some("Home".to_string()),
            }),
            ..empty_event(InteractionEventType::Navigation, start)
        });
        monitor.handle(&click(button("buy"), start + Duration::seconds(1)));
        monitor.handle(&click(button("buy"), start + Duration::seconds(1)));
        monitor.handle(&click(button("buy"), start + Duration::seconds(1)));

        let events = sink.events();
        assert_eq!(events[0].name, "navigation.change");
        // Subsequent frustration events are stamped with the new page
        let rage = events.iter().find(|e| e.name == "frustration.rage_click").unwrap();
        assert_eq!(
            rage.attr("page.url"),
            Some(&AttrValue::String("https://example.com/".to_string()))
        );
        assert_eq!(
            rage.attr("page.title"),
            Some(&AttrValue::String("Home".to_string()))
        );
    }

    #[test]
    fn test_error_capture_enriched() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();

        monitor.handle(&InteractionEvent {
            navigation: Some(NavigationPayload {
                url: "https://example.com/".to_string(),
                title: None,
            }),
            ..empty_event(InteractionEventType::Navigation, start)
        });
        monitor.handle(&click(button("buy"), start + Duration::seconds(2)));
        monitor.handle(&InteractionEvent {
            error: Some(crate::types::ErrorPayload {
                message: "boom".to_string(),
                stack: None,
                error_type: Some("TypeError".to_string()),
            }),
            ..empty_event(InteractionEventType::Error, start + Duration::seconds(5))
        });

        let events = sink.events();
        let error = events.iter().find(|e| e.name == "page.error").unwrap();
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(
            error.attr("interaction.last_clicked_target"),
            Some(&AttrValue::String("Submit".to_string()))
        );
        assert_eq!(error.attr("page.time_on_page_ms"), Some(&AttrValue::Int(5_000)));
    }

    #[test]
    fn test_identify_user_stamps_following_events() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();

        monitor.handle(&InteractionEvent {
            user: Some(UserIdentity {
                id: "u-9".to_string(),
                email: None,
                name: None,
            }),
            ..empty_event(InteractionEventType::IdentifyUser, start)
        });

        let events = sink.events();
        assert_eq!(events[0].name, "session.identify");
        assert_eq!(
            events[0].attr("user.id"),
            Some(&AttrValue::String("u-9".to_string()))
        );
    }

    #[test]
    fn test_disabled_detector_emits_nothing() {
        let (mut monitor, sink) = monitor_with_sink();
        monitor.rage_click_mut().disable();
        monitor.dead_click_mut().disable();

        let start = t0();
        for i in 0..5 {
            monitor.handle(&click(
                ElementInfo {
                    tag: "div".to_string(),
                    ..Default::default()
                },
                start + Duration::milliseconds(i * 50),
            ));
        }
        assert!(sink.is_empty());

        // Re-enable is idempotent and restores emission
        monitor.dead_click_mut().enable();
        monitor.dead_click_mut().enable();
        monitor.handle(&click(
            ElementInfo {
                tag: "div".to_string(),
                ..Default::default()
            },
            start + Duration::seconds(5),
        ));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_missing_payload_is_noop() {
        let (mut monitor, sink) = monitor_with_sink();
        monitor.handle(&empty_event(InteractionEventType::Click, t0()));
        monitor.handle(&empty_event(InteractionEventType::Scroll, t0()));
        monitor.handle(&empty_event(InteractionEventType::FieldBlur, t0()));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_one_shot_replay() {
        let json = r#"[
            { "timestamp": "2024-01-15T14:00:00.000Z", "event_type": "navigation",
              "navigation": { "url": "https://example.com/", "title": "Home" } },
            { "timestamp": "2024-01-15T14:00:01.000Z", "event_type": "click",
              "target": { "tag": "button", "id": "buy", "text": "Buy" } },
            { "timestamp": "2024-01-15T14:00:01.080Z", "event_type": "click",
              "target": { "tag": "button", "id": "buy", "text": "Buy" } },
            { "timestamp": "2024-01-15T14:00:01.160Z", "event_type": "click",
              "target": { "tag": "button", "id": "buy", "text": "Buy" } }
        ]"#;

        let output = events_to_telemetry(json).unwrap();
        let emitted: Vec<crate::types::EmittedEvent> = serde_json::from_str(&output).unwrap();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].name, "navigation.change");
        assert_eq!(emitted[1].name, "frustration.rage_click");
        // The replay clock follows event timestamps
        assert_eq!(
            emitted[1].attr("session.duration_ms"),
            Some(&AttrValue::Int(1_160))
        );
    }

    #[test]
    fn test_ndjson_parsing() {
        let input = "\n{ \"timestamp\": \"2024-01-15T14:00:00Z\", \"event_type\": \"scroll\", \"scroll\": { \"position\": 0.0, \"document_height\": 2000.0, \"viewport_height\": 800.0 } }\n\n";
        let events = parse_events_ndjson(input).unwrap();
        assert_eq!(events.len(), 1);

        let err = parse_events_ndjson("not json").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_invalid_json_replay() {
        assert!(events_to_telemetry("not valid json").is_err());
    }

    #[test]
    fn test_all_emitted_scores_in_range() {
        let (mut monitor, sink) = monitor_with_sink();
        let start = t0();

        // Mix of bursts across detectors
        for i in 0..12 {
            monitor.handle(&click(
                ElementInfo {
                    tag: "div".to_string(),
                    ..Default::default()
                },
                start + Duration::milliseconds(i * 40),
            ));
        }
        let positions = [0.0, 400.0, 100.0, 500.0, 200.0, 600.0, 100.0];
        for (i, position) in positions.iter().enumerate() {
            monitor.handle(&InteractionEvent {
                scroll: Some(ScrollSample {
                    position: *position,
                    document_height: 4_000.0,
                    viewport_height: 1_000.0,
                }),
                ..empty_event(
                    InteractionEventType::Scroll,
                    start + Duration::milliseconds(i as i64 * 60),
                )
            });
        }

        for event in sink.events() {
            if let Some(AttrValue::Float(score)) = event.attr("frustration.score") {
                assert!((0.0..=1.0).contains(score), "score out of range: {score}");
            }
        }
        assert!(!sink.is_empty());
    }
}
