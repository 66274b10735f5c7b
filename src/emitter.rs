//! Event emission
//!
//! Stamps every named event with session, user, and page context and forwards
//! it to the exporter collaborator. Emission is fire-and-forget: the sink
//! delivers asynchronously and best-effort, and the core never waits for
//! delivery confirmation.

use crate::session::SessionContext;
use crate::types::{AttrValue, EmittedEvent, FrustrationSignal, Severity, SignalMetrics};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Score at or above which a frustration event is emitted at `warn`
/// severity instead of `info`.
pub const WARN_SCORE_THRESHOLD: f64 = 0.7;

/// Exporter collaborator: accepts one event record at a time.
///
/// Implementations deliver asynchronously and best-effort; they may drop
/// events after shutdown and must never block the caller.
pub trait EventSink {
    fn export(&self, event: EmittedEvent);
}

/// In-memory sink that retains every exported event, for tests and replay.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: RefCell<Vec<EmittedEvent>>,
}

impl CollectingSink {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Snapshot of every event exported so far.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.borrow().clone()
    }

    /// Number of events exported so far.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drain the collected events.
    pub fn take(&self) -> Vec<EmittedEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl EventSink for CollectingSink {
    fn export(&self, event: EmittedEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Current page context stamped onto every event. Updated by the
/// navigation tracker as the page changes.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub url: String,
    pub title: String,
}

/// Stamps events with session/user/page context and hands them to the sink.
pub struct EventEmitter {
    session: SessionContext,
    sink: Rc<dyn EventSink>,
    page: PageContext,
}

impl EventEmitter {
    pub fn new(session: SessionContext, sink: Rc<dyn EventSink>) -> Self {
        Self {
            session,
            sink,
            page: PageContext::default(),
        }
    }

    /// Mutable access to the session (user identity, reset).
    pub fn session_mut(&mut self) -> &mut SessionContext {
        &mut self.session
    }

    /// Update the stamped page context.
    pub fn set_page(&mut self, url: String, title: String) {
        self.page = PageContext { url, title };
    }

    /// Current page context.
    pub fn page(&self) -> &PageContext {
        &self.page
    }

    /// Stamp and export a named event.
    ///
    /// The session/user/page attributes are written last, so callers cannot
    /// accidentally shadow the guaranteed context keys.
    pub fn emit(
        &mut self,
        name: &str,
        severity: Severity,
        mut attributes: BTreeMap<String, AttrValue>,
    ) {
        attributes.insert("session.id".to_string(), self.session.session_id().into());
        attributes.insert(
            "session.sequence".to_string(),
            self.session.next_sequence().into(),
        );
        attributes.insert(
            "session.duration_ms".to_string(),
            self.session.session_duration_ms().into(),
        );
        attributes.insert("page.url".to_string(), self.page.url.clone().into());
        attributes.insert("page.title".to_string(), self.page.title.clone().into());

        if let Some(user) = self.session.user() {
            attributes.insert("user.id".to_string(), user.id.into());
            if let Some(email) = user.email {
                attributes.insert("user.email".to_string(), email.into());
            }
            if let Some(name) = user.name {
                attributes.insert("user.name".to_string(), name.into());
            }
        }

        log::trace!("emit {name}");
        self.sink.export(EmittedEvent {
            name: name.to_string(),
            severity,
            attributes,
        });
    }

    /// Convert a frustration signal to a named event and export it.
    pub fn emit_signal(&mut self, signal: &FrustrationSignal) {
        let mut attributes: BTreeMap<String, AttrValue> = BTreeMap::new();
        attributes.insert(
            "frustration.type".to_string(),
            signal.signal_type.as_str().into(),
        );
        attributes.insert("frustration.score".to_string(), signal.score.into());

        if let Some(name) = &signal.target_name {
            attributes.insert("target.name".to_string(), name.clone().into());
        }
        if let Some(key) = &signal.target_key {
            attributes.insert("target.key".to_string(), key.clone().into());
        }
        if let Some(reason) = signal.reason {
            attributes.insert("frustration.reason".to_string(), reason.as_str().into());
        }

        match &signal.metrics {
            SignalMetrics::RageClick {
                click_count,
                duration_ms,
            } => {
                attributes.insert("frustration.click_count".to_string(), (*click_count).into());
                attributes.insert("frustration.duration_ms".to_string(), (*duration_ms).into());
            }
            SignalMetrics::DeadClick { looks_clickable } => {
                attributes.insert(
                    "frustration.looks_clickable".to_string(),
                    (*looks_clickable).into(),
                );
            }
            SignalMetrics::Thrashing {
                direction_changes,
                duration_ms,
                scroll_distance,
                scroll_depth_pct,
            } => {
                attributes.insert(
                    "frustration.direction_changes".to_string(),
                    (*direction_changes).into(),
                );
                attributes.insert("frustration.duration_ms".to_string(), (*duration_ms).into());
                attributes.insert(
                    "frustration.scroll_distance".to_string(),
                    (*scroll_distance).into(),
                );
                attributes.insert(
                    "frustration.scroll_depth_pct".to_string(),
                    (*scroll_depth_pct).into(),
                );
            }
            SignalMetrics::FormField {
                field,
                time_spent_ms,
                interaction_count,
                hesitation,
            } => {
                attributes.insert("form.field".to_string(), field.clone().into());
                attributes.insert("form.time_spent_ms".to_string(), (*time_spent_ms).into());
                attributes.insert(
                    "form.interaction_count".to_string(),
                    (*interaction_count).into(),
                );
                attributes.insert("form.hesitation".to_string(), (*hesitation).into());
            }
        }

        let severity = if signal.score >= WARN_SCORE_THRESHOLD {
            Severity::Warn
        } else {
            Severity::Info
        };

        let name = format!("frustration.{}", signal.signal_type.as_str());
        self.emit(&name, severity, attributes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;
    use crate::types::{FrustrationType, UserIdentity};
    use chrono::Utc;

    fn emitter_with_sink() -> (EventEmitter, Rc<CollectingSink>) {
        let sink = CollectingSink::new();
        let session = SessionContext::new(Box::new(MemoryStore::new()));
        let emitter = EventEmitter::new(session, Rc::clone(&sink) as Rc<dyn EventSink>);
        (emitter, sink)
    }

    fn rage_signal(score: f64) -> FrustrationSignal {
        FrustrationSignal {
            signal_type: FrustrationType::RageClick,
            score,
            at: Utc::now(),
            target_name: Some("Buy now".to_string()),
            target_key: Some("buy-btn".to_string()),
            reason: None,
            metrics: SignalMetrics::RageClick {
                click_count: 3,
                duration_ms: 240,
            },
        }
    }

    #[test]
    fn test_emit_stamps_required_context() {
        let (mut emitter, sink) = emitter_with_sink();
        emitter.set_page("https://example.com/checkout".to_string(), "Checkout".to_string());

        emitter.emit("page.view", Severity::Info, BTreeMap::new());

        let events = sink.events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert!(event.attr("session.id").is_some());
        assert_eq!(event.attr("session.sequence"), Some(&AttrValue::Int(0)));
        assert!(event.attr("session.duration_ms").is_some());
        assert_eq!(
            event.attr("page.url"),
            Some(&AttrValue::String("https://example.com/checkout".to_string()))
        );
        assert_eq!(
            event.attr("page.title"),
            Some(&AttrValue::String("Checkout".to_string()))
        );
        // No identity set, no user attributes
        assert!(event.attr("user.id").is_none());
    }

    #[test]
    fn test_sequence_increases_across_events() {
        let (mut emitter, sink) = emitter_with_sink();

        for _ in 0..5 {
            emitter.emit("page.view", Severity::Info, BTreeMap::new());
        }

        let sequences: Vec<i64> = sink
            .events()
            .iter()
            .map(|e| match e.attr("session.sequence") {
                Some(AttrValue::Int(n)) => *n,
                other => panic!("unexpected sequence attr: {other:?}"),
            })
            .collect();
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_user_attributes_after_identify() {
        let (mut emitter, sink) = emitter_with_sink();
        emitter.session_mut().set_user(UserIdentity {
            id: "u-7".to_string(),
            email: Some("u@example.com".to_string()),
            name: None,
        });

        emitter.emit("page.view", Severity::Info, BTreeMap::new());

        let event = &sink.events()[0];
        assert_eq!(
            event.attr("user.id"),
            Some(&AttrValue::String("u-7".to_string()))
        );
        assert_eq!(
            event.attr("user.email"),
            Some(&AttrValue::String("u@example.com".to_string()))
        );
        assert!(event.attr("user.name").is_none());
    }

    #[test]
    fn test_signal_event_attributes_and_severity() {
        let (mut emitter, sink) = emitter_with_sink();

        emitter.emit_signal(&rage_signal(0.82));
        emitter.emit_signal(&rage_signal(0.4));

        let events = sink.events();
        assert_eq!(events[0].name, "frustration.rage_click");
        assert_eq!(events[0].severity, Severity::Warn);
        assert_eq!(events[1].severity, Severity::Info);
        assert_eq!(
            events[0].attr("frustration.type"),
            Some(&AttrValue::String("rage_click".to_string()))
        );
        assert_eq!(
            events[0].attr("frustration.click_count"),
            Some(&AttrValue::Int(3))
        );
        assert_eq!(
            events[0].attr("target.name"),
            Some(&AttrValue::String("Buy now".to_string()))
        );
    }

    #[test]
    fn test_caller_attributes_cannot_shadow_context() {
        let (mut emitter, sink) = emitter_with_sink();

        let mut attrs: BTreeMap<String, AttrValue> = BTreeMap::new();
        attrs.insert("session.id".to_string(), "spoofed".into());
        emitter.emit("page.view", Severity::Info, attrs);

        let event = &sink.events()[0];
        assert_ne!(
            event.attr("session.id"),
            Some(&AttrValue::String("spoofed".to_string()))
        );
    }
}
