//! Session context and persistence
//!
//! Owns the session identifier, the monotonic event sequence counter, the
//! session start time, and an optional caller-supplied user identity. The
//! session survives reloads within one browsing context through an injected
//! storage collaborator; storage failures never surface, the in-memory
//! session stays authoritative for the rest of the page lifetime.

use crate::error::StorageError;
use crate::host::{Clock, SystemClock};
use crate::types::UserIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

/// Storage collaborator for the persisted session record.
///
/// Implementations own the fixed storage key and the browsing-context
/// scoping; the engine only hands them the serialized record.
pub trait SessionStore {
    /// Load the previously persisted record, if any.
    fn load(&self) -> Option<String>;
    /// Persist the record. Failures (quota, disabled storage) are reported
    /// but the caller swallows them.
    fn save(&self, record: &str) -> Result<(), StorageError>;
    /// Remove the persisted record.
    fn clear(&self);
}

/// In-memory session store for tests, replay, and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RefCell<Option<String>>,
    fail_saves: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing record.
    pub fn with_record(record: &str) -> Self {
        Self {
            record: RefCell::new(Some(record.to_string())),
            fail_saves: Cell::new(false),
        }
    }

    /// Make subsequent saves fail, simulating quota/disabled storage.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Current persisted record, if any.
    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.record.borrow().clone()
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        if self.fail_saves.get() {
            return Err(StorageError("simulated quota exceeded".to_string()));
        }
        *self.record.borrow_mut() = Some(record.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.record.borrow_mut() = None;
    }
}

/// Persisted session record shape.
///
/// A record that fails to parse, or parses with an empty id, is treated as
/// "no session" and silently regenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub sequence: u64,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Live session state.
#[derive(Debug, Clone)]
struct SessionState {
    id: String,
    sequence: u64,
    started_at: DateTime<Utc>,
    user: Option<UserIdentity>,
}

impl SessionState {
    fn to_record(&self) -> SessionRecord {
        SessionRecord {
            id: self.id.clone(),
            sequence: self.sequence,
            started_at: self.started_at,
            user_id: self.user.as_ref().map(|u| u.id.clone()),
            user_email: self.user.as_ref().and_then(|u| u.email.clone()),
            user_name: self.user.as_ref().and_then(|u| u.name.clone()),
        }
    }

    fn from_record(record: SessionRecord) -> Self {
        let user = record.user_id.map(|id| UserIdentity {
            id,
            email: record.user_email,
            name: record.user_name,
        });
        Self {
            id: record.id,
            sequence: record.sequence,
            started_at: record.started_at,
            user,
        }
    }
}

/// Session identity, sequencing, and user attribution.
///
/// Constructed once and passed by reference to everything that needs session
/// identity or sequencing. The session is lazily created on first access:
/// a structurally valid persisted record is resumed, anything else is
/// replaced with a fresh UUID starting at sequence 0.
pub struct SessionContext {
    store: Box<dyn SessionStore>,
    clock: Box<dyn Clock>,
    session: Option<SessionState>,
}

impl SessionContext {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: Box<dyn SessionStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            session: None,
        }
    }

    /// Session identifier; immutable for the session's lifetime.
    pub fn session_id(&mut self) -> String {
        self.ensure_session().id.clone()
    }

    /// Return the current sequence value, then increment it.
    ///
    /// Within one session the returned values form a strictly increasing,
    /// gap-free-by-call-order sequence starting at 0.
    pub fn next_sequence(&mut self) -> u64 {
        let current = {
            let session = self.ensure_session();
            let current = session.sequence;
            session.sequence += 1;
            current
        };
        self.persist();
        current
    }

    /// Milliseconds since the session started.
    pub fn session_duration_ms(&mut self) -> i64 {
        let now = self.clock.now();
        let started = self.ensure_session().started_at;
        (now - started).num_milliseconds().max(0)
    }

    /// Session start time.
    pub fn started_at(&mut self) -> DateTime<Utc> {
        self.ensure_session().started_at
    }

    /// Attach a user identity to the session.
    pub fn set_user(&mut self, user: UserIdentity) {
        self.ensure_session().user = Some(user);
        self.persist();
    }

    /// Detach the user identity.
    pub fn clear_user(&mut self) {
        self.ensure_session().user = None;
        self.persist();
    }

    /// Currently attached user identity, if any.
    pub fn user(&mut self) -> Option<UserIdentity> {
        self.ensure_session().user.clone()
    }

    /// Discard the current session and start a fresh one (explicit identity
    /// boundary, e.g. logout).
    pub fn reset_session(&mut self) {
        let now = self.clock.now();
        self.session = Some(Self::fresh_session(now));
        self.persist();
    }

    fn ensure_session(&mut self) -> &mut SessionState {
        if self.session.is_none() {
            let loaded = self.store.load().and_then(|json| {
                match serde_json::from_str::<SessionRecord>(&json) {
                    Ok(record) if !record.id.is_empty() => {
                        Some(SessionState::from_record(record))
                    }
                    Ok(_) => {
                        log::debug!("persisted session record has empty id, regenerating");
                        None
                    }
                    Err(e) => {
                        log::debug!("persisted session record is malformed ({e}), regenerating");
                        None
                    }
                }
            });

            let state = loaded.unwrap_or_else(|| Self::fresh_session(self.clock.now()));
            self.session = Some(state);
            self.persist();
        }
        self.session.as_mut().expect("session just ensured")
    }

    fn fresh_session(now: DateTime<Utc>) -> SessionState {
        SessionState {
            id: Uuid::new_v4().to_string(),
            sequence: 0,
            started_at: now,
            user: None,
        }
    }

    fn persist(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let record = session.to_record();
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.store.save(&json) {
                    log::debug!("session persistence failed, staying in-memory: {e}");
                }
            }
            Err(e) => {
                log::debug!("session record serialization failed: {e}");
            }
        }
    }
}
