//! Identity-session state shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider reports raw snapshots: "not resolved yet", "no
//! session", or "a session". [`SessionState`] names those three states,
//! [`SessionTracker`] turns a stream of them into login/logout transitions,
//! and [`SessionHub`] is the process-wide cache and change feed pages
//! subscribe to.
//!
//! DESIGN
//! ======
//! Transitions fire on phase changes only. A refreshed token while already
//! authenticated is a new snapshot but not a new login, and a page that
//! re-reads an unchanged state never re-navigates.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};

/// Tokens issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            user_email: None,
        }
    }

    /// `true` once `now` (Unix seconds) has passed the expiry, if one is known.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The provider has not answered yet.
    #[default]
    Unknown,
    Authenticated(Session),
    Unauthenticated,
}

impl SessionState {
    /// Map a raw provider snapshot: outer `None` = unresolved, inner `None` =
    /// explicitly signed out.
    #[must_use]
    pub fn from_raw(raw: Option<Option<Session>>) -> Self {
        match raw {
            None => Self::Unknown,
            Some(None) => Self::Unauthenticated,
            Some(Some(session)) => Self::Authenticated(session),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session().map(|s| s.access_token.as_str())
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Login/logout edge produced by [`SessionTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    LoggedIn,
    LoggedOut,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Edge detector over a sequence of session states.
#[derive(Clone, Debug, Default)]
pub struct SessionTracker {
    last: Phase,
}

impl SessionTracker {
    /// Feed the latest state; returns the transition it causes, if any.
    ///
    /// `Unknown` never fires and does not reset the last resolved phase.
    pub fn observe(&mut self, state: &SessionState) -> Option<Transition> {
        let (phase, transition) = match state {
            SessionState::Unknown => return None,
            SessionState::Authenticated(_) => (Phase::Authenticated, Transition::LoggedIn),
            SessionState::Unauthenticated => (Phase::Unauthenticated, Transition::LoggedOut),
        };
        if phase == self.last {
            return None;
        }
        self.last = phase;
        Some(transition)
    }
}

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct HubInner {
    current: SessionState,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Process-wide session cache with change notifications.
///
/// Cloning shares the same cache. Listeners are held until their
/// [`Subscription`] is dropped.
#[derive(Clone)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("SessionHub")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

fn lock(inner: &Mutex<HubInner>) -> MutexGuard<'_, HubInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionHub {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                current: SessionState::Unknown,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn current(&self) -> SessionState {
        lock(&self.inner).current.clone()
    }

    /// Record a resolved snapshot and notify every listener.
    pub fn publish(&self, session: Option<Session>) {
        let state = SessionState::from_raw(Some(session));
        let listeners: Vec<Listener> = {
            let mut inner = lock(&self.inner);
            inner.current = state.clone();
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        // Called outside the lock so listeners may re-enter the hub.
        for listener in listeners {
            listener(&state);
        }
    }

    /// Register `listener` for future snapshots.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription { id, hub: Arc::downgrade(&self.inner) }
    }
}

/// Scoped registration on a [`SessionHub`]; unsubscribes on drop.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            lock(&inner).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
