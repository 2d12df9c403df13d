//! Page hook over the shared identity session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app::App` provides one [`SessionHub`]; `net::auth` publishes into it.
//! Pages call [`use_session`] to read the state reactively and to run their
//! redirect on login/logout edges. The hub subscription lives exactly as
//! long as the calling component.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use harita::session::{SessionHub, SessionState, SessionTracker, Transition};
use leptos::prelude::*;

/// Current session as a signal; fires `on_login`/`on_logout` once per
/// transition into that state and never while the state is unknown.
pub fn use_session<L, O>(on_login: L, on_logout: O) -> Signal<SessionState>
where
    L: Fn() + 'static,
    O: Fn() + 'static,
{
    let state = follow_hub(&expect_context::<SessionHub>());

    let mut tracker = SessionTracker::default();
    Effect::new(move || dispatch(&mut tracker, &state.get(), &on_login, &on_logout));

    state.into()
}

/// Mirror `hub` into a signal until the current owner is cleaned up.
fn follow_hub(hub: &SessionHub) -> RwSignal<SessionState> {
    let state = RwSignal::new(hub.current());
    let subscription = hub.subscribe(move |next| {
        state.try_set(next.clone());
    });
    on_cleanup(move || subscription.unsubscribe());
    state
}

fn dispatch(tracker: &mut SessionTracker, state: &SessionState, on_login: &impl Fn(), on_logout: &impl Fn()) {
    match tracker.observe(state) {
        Some(Transition::LoggedIn) => on_login(),
        Some(Transition::LoggedOut) => on_logout(),
        None => {}
    }
}
