use std::cell::Cell;

use harita::session::Session;

use super::*;

#[test]
fn signal_follows_hub_until_owner_cleanup() {
    let owner = Owner::new();
    owner.set();
    let hub = SessionHub::new();
    let state = follow_hub(&hub);
    assert_eq!(state.get_untracked(), SessionState::Unknown);

    hub.publish(Some(Session::new("tok")));
    assert_eq!(state.get_untracked().access_token(), Some("tok"));
    assert!(format!("{hub:?}").contains("listeners: 1"));

    owner.cleanup();
    assert!(format!("{hub:?}").contains("listeners: 0"));
    hub.publish(None);
}

#[test]
fn callbacks_fire_once_per_transition() {
    let logins = Cell::new(0);
    let logouts = Cell::new(0);
    let on_login = || logins.set(logins.get() + 1);
    let on_logout = || logouts.set(logouts.get() + 1);

    let mut tracker = SessionTracker::default();
    for raw in [
        None,
        Some(Some(Session::new("a"))),
        Some(Some(Session::new("refreshed"))),
        None,
        Some(None),
        Some(None),
    ] {
        dispatch(&mut tracker, &SessionState::from_raw(raw), &on_login, &on_logout);
    }

    assert_eq!((logins.get(), logouts.get()), (1, 1));
}
