use super::*;

fn summary(id: &str) -> MapSummary {
    MapSummary {
        id: id.to_owned(),
        name: format!("Map {id}"),
        description: String::new(),
    }
}

#[test]
fn starts_loading() {
    let state = MapsState::default();
    assert!(state.is_loading());
    assert!(!state.is_empty());
}

#[test]
fn empty_list_is_not_loading() {
    let mut state = MapsState::default();
    state.loaded(Vec::new());
    assert!(!state.is_loading());
    assert!(state.is_empty());
}

#[test]
fn failure_stops_loading_with_message() {
    let mut state = MapsState::default();
    state.failed(&ApiError::Server(503));
    assert!(!state.is_loading());
    assert!(state.error.as_deref().unwrap().contains("503"));
}

#[test]
fn delete_removes_entry_only_after_success() {
    let mut state = MapsState::default();
    state.loaded(vec![summary("a"), summary("b")]);

    assert!(state.begin_delete("a"));
    assert!(!state.begin_delete("a"));
    assert_eq!(state.items.as_ref().unwrap().len(), 2);

    state.delete_succeeded("a");
    let ids: Vec<&str> = state.items.as_ref().unwrap().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["b"]);
    assert!(!state.is_deleting("a"));
}

#[test]
fn failed_delete_keeps_entry() {
    let mut state = MapsState::default();
    state.loaded(vec![summary("a")]);
    state.begin_delete("a");
    state.delete_failed("a", &ApiError::Forbidden);

    assert_eq!(state.items.as_ref().unwrap().len(), 1);
    assert!(!state.is_deleting("a"));
    assert_eq!(state.error.as_deref(), Some("Could not delete map: Map not public"));
}
