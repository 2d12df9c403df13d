use harita::inspect::PropertyValue;

use super::*;

fn branch(id: u64) -> Feature {
    Feature::new("source-0", "branches", "Point")
        .with_id(FeatureId::Number(id))
        .with_property("name", PropertyValue::String(format!("branch {id}")))
}

fn basemap() -> Feature {
    Feature::new("openmaptiles", "water", "Polygon").with_id(FeatureId::Number(99))
}

const SOURCES: [&str; 1] = ["source-0"];

#[test]
fn query_box_uses_two_pixel_radius() {
    assert_eq!(query_box(10.0, 20.0), [[8.0, 18.0], [12.0, 22.0]]);
}

#[test]
fn move_over_features_opens_popup_and_sets_hover() {
    let mut state = InspectorState::default();
    let change = state.pointer_moved(5.0, 6.0, vec![branch(1), basemap()], &SOURCES);

    let popup = state.popup.clone().unwrap();
    assert_eq!((popup.x, popup.y), (5.0, 6.0));
    assert_eq!(popup.tables.len(), 1);
    assert_eq!(popup.tables[0].source_layer, "branches");
    assert_eq!(change.set.len(), 1);
    assert!(change.clear.is_empty());
}

#[test]
fn moving_off_features_closes_popup_and_clears_hover() {
    let mut state = InspectorState::default();
    state.pointer_moved(0.0, 0.0, vec![branch(1)], &SOURCES);
    let change = state.pointer_moved(1.0, 1.0, vec![basemap()], &SOURCES);

    assert!(state.popup.is_none());
    assert_eq!(change.clear, [FeatureKey::of(&branch(1)).unwrap()]);
    assert!(state.reset().is_empty());
}

#[test]
fn staying_on_same_feature_changes_nothing() {
    let mut state = InspectorState::default();
    state.pointer_moved(0.0, 0.0, vec![branch(1)], &SOURCES);
    let change = state.pointer_moved(1.0, 0.0, vec![branch(1)], &SOURCES);
    assert!(change.is_empty());
    assert_eq!(state.popup.as_ref().map(|p| p.x), Some(1.0));
}

#[test]
fn frozen_popup_ignores_moves_until_next_click() {
    let mut state = InspectorState::default();
    state.pointer_moved(0.0, 0.0, vec![branch(1)], &SOURCES);
    assert!(state.clicked());

    let change = state.pointer_moved(50.0, 50.0, vec![branch(2)], &SOURCES);
    assert!(change.is_empty());
    assert_eq!(state.popup.as_ref().map(|p| p.x), Some(0.0));

    assert!(!state.clicked());
    state.pointer_moved(50.0, 50.0, vec![branch(2)], &SOURCES);
    assert_eq!(state.popup.as_ref().map(|p| p.x), Some(50.0));
}

#[test]
fn features_without_ids_show_but_do_not_highlight() {
    let mut state = InspectorState::default();
    let change = state.pointer_moved(0.0, 0.0, vec![Feature::new("source-0", "roads", "LineString")], &SOURCES);
    assert!(state.popup.is_some());
    assert!(change.set.is_empty());
}

#[test]
fn reset_clears_everything() {
    let mut state = InspectorState::default();
    state.pointer_moved(0.0, 0.0, vec![branch(1), branch(2)], &SOURCES);
    state.clicked();
    let change = state.reset();
    assert_eq!(change.clear.len(), 2);
    assert!(!state.frozen);
    assert!(state.popup.is_none());
}
