use harita::api::ApiError;

use super::*;

#[test]
fn picked_files_default_to_white() {
    let mut state = WizardState::default();
    state.set_files(["shops.geojson", "roads.pmtiles"]);
    assert_eq!(state.sources.len(), 2);
    assert!(state.sources.iter().all(|s| s.color.as_str() == "#ffffff"));
    assert_eq!(state.sources[1].format(), SourceFormat::PmTiles);
}

#[test]
fn new_pick_replaces_previous_files() {
    let mut state = WizardState::default();
    state.set_files(["a.geojson"]);
    state.set_color(0, "#123456");
    state.set_files(["b.geojson"]);
    assert_eq!(state.sources, [SourceEntry { name: "b.geojson".to_owned(), color: Color::default() }]);
}

#[test]
fn set_color_normalizes_and_ignores_garbage() {
    let mut state = WizardState::default();
    state.set_files(["a.geojson"]);
    state.set_color(0, "#ABC");
    assert_eq!(state.sources[0].color.as_str(), "#aabbcc");
    state.set_color(0, "teal");
    assert_eq!(state.sources[0].color.as_str(), "#aabbcc");
    state.set_color(7, "#000000");
}

#[test]
fn blank_name_cannot_submit() {
    let mut state = WizardState::default();
    assert!(!state.can_submit());
    state.draft.name = "  Parks ".to_owned();
    assert!(state.can_submit());
    assert_eq!(state.submitted_draft().name, "Parks");
}

#[test]
fn progress_then_failure_then_back() {
    let mut state = WizardState::default();
    state.draft.name = "Parks".to_owned();
    state.progress(&Step::Upload("a.geojson".to_owned()));
    assert_eq!(state.phase, WizardPhase::Running("Uploading a.geojson".to_owned()));
    assert!(!state.can_submit());

    state.fail(&WorkflowError {
        step: Step::Upload("a.geojson".to_owned()),
        source: ApiError::Network("offline".to_owned()),
    });
    let WizardPhase::Failed { step, message } = &state.phase else {
        panic!("expected failure, got {:?}", state.phase);
    };
    assert_eq!(step, "Uploading a.geojson");
    assert!(message.starts_with("Load failure"));

    state.back_to_form();
    assert_eq!(state.phase, WizardPhase::Editing);
    assert_eq!(state.draft.name, "Parks");
}

#[test]
fn uploads_pair_entries_with_payloads_in_order() {
    let mut state = WizardState::default();
    state.set_files(["a.geojson", "b.pmtiles"]);
    state.set_color(1, "#ff0000");
    let uploads = state.uploads([10_u8, 20]);
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[1].name, "b.pmtiles");
    assert_eq!(uploads[1].payload, 20);
    assert_eq!(uploads[1].color.as_str(), "#ff0000");
}
