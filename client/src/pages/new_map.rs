//! Map creation wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Collects the map details and files, then runs the creation workflow
//! (create map, register and upload each file, assemble) against the
//! browser backend. Progress replaces the form while the run is active; a
//! failed run keeps the form contents for another attempt.

use harita::workflow::create_map;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::backend::BrowserBackend;
use crate::net::storage::FilePayload;
use crate::state::wizard::{WizardPhase, WizardState};
use crate::util::cancel::CancelToken;
use crate::util::session::use_session;

/// File types accepted by the picker.
const ACCEPTED_FILES: &str = ".geojson,.json,.pmtiles";

#[component]
pub fn NewMapPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();
    let session = use_session(|| {}, {
        let navigate = navigate.clone();
        move || navigate("/", NavigateOptions::default())
    });
    let wizard = RwSignal::new(WizardState::default());
    let files = StoredValue::new_local(Vec::<FilePayload>::new());
    let phase = Memo::new(move |_| wizard.with(|w| w.phase.clone()));
    let cancel = CancelToken::scoped();

    let on_files = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let picked: Vec<web_sys::File> = input
                .files()
                .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
                .unwrap_or_default();
            wizard.update(|w| w.set_files(picked.iter().map(web_sys::File::name)));
            files.set_value(picked);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, files);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !wizard.with_untracked(WizardState::can_submit) {
            return;
        }
        let draft = wizard.with_untracked(WizardState::submitted_draft);
        let uploads = files.with_value(|f| wizard.with_untracked(|w| w.uploads(f.iter().cloned())));
        let backend = BrowserBackend {
            api: ApiClient::for_session(config.api_url.clone(), &session.get_untracked()),
            config: config.clone(),
        };
        let cancel = cancel.clone();
        spawn_local(async move {
            let progress = |step: &harita::workflow::Step| {
                cancel.guard(|| wizard.update(|w| w.progress(step)));
            };
            let result = create_map(&backend, &draft, &uploads, progress).await;
            cancel.guard(|| {
                wizard.update(|w| match result {
                    Ok(id) => w.finish(id),
                    Err(e) => w.fail(&e),
                });
            });
        });
    };

    Effect::new(move || {
        if let WizardPhase::Done(id) = phase.get() {
            navigate(&format!("/viewMap/{id}"), NavigateOptions::default());
        }
    });

    let on_back = Callback::new(move |()| wizard.update(WizardState::back_to_form));

    view! {
        <div class="page new-map">
            <h1>"Create a new map"</h1>
            <Show when=move || phase.get() == WizardPhase::Editing fallback=move || view! { <RunStatus phase=phase on_back=on_back /> }>
                <form class="wizard" on:submit=on_submit.clone()>
                    <label class="wizard__field">
                        "Name"
                        <input
                            type="text"
                            required=true
                            prop:value=move || wizard.with(|w| w.draft.name.clone())
                            on:input=move |ev| wizard.update(|w| w.draft.name = event_target_value(&ev))
                        />
                    </label>
                    <label class="wizard__field">
                        "Description"
                        <textarea
                            prop:value=move || wizard.with(|w| w.draft.description.clone())
                            on:input=move |ev| wizard.update(|w| w.draft.description = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label class="wizard__check">
                        <input
                            type="checkbox"
                            prop:checked=move || wizard.with(|w| w.draft.public)
                            on:change=move |ev| wizard.update(|w| w.draft.public = event_target_checked(&ev))
                        />
                        "Make it shareable with the public?"
                    </label>
                    <label class="wizard__field">
                        "Upload your file (GeoJSON or PMTiles accepted)"
                        <input type="file" multiple=true accept=ACCEPTED_FILES on:change=on_files />
                    </label>
                    <ul class="wizard__sources">
                        {move || {
                            wizard
                                .with(|w| w.sources.clone())
                                .into_iter()
                                .enumerate()
                                .map(|(index, entry)| {
                                    view! {
                                        <li class="wizard__source">
                                            <span class="wizard__source-name">{entry.name.clone()}</span>
                                            <span class="wizard__source-format">{entry.format().as_str()}</span>
                                            <input
                                                type="color"
                                                prop:value=entry.color.as_str().to_owned()
                                                on:input=move |ev| wizard.update(|w| w.set_color(index, &event_target_value(&ev)))
                                            />
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <button class="btn btn--primary" type="submit" disabled=move || !wizard.with(WizardState::can_submit)>
                        "Create"
                    </button>
                </form>
            </Show>
        </div>
    }
}

/// Progress heading while running, or the failed step with a way back.
#[component]
fn RunStatus(phase: Memo<WizardPhase>, on_back: Callback<()>) -> impl IntoView {
    move || match phase.get() {
        WizardPhase::Running(text) => view! {
            <div class="wizard__progress">
                <div class="spinner" role="status"></div>
                <h2>{text}</h2>
            </div>
        }
        .into_any(),
        WizardPhase::Failed { step, message } => view! {
            <div class="wizard__failure">
                <h2>{format!("{step} failed")}</h2>
                <p class="error">{message}</p>
                <button class="btn" on:click=move |_| on_back.run(())>
                    "Back"
                </button>
            </div>
        }
        .into_any(),
        WizardPhase::Done(_) => view! { <h2>"Map created"</h2> }.into_any(),
        WizardPhase::Editing => ().into_any(),
    }
}
