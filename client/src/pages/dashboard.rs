//! Dashboard page listing the signed-in user's maps.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. The list is fetched once the session is
//! known; signing out (here or in another tab) returns to `/`.

use harita::api::MapSummary;
use harita::session::{SessionHub, SessionState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::map_card::MapCard;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::state::maps::MapsState;
use crate::util::cancel::CancelToken;
use crate::util::session::use_session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let hub = expect_context::<SessionHub>();
    let navigate = use_navigate();
    let session = use_session(|| {}, move || navigate("/", NavigateOptions::default()));
    let maps = RwSignal::new(MapsState::default());
    let cancel = CancelToken::scoped();

    let api_url = config.api_url.clone();
    let list_cancel = cancel.clone();
    let mut requested = false;
    Effect::new(move || {
        let state = session.get();
        if requested || !matches!(state, SessionState::Authenticated(_)) {
            return;
        }
        requested = true;
        let api = ApiClient::for_session(api_url.clone(), &state);
        let cancel = list_cancel.clone();
        spawn_local(async move {
            let result = api.list_maps().await;
            cancel.guard(|| {
                maps.update(|m| match result {
                    Ok(items) => m.loaded(items),
                    Err(e) => m.failed(&e),
                });
            });
        });
    });

    let api_url = config.api_url.clone();
    let on_delete = Callback::new(move |id: String| {
        if !maps.try_update(|m| m.begin_delete(&id)).unwrap_or(false) {
            return;
        }
        let api = ApiClient::for_session(api_url.clone(), &session.get_untracked());
        let cancel = cancel.clone();
        spawn_local(async move {
            let result = api.delete_map(&id).await;
            cancel.guard(|| {
                maps.update(|m| match result {
                    Ok(()) => m.delete_succeeded(&id),
                    Err(e) => m.delete_failed(&id, &e),
                });
            });
        });
    });

    let on_logout = move |_| {
        let config = config.clone();
        let hub = hub.clone();
        spawn_local(async move { crate::net::auth::sign_out(&config, &hub).await });
    };

    view! {
        <div class="page dashboard">
            <header class="page__header">
                <h1>"Your Maps"</h1>
                <div class="page__actions">
                    <a class="btn btn--primary" href="/newMap">
                        "Make a new map!"
                    </a>
                    <button class="btn" on:click=on_logout>
                        "Log out?"
                    </button>
                </div>
            </header>
            <Show when=move || maps.with(|m| m.error.is_some())>
                <p class="error">{move || maps.with(|m| m.error.clone().unwrap_or_default())}</p>
            </Show>
            {move || {
                if maps.with(MapsState::is_loading) {
                    view! { <div class="spinner" role="status" aria-label="Loading"></div> }.into_any()
                } else if maps.with(MapsState::is_empty) {
                    view! { <p class="dashboard__empty">"No maps found. Create a new map!"</p> }.into_any()
                } else {
                    view! {
                        <div class="map-grid">
                            <For
                                each=move || maps.with(|m| m.items.clone().unwrap_or_default())
                                key=|map: &MapSummary| map.id.clone()
                                children=move |map: MapSummary| {
                                    let id = map.id.clone();
                                    let deleting = Signal::derive(move || maps.with(|m| m.is_deleting(&id)));
                                    view! { <MapCard map=map deleting=deleting on_delete=on_delete /> }
                                }
                            />
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
