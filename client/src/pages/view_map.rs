//! Shared map viewer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reachable without signing in for public maps. The record is requested
//! once the session is resolved so the owner's token rides along when
//! present; every source header is then read before the map is fitted.

use harita::api::ApiError;
use harita::source::TileSource;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::components::map_view::MapView;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::tiles::load_sources;
use crate::state::viewer::ViewerState;
use crate::util::cancel::CancelToken;
use crate::util::session::use_session;

#[component]
pub fn ViewMapPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let params = use_params_map();
    let session = use_session(|| {}, || {});
    let viewer = RwSignal::new(ViewerState::default());
    let sources = Memo::new(move |_| viewer.with(|v| v.sources.clone()));
    let copied = RwSignal::new(false);
    let cancel = CancelToken::scoped();

    let mut requested = false;
    Effect::new(move || {
        let state = session.get();
        if requested || !state.is_resolved() {
            return;
        }
        requested = true;
        let Some(id) = params.with_untracked(|p| p.get("id")) else {
            viewer.update(|v| v.failed(&ApiError::NotFound));
            return;
        };
        let api = ApiClient::for_session(config.api_url.clone(), &state);
        let cancel = cancel.clone();
        spawn_local(async move {
            let detail = match api.get_map(&id).await {
                Ok(detail) => detail,
                Err(e) => {
                    cancel.guard(|| viewer.update(|v| v.failed(&e)));
                    return;
                }
            };
            if !cancel.guard(|| viewer.update(|v| v.map_loaded(detail))) {
                return;
            }
            let pending: Vec<TileSource> = viewer.with_untracked(|v| v.sources.clone());
            let result = load_sources(pending).await;
            cancel.guard(|| {
                viewer.update(|v| match result {
                    Ok(loaded) => v.sources_loaded(loaded),
                    Err(e) => v.failed(&e),
                });
            });
        });
    });

    let on_copy = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let href = window.location().href().unwrap_or_default();
            let promise = window.navigator().clipboard().write_text(&href);
            spawn_local(async move {
                if wasm_bindgen_futures::JsFuture::from(promise).await.is_ok() {
                    copied.set(true);
                }
            });
        }
    };

    view! {
        <div class="page viewer">
            {move || {
                if let Some(error) = viewer.with(|v| v.error.clone()) {
                    view! { <h1 class="error">{error}</h1> }.into_any()
                } else if let Some(detail) = viewer.with(|v| v.detail.clone()) {
                    view! {
                        <header class="page__header">
                            <h1>{detail.name}</h1>
                            <p class="viewer__description">{detail.description}</p>
                            <Show when=move || viewer.with(ViewerState::is_loading)>
                                <p class="viewer__status">"Loading map data..."</p>
                            </Show>
                        </header>
                    }
                        .into_any()
                } else {
                    view! { <h1>"Loading..."</h1> }.into_any()
                }
            }}
            <Show when=move || viewer.with(ViewerState::can_share)>
                <button class="btn" on:click=on_copy>
                    {move || if copied.get() { "Link copied!" } else { "Copy link to share" }}
                </button>
            </Show>
            <Show when=move || viewer.with(|v| v.error.is_none())>
                <MapView sources=sources />
            </Show>
        </div>
    }
}
