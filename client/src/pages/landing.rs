//! Landing page with a live demo map and Google sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public entry route. The demo archive ships with the host under
//! `/assets`; signed-in visitors are sent straight to the dashboard.

use harita::session::SessionState;
use harita::source::TileSource;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::map_view::MapView;
use crate::config::ClientConfig;
use crate::util::cancel::CancelToken;
use crate::util::session::use_session;

#[component]
pub fn LandingPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();
    let session = use_session(move || navigate("/dashboard", NavigateOptions::default()), || {});
    let demo = RwSignal::new(Vec::<TileSource>::new());
    let cancel = CancelToken::scoped();

    #[cfg(feature = "hydrate")]
    {
        use harita::Color;

        use crate::config::DEMO_SOURCE_COLOR;

        let source = TileSource::pending(
            harita::source::source_id(0),
            config.demo_source.clone(),
            Color::normalize(DEMO_SOURCE_COLOR, &Color::default()),
        );
        leptos::task::spawn_local(async move {
            match crate::net::tiles::load_source(source).await {
                Ok(loaded) => {
                    cancel.guard(|| demo.set(vec![loaded]));
                }
                Err(e) => log::warn!("demo source unavailable: {e}"),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = cancel;

    let on_login = move |_| crate::net::auth::sign_in_with_google(&config);

    view! {
        <div class="page landing">
            <header class="landing__header">
                <h1>"Harita"</h1>
                <p class="landing__tagline">"share geospatial data on maps!"</p>
            </header>
            <MapView sources=demo />
            <p class="landing__description">
                "Upload GeoJSON or PMTiles files, style each dataset with a color, and share "
                "the resulting map with a link. Hover the demo map above to inspect features; "
                "click to pin the popup."
            </p>
            <Show when=move || session.with(|s| !matches!(s, SessionState::Authenticated(_)))>
                <button class="btn btn--primary" on:click=on_login.clone()>
                    "Log in with Google"
                </button>
            </Show>
        </div>
    }
}
