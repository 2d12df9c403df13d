//! Root application component with routing and context providers.

use harita::session::SessionHub;
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::auth;
use crate::pages::{dashboard::DashboardPage, landing::LandingPage, new_map::NewMapPage, view_map::ViewMapPage};

const MAPLIBRE_JS: &str = "https://unpkg.com/maplibre-gl@4.7.1/dist/maplibre-gl.js";
const MAPLIBRE_CSS: &str = "https://unpkg.com/maplibre-gl@4.7.1/dist/maplibre-gl.css";
const PMTILES_JS: &str = "https://unpkg.com/pmtiles@3.2.1/dist/pmtiles.js";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href=MAPLIBRE_CSS/>
                <script src=MAPLIBRE_JS></script>
                <script src=PMTILES_JS></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the client configuration and the session hub, starts session
/// restoration, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::default();
    let hub = SessionHub::new();
    auth::restore(&config, &hub);

    provide_context(config);
    provide_context(hub);

    view! {
        <Stylesheet id="leptos" href="/pkg/harita.css"/>
        <Title text="Harita"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("newMap") view=NewMapPage/>
                <Route path=(StaticSegment("viewMap"), ParamSegment("id")) view=ViewMapPage/>
            </Routes>
        </Router>
    }
}
