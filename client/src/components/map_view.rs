//! Interactive map rendering a set of PMTiles sources over the basemap.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages own source loading and hand this component only loaded
//! [`TileSource`]s. The component owns the engine instance: it adds each
//! source with its derived style rules once the basemap style is ready,
//! fits the camera to the merged bounds, and drives the hover popup from
//! rendered-feature queries.
//!
//! DESIGN
//! ======
//! The popup is an overlay positioned at the pointer inside the container
//! rather than an engine popup, so its content is a normal Leptos view.
//! Engine handles and event closures are browser objects and live in local
//! stored values that drop with the component.

use harita::source::TileSource;
use leptos::prelude::*;

use super::feature_properties::FeatureProperties;
use crate::state::inspector::InspectorState;

#[component]
pub fn MapView(#[prop(into)] sources: Signal<Vec<TileSource>>) -> impl IntoView {
    let container = NodeRef::<leptos::html::Div>::new();
    let inspector = RwSignal::new(InspectorState::default());

    #[cfg(feature = "hydrate")]
    engine::mount(container, sources, inspector);
    #[cfg(not(feature = "hydrate"))]
    let _ = sources;

    view! {
        <div class="map-view">
            <div class="map-view__canvas" node_ref=container></div>
            {move || {
                inspector
                    .with(|s| s.popup.clone())
                    .map(|popup| {
                        view! {
                            <div
                                class="map-popup"
                                class:map-popup--frozen=move || inspector.with(|s| s.frozen)
                                style=format!("left: {}px; top: {}px;", popup.x, popup.y)
                            >
                                <FeatureProperties tables=popup.tables />
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod engine {
    use harita::source::{TileSource, merge_bounds};
    use leptos::prelude::*;
    use wasm_bindgen::JsCast as _;
    use wasm_bindgen::prelude::*;

    use crate::config::ClientConfig;
    use crate::state::inspector::{HoverChange, InspectorState, query_box};
    use crate::util::maplibre::{MapHandle, event_point, register_pmtiles_protocol};

    type Handler = Closure<dyn FnMut(JsValue)>;

    pub(super) fn mount(
        container: NodeRef<leptos::html::Div>,
        sources: Signal<Vec<TileSource>>,
        inspector: RwSignal<InspectorState>,
    ) {
        let style = expect_context::<ClientConfig>().basemap_style;
        let map = StoredValue::new_local(None::<MapHandle>);
        let handlers = StoredValue::new_local(Vec::<Handler>::new());
        let style_ready = RwSignal::new(false);

        Effect::new(move || {
            let Some(el) = container.get() else {
                return;
            };
            if map.with_value(Option::is_some) {
                return;
            }
            register_pmtiles_protocol();
            let handle = match MapHandle::create(&el, &style) {
                Ok(handle) => handle,
                Err(e) => {
                    log::error!("map init failed: {e:?}");
                    return;
                }
            };

            let on_load = Handler::new(move |_: JsValue| style_ready.set(true));
            let on_move = Handler::new(move |event: JsValue| {
                let Some((x, y)) = event_point(&event) else {
                    return;
                };
                map.with_value(|m| {
                    let Some(m) = m else {
                        return;
                    };
                    let features = m.features_in(query_box(x, y));
                    let ids: Vec<String> = sources.with_untracked(|s| s.iter().map(|s| s.id.clone()).collect());
                    if let Some(change) = inspector.try_update(|s| s.pointer_moved(x, y, features, &ids)) {
                        apply_hover(m, &change);
                    }
                });
            });
            let on_click = Handler::new(move |_: JsValue| {
                inspector.update(|s| {
                    s.clicked();
                });
            });

            handle.on("load", on_load.as_ref().unchecked_ref());
            handle.on("mousemove", on_move.as_ref().unchecked_ref());
            handle.on("click", on_click.as_ref().unchecked_ref());
            handlers.update_value(|h| h.extend([on_load, on_move, on_click]));
            map.set_value(Some(handle));
        });

        Effect::new(move || {
            let sources = sources.get();
            if !style_ready.get() {
                return;
            }
            map.with_value(|m| {
                let Some(m) = m else {
                    return;
                };
                if let Some(change) = inspector.try_update(InspectorState::reset) {
                    apply_hover(m, &change);
                }
                install_sources(m, &sources);
                if let Some(bounds) = merge_bounds(&sources) {
                    m.fit(&bounds);
                }
            });
        });

        on_cleanup(move || {
            map.update_value(|m| {
                if let Some(m) = m.take() {
                    m.remove();
                }
            });
        });
    }

    fn apply_hover(map: &MapHandle, change: &HoverChange) {
        for key in &change.clear {
            map.set_hover(key, false);
        }
        for key in &change.set {
            map.set_hover(key, true);
        }
    }

    /// Add every loaded source not yet on the map, with its style rules.
    fn install_sources(map: &MapHandle, sources: &[TileSource]) {
        for source in sources.iter().filter(|s| s.is_loaded()) {
            match map.add_vector_source(&source.id, &source.engine_url()) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    log::warn!("could not add source {}: {e:?}", source.id);
                    continue;
                }
            }
            for rule in source.rules() {
                if let Err(e) = map.add_layer(&rule.to_style_layer()) {
                    log::warn!("could not add layer {}: {e:?}", rule.id);
                }
            }
        }
    }
}
