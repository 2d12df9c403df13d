//! Dashboard card for one saved map.

use harita::api::MapSummary;
use leptos::prelude::*;

/// Name, description, and the View/Delete actions of a map.
#[component]
pub fn MapCard(map: MapSummary, #[prop(into)] deleting: Signal<bool>, on_delete: Callback<String>) -> impl IntoView {
    let href = format!("/viewMap/{}", map.id);
    let id = map.id.clone();

    view! {
        <div class="map-card">
            <h3 class="map-card__name">{map.name}</h3>
            <p class="map-card__description">{map.description}</p>
            <div class="map-card__actions">
                <a class="btn btn--primary" href=href>
                    "View"
                </a>
                <button
                    class="btn btn--danger"
                    disabled=move || deleting.get()
                    on:click=move |_| on_delete.run(id.clone())
                >
                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                </button>
            </div>
        </div>
    }
}
