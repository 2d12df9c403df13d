//! Popup body listing the properties of the features under the pointer.

use harita::inspect::FeatureTable;
use leptos::prelude::*;

/// One table per feature: source layer, geometry type, then key/value rows.
#[component]
pub fn FeatureProperties(tables: Vec<FeatureTable>) -> impl IntoView {
    view! {
        <div class="feature-properties">
            {tables
                .into_iter()
                .map(|table| {
                    view! {
                        <table class="feature-properties__table">
                            <thead>
                                <tr>
                                    <th colspan="2">
                                        <strong>{table.source_layer}</strong>
                                        " "
                                        <span class="feature-properties__geometry">
                                            {format!("({})", table.geometry_type)}
                                        </span>
                                    </th>
                                </tr>
                            </thead>
                            <tbody>
                                {table
                                    .rows
                                    .into_iter()
                                    .map(|row| {
                                        view! {
                                            <tr>
                                                <td class="feature-properties__key">{row.key}</td>
                                                <td class="feature-properties__value">{row.value}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                })
                .collect_view()}
        </div>
    }
}
