//! Hover popup state for a map view.
//!
//! DESIGN
//! ======
//! The popup follows the pointer until a click freezes it; the next click
//! unfreezes. While frozen, pointer moves change nothing. Each update also
//! reports which features gained or lost the `hover` feature-state so the
//! map view can keep the engine's highlight in step with the popup.

#[cfg(test)]
#[path = "inspector_test.rs"]
mod inspector_test;

use harita::inspect::{Feature, FeatureId, FeatureTable, render_properties, retain_sources};

/// Pixel radius around the pointer for rendered-feature queries.
pub const QUERY_RADIUS_PX: f64 = 2.0;

/// Square query box `[[x-r, y-r], [x+r, y+r]]` around a screen point.
#[must_use]
pub fn query_box(x: f64, y: f64) -> [[f64; 2]; 2] {
    [[x - QUERY_RADIUS_PX, y - QUERY_RADIUS_PX], [x + QUERY_RADIUS_PX, y + QUERY_RADIUS_PX]]
}

/// Address of one feature's `hover` flag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeatureKey {
    pub source: String,
    pub source_layer: String,
    pub id: FeatureId,
}

impl FeatureKey {
    /// Features without an engine id cannot carry feature-state.
    #[must_use]
    pub fn of(feature: &Feature) -> Option<Self> {
        feature.id.clone().map(|id| Self {
            source: feature.source.clone(),
            source_layer: feature.source_layer.clone(),
            id,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// Screen position inside the map container.
    pub x: f64,
    pub y: f64,
    pub tables: Vec<FeatureTable>,
}

/// Feature-state edits implied by one pointer update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub clear: Vec<FeatureKey>,
    pub set: Vec<FeatureKey>,
}

impl HoverChange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clear.is_empty() && self.set.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InspectorState {
    pub frozen: bool,
    pub popup: Option<Popup>,
    hovered: Vec<FeatureKey>,
}

impl InspectorState {
    /// Apply a pointer move over `features`, keeping only those drawn from
    /// `source_ids`.
    pub fn pointer_moved<S: AsRef<str>>(&mut self, x: f64, y: f64, features: Vec<Feature>, source_ids: &[S]) -> HoverChange {
        if self.frozen {
            return HoverChange::default();
        }
        let features = retain_sources(features, source_ids);
        let keys: Vec<FeatureKey> = features.iter().filter_map(FeatureKey::of).collect();
        let change = HoverChange {
            clear: self.hovered.iter().filter(|k| !keys.contains(k)).cloned().collect(),
            set: keys.iter().filter(|k| !self.hovered.contains(k)).cloned().collect(),
        };
        self.hovered = keys;
        self.popup = (!features.is_empty()).then(|| Popup { x, y, tables: render_properties(&features) });
        change
    }

    /// Toggle the freeze flag; returns the new value.
    pub fn clicked(&mut self) -> bool {
        self.frozen = !self.frozen;
        self.frozen
    }

    /// Forget the popup and report every flag that must be cleared.
    pub fn reset(&mut self) -> HoverChange {
        self.frozen = false;
        self.popup = None;
        HoverChange { clear: std::mem::take(&mut self.hovered), set: Vec::new() }
    }
}
