//! MapLibre GL JS and PMTiles bindings.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both libraries are loaded as globals (`maplibregl`, `pmtiles`) by the
//! document shell. Only the handful of calls the map view needs are bound;
//! style JSON crosses the boundary through `serde-wasm-bindgen`.

use std::sync::atomic::{AtomicBool, Ordering};

use harita::bounds::BoundingBox;
use harita::inspect::{Feature, FeatureId, PropertyValue};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::state::inspector::FeatureKey;

pub const FIT_PADDING_PX: f64 = 20.0;
pub const FIT_SPEED: f64 = 2.0;

#[wasm_bindgen(js_namespace = maplibregl)]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    pub type MapHandle;

    #[wasm_bindgen(constructor, js_class = "Map")]
    fn new(options: &JsValue) -> MapHandle;

    #[wasm_bindgen(method, catch, js_class = "Map", js_name = addSource)]
    fn add_source_raw(this: &MapHandle, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Map", js_name = addLayer)]
    fn add_layer_raw(this: &MapHandle, layer: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_class = "Map", js_name = getSource)]
    fn get_source(this: &MapHandle, id: &str) -> JsValue;

    #[wasm_bindgen(method, js_class = "Map", js_name = queryRenderedFeatures)]
    fn query_rendered_features(this: &MapHandle, geometry: &JsValue) -> Array;

    #[wasm_bindgen(method, js_class = "Map", js_name = setFeatureState)]
    fn set_feature_state(this: &MapHandle, target: &JsValue, state: &JsValue);

    #[wasm_bindgen(method, js_class = "Map", js_name = fitBounds)]
    fn fit_bounds_raw(this: &MapHandle, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method, js_class = "Map", js_name = addControl)]
    fn add_control(this: &MapHandle, control: &JsValue);

    #[wasm_bindgen(method, js_class = "Map")]
    pub fn on(this: &MapHandle, event: &str, handler: &Function);

    #[wasm_bindgen(method, js_class = "Map")]
    pub fn remove(this: &MapHandle);

    #[wasm_bindgen(js_name = NavigationControl)]
    type NavigationControl;

    #[wasm_bindgen(constructor, js_class = "NavigationControl")]
    fn new() -> NavigationControl;

    #[wasm_bindgen(js_name = GeolocateControl)]
    type GeolocateControl;

    #[wasm_bindgen(constructor, js_class = "GeolocateControl")]
    fn new() -> GeolocateControl;

    #[wasm_bindgen(js_name = addProtocol)]
    fn add_protocol(name: &str, handler: &JsValue);
}

#[wasm_bindgen(js_namespace = pmtiles)]
extern "C" {
    #[wasm_bindgen(js_name = Protocol)]
    type PmtilesProtocol;

    #[wasm_bindgen(constructor, js_class = "Protocol")]
    fn new() -> PmtilesProtocol;

    #[wasm_bindgen(method, getter, js_class = "Protocol")]
    fn tile(this: &PmtilesProtocol) -> JsValue;
}

static PROTOCOL_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register the `pmtiles://` scheme with MapLibre once per page load.
pub fn register_pmtiles_protocol() {
    if PROTOCOL_REGISTERED.swap(true, Ordering::SeqCst) {
        return;
    }
    let protocol = PmtilesProtocol::new();
    add_protocol("pmtiles", &protocol.tile());
}

/// Convert any serializable value into a plain JS object (maps become
/// objects, not `Map`s).
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

impl MapHandle {
    /// Create a map in `container` with the given basemap style and the
    /// stock navigation and geolocation controls.
    pub fn create(container: &web_sys::HtmlElement, style: &str) -> Result<Self, JsValue> {
        let options = Object::new();
        Reflect::set(&options, &"container".into(), container)?;
        Reflect::set(&options, &"style".into(), &style.into())?;
        Reflect::set(&options, &"center".into(), &to_js(&[-100.0, 40.0])?)?;
        Reflect::set(&options, &"zoom".into(), &3.5.into())?;
        let map = Self::new(&options);
        map.add_control(&NavigationControl::new());
        map.add_control(&GeolocateControl::new());
        Ok(map)
    }

    /// Add a vector source backed by `url`; `false` if `id` already exists.
    pub fn add_vector_source(&self, id: &str, url: &str) -> Result<bool, JsValue> {
        if !self.get_source(id).is_undefined() {
            return Ok(false);
        }
        let source = to_js(&serde_json::json!({ "type": "vector", "url": url }))?;
        self.add_source_raw(id, &source)?;
        Ok(true)
    }

    pub fn add_layer(&self, layer: &serde_json::Value) -> Result<(), JsValue> {
        self.add_layer_raw(&to_js(layer)?)
    }

    /// Features rendered inside the screen-space box.
    pub fn features_in(&self, query_box: [[f64; 2]; 2]) -> Vec<Feature> {
        let Ok(geometry) = to_js(&query_box) else {
            return Vec::new();
        };
        self.query_rendered_features(&geometry)
            .iter()
            .filter_map(|value| feature_from_js(&value))
            .collect()
    }

    pub fn set_hover(&self, key: &FeatureKey, hovered: bool) {
        let target = serde_json::json!({
            "source": key.source,
            "sourceLayer": key.source_layer,
            "id": key.id,
        });
        let (Ok(target), Ok(state)) = (to_js(&target), to_js(&serde_json::json!({ "hover": hovered }))) else {
            return;
        };
        self.set_feature_state(&target, &state);
    }

    /// Animated fit to `bounds`.
    pub fn fit(&self, bounds: &BoundingBox) {
        let options = serde_json::json!({ "animate": true, "padding": FIT_PADDING_PX, "speed": FIT_SPEED });
        if let (Ok(b), Ok(o)) = (to_js(&bounds.corners()), to_js(&options)) {
            self.fit_bounds_raw(&b, &o);
        }
    }
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// `(x, y)` of a map mouse event's `point`.
pub fn event_point(event: &JsValue) -> Option<(f64, f64)> {
    let point = get(event, "point");
    Some((get(&point, "x").as_f64()?, get(&point, "y").as_f64()?))
}

fn property_from_js(value: &JsValue) -> PropertyValue {
    if let Some(b) = value.as_bool() {
        PropertyValue::Bool(b)
    } else if let Some(n) = value.as_f64() {
        PropertyValue::Number(n)
    } else if let Some(s) = value.as_string() {
        PropertyValue::String(s)
    } else if value.is_null() || value.is_undefined() {
        PropertyValue::Null
    } else {
        serde_wasm_bindgen::from_value::<serde_json::Value>(value.clone())
            .map_or(PropertyValue::Null, |json| PropertyValue::from(&json))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn feature_id_from_js(value: &JsValue) -> Option<FeatureId> {
    if let Some(n) = value.as_f64() {
        return (n >= 0.0 && n.fract() == 0.0).then(|| FeatureId::Number(n as u64));
    }
    value.as_string().map(FeatureId::Text)
}

/// Read a `MapGeoJSONFeature`, keeping property order as enumerated.
pub fn feature_from_js(value: &JsValue) -> Option<Feature> {
    let source = get(value, "source").as_string()?;
    let source_layer = get(value, "sourceLayer").as_string().unwrap_or_default();
    let geometry_type = get(&get(value, "geometry"), "type").as_string().unwrap_or_default();
    let mut feature = Feature::new(source, source_layer, geometry_type);
    feature.id = feature_id_from_js(&get(value, "id"));

    let properties = get(value, "properties");
    if let Some(object) = properties.dyn_ref::<Object>() {
        for entry in Object::entries(object).iter() {
            let pair = Array::from(&entry);
            if let Some(key) = pair.get(0).as_string() {
                feature.properties.push((key, property_from_js(&pair.get(1))));
            }
        }
    }
    Some(feature)
}
