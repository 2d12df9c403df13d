//! Style-layer derivation from a tile source's declared vector layers.
//!
//! SYSTEM CONTEXT
//! ==============
//! A PMTiles archive carries a manifest listing its vector layers but no
//! styling. Every vector layer may mix polygons, lines, and points, so each
//! descriptor expands into three MapLibre layers, each filtered to one
//! geometry type. Hover emphasis is expressed as a `feature-state` case
//! expression: the engine evaluates it at draw time, nothing here tracks
//! which feature is hovered.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::color::Color;

/// Source id used by single-source pages (landing demo).
pub const DEFAULT_SOURCE_ID: &str = "source";
/// Opacity removed from polygon fills when not hovered.
pub const IDLE_OPACITY_DROP: f64 = 0.15;
pub const OUTLINE_HOVERED: &str = "hsl(0,100%,90%)";
pub const OUTLINE_IDLE: &str = "rgba(0,0,0,0.2)";
pub const LINE_WIDTH_HOVERED: f64 = 5.0;
pub const LINE_WIDTH_IDLE: f64 = 2.5;
pub const CIRCLE_RADIUS_HOVERED: f64 = 6.0;
pub const CIRCLE_RADIUS_IDLE: f64 = 5.0;

/// One entry of the manifest's `vector_layers` array.
///
/// Only `id` is interpreted; everything else is kept so the CLI can echo the
/// manifest back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorLayer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VectorLayer {
    /// A descriptor with no metadata beyond its id.
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
            description: None,
            minzoom: None,
            maxzoom: None,
            extra: Map::new(),
        }
    }
}

/// Geometry family a render rule is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Polygon,
    Line,
    Point,
}

impl GeometryKind {
    /// Emission order per vector layer.
    pub const ALL: [GeometryKind; 3] = [Self::Polygon, Self::Line, Self::Point];

    /// Value compared against `["geometry-type"]` in the layer filter.
    #[must_use]
    pub const fn filter_type(self) -> &'static str {
        match self {
            Self::Polygon => "Polygon",
            Self::Line => "LineString",
            Self::Point => "Point",
        }
    }

    /// MapLibre layer `type`.
    #[must_use]
    pub const fn layer_type(self) -> &'static str {
        match self {
            Self::Polygon => "fill",
            Self::Line => "line",
            Self::Point => "circle",
        }
    }

    #[must_use]
    pub const fn id_suffix(self) -> &'static str {
        match self {
            Self::Polygon => "fill",
            Self::Line => "stroke",
            Self::Point => "point",
        }
    }
}

/// A paint value that switches on the engine's per-feature `hover` state.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverValue<T> {
    pub hovered: T,
    pub idle: T,
}

impl<T: Serialize> HoverValue<T> {
    pub fn new(hovered: T, idle: T) -> Self {
        Self { hovered, idle }
    }

    /// `["case", ["boolean", ["feature-state", "hover"], false], hovered, idle]`
    pub fn to_expression(&self) -> Value {
        json!([
            "case",
            ["boolean", ["feature-state", "hover"], false],
            self.hovered,
            self.idle,
        ])
    }
}

/// Paint properties for one geometry kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Fill {
        color: Color,
        opacity: HoverValue<f64>,
        outline: HoverValue<String>,
    },
    Line {
        color: Color,
        width: HoverValue<f64>,
    },
    Circle {
        color: Color,
        radius: HoverValue<f64>,
    },
}

impl Paint {
    fn for_kind(kind: GeometryKind, color: &Color, base_opacity: f64) -> Self {
        match kind {
            GeometryKind::Polygon => Self::Fill {
                color: color.clone(),
                opacity: HoverValue::new(base_opacity, base_opacity - IDLE_OPACITY_DROP),
                outline: HoverValue::new(OUTLINE_HOVERED.to_owned(), OUTLINE_IDLE.to_owned()),
            },
            GeometryKind::Line => Self::Line {
                color: color.clone(),
                width: HoverValue::new(LINE_WIDTH_HOVERED, LINE_WIDTH_IDLE),
            },
            GeometryKind::Point => Self::Circle {
                color: color.clone(),
                radius: HoverValue::new(CIRCLE_RADIUS_HOVERED, CIRCLE_RADIUS_IDLE),
            },
        }
    }

    /// MapLibre `paint` object.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Fill { color, opacity, outline } => json!({
                "fill-color": color,
                "fill-opacity": opacity.to_expression(),
                "fill-outline-color": outline.to_expression(),
            }),
            Self::Line { color, width } => json!({
                "line-color": color,
                "line-width": width.to_expression(),
            }),
            Self::Circle { color, radius } => json!({
                "circle-color": color,
                "circle-radius": radius.to_expression(),
            }),
        }
    }
}

/// A style directive painting one geometry kind of one vector layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRule {
    pub id: String,
    pub source: String,
    pub source_layer: String,
    pub kind: GeometryKind,
    pub paint: Paint,
}

impl RenderRule {
    /// `["==", ["geometry-type"], <kind>]`
    pub fn filter(&self) -> Value {
        json!(["==", ["geometry-type"], self.kind.filter_type()])
    }

    /// The MapLibre style-layer object handed to `map.addLayer`.
    pub fn to_style_layer(&self) -> Value {
        json!({
            "id": self.id,
            "type": self.kind.layer_type(),
            "source": self.source,
            "source-layer": self.source_layer,
            "paint": self.paint.to_json(),
            "filter": self.filter(),
        })
    }
}

impl Serialize for RenderRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_style_layer().serialize(serializer)
    }
}

/// Derive three rules (fill, stroke, point) per vector layer, scoped to the
/// fixed [`DEFAULT_SOURCE_ID`].
///
/// An empty manifest yields no rules.
pub fn derive_layers(vector_layers: &[VectorLayer], color: &Color, base_opacity: f64) -> Vec<RenderRule> {
    derive_rules(DEFAULT_SOURCE_ID, None, vector_layers, color, base_opacity)
}

/// Same as [`derive_layers`] but scoped to `source_id`, with rule ids
/// prefixed `<source_id>/` so several sources can share one map.
pub fn derive_source_layers(
    source_id: &str,
    vector_layers: &[VectorLayer],
    color: &Color,
    base_opacity: f64,
) -> Vec<RenderRule> {
    derive_rules(source_id, Some(source_id), vector_layers, color, base_opacity)
}

fn derive_rules(
    source_id: &str,
    id_prefix: Option<&str>,
    vector_layers: &[VectorLayer],
    color: &Color,
    base_opacity: f64,
) -> Vec<RenderRule> {
    vector_layers
        .iter()
        .flat_map(|layer| {
            GeometryKind::ALL.into_iter().map(move |kind| {
                let local_id = format!("{}_{}", layer.id, kind.id_suffix());
                RenderRule {
                    id: match id_prefix {
                        Some(prefix) => format!("{prefix}/{local_id}"),
                        None => local_id,
                    },
                    source: source_id.to_owned(),
                    source_layer: layer.id.clone(),
                    kind,
                    paint: Paint::for_kind(kind, color, base_opacity),
                }
            })
        })
        .collect()
}
