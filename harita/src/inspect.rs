//! Rendered-feature inspection: what the hover popup shows.
//!
//! SYSTEM CONTEXT
//! ==============
//! The engine's spatial query returns every feature under the pointer,
//! basemap included. Pages narrow that set with [`retain_sources`] using the
//! ids of the sources they registered, then flatten what is left into
//! [`FeatureTable`]s for display.

#[cfg(test)]
#[path = "inspect_test.rs"]
mod inspect_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scalar property value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    String(String),
    Null,
}

impl From<&Value> for PropertyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or_else(|| Self::String(n.to_string()), Self::Number),
            Value::String(s) => Self::String(s.clone()),
            Value::Null => Self::Null,
            other => Self::String(other.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => f.write_str("false"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Null => Ok(()),
        }
    }
}

/// Engine-assigned feature id, needed to toggle the `hover` feature state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    Number(u64),
    Text(String),
}

/// A feature returned by the engine's rendered-feature query.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub id: Option<FeatureId>,
    pub source: String,
    pub source_layer: String,
    /// Geometry type exactly as the engine reported it (`"MultiPolygon"`, ...).
    pub geometry_type: String,
    /// Properties in the order the engine reported them.
    pub properties: Vec<(String, PropertyValue)>,
}

impl Feature {
    pub fn new(source: impl Into<String>, source_layer: impl Into<String>, geometry_type: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            source_layer: source_layer.into(),
            geometry_type: geometry_type.into(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push((key.into(), value));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRow {
    pub key: String,
    pub value: String,
}

/// Displayable summary of one feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureTable {
    pub source_layer: String,
    pub geometry_type: String,
    pub rows: Vec<PropertyRow>,
}

impl From<&Feature> for FeatureTable {
    fn from(feature: &Feature) -> Self {
        Self {
            source_layer: feature.source_layer.clone(),
            geometry_type: feature.geometry_type.clone(),
            rows: feature
                .properties
                .iter()
                .map(|(key, value)| PropertyRow { key: key.clone(), value: value.to_string() })
                .collect(),
        }
    }
}

/// One table per feature, one row per property.
pub fn render_properties(features: &[Feature]) -> Vec<FeatureTable> {
    features.iter().map(FeatureTable::from).collect()
}

/// Keep only features drawn from one of `source_ids`.
pub fn retain_sources<S: AsRef<str>>(mut features: Vec<Feature>, source_ids: &[S]) -> Vec<Feature> {
    features.retain(|f| source_ids.iter().any(|id| id.as_ref() == f.source));
    features
}
