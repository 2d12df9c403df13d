use super::*;
use serde_json::json;

fn shop() -> Feature {
    Feature::new("source", "branches", "Point")
        .with_id(FeatureId::Number(7))
        .with_property("name", PropertyValue::String("Kadikoy".to_owned()))
        .with_property("active", PropertyValue::Bool(true))
        .with_property("floors", PropertyValue::Number(2.0))
        .with_property("rating", PropertyValue::Number(4.5))
}

#[test]
fn render_properties_one_row_per_property() {
    let features = vec![shop()];
    let tables = render_properties(&features);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].source_layer, "branches");
    assert_eq!(tables[0].geometry_type, "Point");
    let rows: Vec<(&str, &str)> = tables[0]
        .rows
        .iter()
        .map(|r| (r.key.as_str(), r.value.as_str()))
        .collect();
    assert_eq!(rows, [("name", "Kadikoy"), ("active", "true"), ("floors", "2"), ("rating", "4.5")]);
}

#[test]
fn render_properties_does_not_mutate_input() {
    let features = vec![shop(), shop()];
    let before = features.clone();
    let _ = render_properties(&features);
    assert_eq!(features, before);
}

#[test]
fn booleans_render_literally() {
    assert_eq!(PropertyValue::Bool(false).to_string(), "false");
    assert_eq!(PropertyValue::Bool(true).to_string(), "true");
    assert_eq!(PropertyValue::Null.to_string(), "");
}

#[test]
fn property_value_from_json() {
    assert_eq!(PropertyValue::from(&json!(true)), PropertyValue::Bool(true));
    assert_eq!(PropertyValue::from(&json!(3)), PropertyValue::Number(3.0));
    assert_eq!(PropertyValue::from(&json!("x")), PropertyValue::String("x".to_owned()));
    assert_eq!(PropertyValue::from(&json!([1, 2])), PropertyValue::String("[1,2]".to_owned()));
}

#[test]
fn retain_sources_drops_basemap_features() {
    let features = vec![
        Feature::new("openmaptiles", "water", "Polygon"),
        Feature::new("source-0", "branches", "Point"),
        Feature::new("source-1", "roads", "LineString"),
    ];
    let kept = retain_sources(features, &["source-0", "source-1"]);
    let sources: Vec<&str> = kept.iter().map(|f| f.source.as_str()).collect();
    assert_eq!(sources, ["source-0", "source-1"]);
}
