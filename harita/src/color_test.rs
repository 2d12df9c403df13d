use super::*;

#[test]
fn parse_hex_rgb_supports_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#ABC"), Some((170, 187, 204)));
    assert_eq!(parse_hex_rgb("  #a1B2c3 "), Some((161, 178, 195)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("AABBCC"), None);
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#abcd"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
    assert_eq!(parse_hex_rgb("#ééé"), None);
}

#[test]
fn color_parse_uses_canonical_lowercase() {
    assert_eq!(Color::parse("#FF7F00").map(|c| c.to_string()), Some("#ff7f00".to_owned()));
    assert_eq!(Color::parse("#abc").map(|c| c.to_string()), Some("#aabbcc".to_owned()));
}

#[test]
fn color_normalize_falls_back() {
    let fallback = Color::from_rgb(1, 2, 3);
    assert_eq!(Color::normalize("blue", &fallback), fallback);
}

#[test]
fn color_default_matches_source_default() {
    assert_eq!(Color::default().as_str(), DEFAULT_SOURCE_HEX);
}

#[test]
fn color_from_str_reports_input() {
    let err = "red".parse::<Color>().unwrap_err();
    assert_eq!(err, ParseColorError("red".to_owned()));
}

#[test]
fn color_deserialize_is_lenient() {
    let ok: Color = serde_json::from_str("\"#00FF00\"").unwrap();
    assert_eq!(ok.as_str(), "#00ff00");
    let bad: Color = serde_json::from_str("\"green\"").unwrap();
    assert_eq!(bad, Color::default());
}

#[test]
fn color_serializes_as_plain_string() {
    let color = Color::from_rgb(255, 127, 0);
    assert_eq!(serde_json::to_value(&color).unwrap(), serde_json::json!("#ff7f00"));
}
