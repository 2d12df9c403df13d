//! Hex color normalization for source paint values.
//!
//! Colors arrive from `<input type="color">`, from the backend's stored map
//! definition, and from CLI flags. All of them are folded into canonical
//! lowercase `#rrggbb` so derived style layers compare and serialize stably.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Default color for newly picked source files.
pub const DEFAULT_SOURCE_HEX: &str = "#ffffff";

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[allow(clippy::cast_possible_truncation)] // hex digits are < 16
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match *digits.as_slice() {
        [r, g, b] => Some((r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Some((r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        _ => None,
    }
}

/// Error returned when a string is not a `#rgb`/`#rrggbb` color.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color `{0}` (expected #rgb or #rrggbb)")]
pub struct ParseColorError(pub String);

/// A normalized `#rrggbb` color.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parse a hex color, returning `None` when it is malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_hex_rgb(raw).map(|(r, g, b)| Self::from_rgb(r, g, b))
    }

    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Normalize `raw`, substituting `fallback` when it does not parse.
    #[must_use]
    pub fn normalize(raw: &str, fallback: &Color) -> Self {
        Self::parse(raw).unwrap_or_else(|| fallback.clone())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb(0xff, 0xff, 0xff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseColorError(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for Color {
    /// Stored colors are trusted loosely: anything unparsable becomes the
    /// default source color instead of failing the whole map payload.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw, &Self::default()))
    }
}
