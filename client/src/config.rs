//! Build-time endpoints for the browser bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment, so endpoints are baked in at
//! compile time through `option_env!` and fall back to local-development
//! values. [`ClientConfig`] is provided once through Leptos context by
//! `app::App`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use harita::api::DEFAULT_API_URL;

pub const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";
pub const DEFAULT_BASEMAP_STYLE: &str = "https://tiles.openfreemap.org/styles/liberty";
pub const DEFAULT_DEMO_SOURCE: &str = "/assets/migros_tr.pmtiles";
pub const DEMO_SOURCE_COLOR: &str = "#ff7f00";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub basemap_style: String,
    pub demo_source: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("HARITA_API_URL"),
            option_env!("HARITA_SUPABASE_URL"),
            option_env!("HARITA_SUPABASE_ANON_KEY"),
            option_env!("HARITA_BASEMAP_STYLE"),
            option_env!("HARITA_DEMO_SOURCE"),
        )
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_owned()
}

impl ClientConfig {
    /// Resolve each value, using the local default when missing or blank.
    #[must_use]
    pub fn from_values(
        api_url: Option<&str>,
        supabase_url: Option<&str>,
        supabase_anon_key: Option<&str>,
        basemap_style: Option<&str>,
        demo_source: Option<&str>,
    ) -> Self {
        Self {
            api_url: non_empty_or(api_url, DEFAULT_API_URL),
            supabase_url: non_empty_or(supabase_url, DEFAULT_SUPABASE_URL),
            supabase_anon_key: supabase_anon_key.unwrap_or_default().trim().to_owned(),
            basemap_style: non_empty_or(basemap_style, DEFAULT_BASEMAP_STYLE),
            demo_source: non_empty_or(demo_source, DEFAULT_DEMO_SOURCE),
        }
    }
}
