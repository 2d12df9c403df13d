//! Viewer page state: the map record and its tile sources.
//!
//! DESIGN
//! ======
//! Sources get engine ids `source-<index>` when the record arrives and are
//! replaced wholesale once every header is read, so bounds are merged only
//! over a complete set.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use harita::api::{ApiError, MapDetail};
use harita::source::{TileSource, source_id};

/// Heading shown when the caller may not see the map.
pub const NOT_PUBLIC_MESSAGE: &str = "Error: Map not public";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerState {
    pub detail: Option<MapDetail>,
    pub sources: Vec<TileSource>,
    pub error: Option<String>,
}

impl ViewerState {
    /// Record the map and create one pending source per reference.
    pub fn map_loaded(&mut self, detail: MapDetail) {
        self.sources = detail
            .sources
            .iter()
            .enumerate()
            .map(|(i, s)| TileSource::pending(source_id(i), s.url.clone(), s.color.clone()))
            .collect();
        self.detail = Some(detail);
    }

    pub fn sources_loaded(&mut self, sources: Vec<TileSource>) {
        self.sources = sources;
    }

    pub fn failed(&mut self, error: &ApiError) {
        self.error = Some(if error.is_access_denied() {
            NOT_PUBLIC_MESSAGE.to_owned()
        } else {
            error.user_message()
        });
    }

    /// Still waiting for the record or any source header.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.error.is_none() && (self.detail.is_none() || !self.sources.iter().all(TileSource::is_loaded))
    }

    #[must_use]
    pub fn can_share(&self) -> bool {
        self.detail.as_ref().is_some_and(|d| d.public)
    }
}
