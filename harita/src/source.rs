//! Tile sources as a page sees them: declared by the backend, then enriched
//! once the archive header and manifest have been read.
//!
//! DESIGN
//! ======
//! A source is created "pending" (no header) and becomes "loaded" when its
//! header/manifest arrive. Bounds merging treats pending sources as unknown
//! rather than as zero-sized boxes, so a viewport fit never happens on half
//! the data.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use crate::bounds::{BoundingBox, merge_boxes};
use crate::color::Color;
use crate::layers::{RenderRule, VectorLayer, derive_source_layers};
use crate::pmtiles::{Header, Metadata};

/// URL scheme the engine's PMTiles protocol handler is registered under.
pub const PMTILES_SCHEME: &str = "pmtiles://";

#[derive(Clone, Debug, PartialEq)]
pub struct TileSource {
    /// Engine-side source id; unique within one map.
    pub id: String,
    pub url: String,
    pub color: Color,
    pub header: Option<Header>,
    pub vector_layers: Vec<VectorLayer>,
}

impl TileSource {
    pub fn pending(id: impl Into<String>, url: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            color,
            header: None,
            vector_layers: Vec::new(),
        }
    }

    /// Attach a decoded header and manifest.
    #[must_use]
    pub fn loaded(mut self, header: Header, metadata: Metadata) -> Self {
        self.header = Some(header);
        self.vector_layers = metadata.vector_layers;
        self
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.header.is_some()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.header.as_ref().map(|h| h.bounds)
    }

    /// Vector source URL for the engine (`pmtiles://<url>`).
    #[must_use]
    pub fn engine_url(&self) -> String {
        format!("{PMTILES_SCHEME}{}", self.url)
    }

    /// Style rules for this source at full base opacity.
    #[must_use]
    pub fn rules(&self) -> Vec<RenderRule> {
        derive_source_layers(&self.id, &self.vector_layers, &self.color, 1.0)
    }
}

/// Merge every source's bounds; `None` while any source is still pending.
pub fn merge_bounds(sources: &[TileSource]) -> Option<BoundingBox> {
    merge_boxes(sources.iter().map(TileSource::bounds))
}

/// Engine source id for the `index`-th source of a map.
#[must_use]
pub fn source_id(index: usize) -> String {
    format!("source-{index}")
}
