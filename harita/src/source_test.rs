use std::ops::Range;

use super::*;
use crate::pmtiles::{Compression, TileType};

fn header(bounds: BoundingBox) -> Header {
    let empty: Range<u64> = 0..0;
    Header {
        version: 3,
        root_directory: empty.clone(),
        metadata: empty.clone(),
        leaf_directories: empty.clone(),
        tile_data: empty,
        addressed_tiles: 0,
        tile_entries: 0,
        tile_contents: 0,
        clustered: true,
        internal_compression: Compression::Gzip,
        tile_compression: Compression::Gzip,
        tile_type: TileType::Mvt,
        min_zoom: 0,
        max_zoom: 14,
        bounds,
        center_zoom: 0,
        center_lon: 0.0,
        center_lat: 0.0,
    }
}

fn loaded(id: &str, bounds: BoundingBox) -> TileSource {
    let metadata = Metadata {
        vector_layers: vec![VectorLayer::named("layer")],
        ..Metadata::default()
    };
    TileSource::pending(id, format!("https://tiles.test/{id}.pmtiles"), Color::default())
        .loaded(header(bounds), metadata)
}

#[test]
fn pending_source_has_no_bounds() {
    let source = TileSource::pending("source-0", "a.pmtiles", Color::default());
    assert!(!source.is_loaded());
    assert_eq!(source.bounds(), None);
    assert!(source.rules().is_empty());
}

#[test]
fn loaded_source_exposes_bounds_and_rules() {
    let source = loaded("source-0", BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(source.bounds(), Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0)));
    let rules = source.rules();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].id, "source-0/layer_fill");
}

#[test]
fn engine_url_uses_pmtiles_scheme() {
    let source = TileSource::pending("s", "https://x.test/a.pmtiles", Color::default());
    assert_eq!(source.engine_url(), "pmtiles://https://x.test/a.pmtiles");
}

#[test]
fn merge_bounds_two_sources() {
    let sources = [
        loaded("source-0", BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        loaded("source-1", BoundingBox::new(5.0, 5.0, 20.0, 20.0)),
    ];
    assert_eq!(merge_bounds(&sources), Some(BoundingBox::new(0.0, 0.0, 20.0, 20.0)));
}

#[test]
fn merge_bounds_single_source_is_unchanged() {
    let bbox = BoundingBox::new(26.1, 36.2, 44.7, 42.0);
    assert_eq!(merge_bounds(&[loaded("source-0", bbox)]), Some(bbox));
}

#[test]
fn merge_bounds_waits_for_pending_sources() {
    let sources = [
        loaded("source-0", BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
        TileSource::pending("source-1", "b.pmtiles", Color::default()),
    ];
    assert_eq!(merge_bounds(&sources), None);
}

#[test]
fn source_ids_are_indexed() {
    assert_eq!(source_id(0), "source-0");
    assert_eq!(source_id(12), "source-12");
}
