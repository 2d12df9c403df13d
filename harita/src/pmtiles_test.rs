use std::io::{Cursor, Write};

use flate2::Compression as GzLevel;
use flate2::write::GzEncoder;

use super::*;

fn e7(value: f64) -> [u8; 4] {
    #[allow(clippy::cast_possible_truncation)]
    let fixed = (value * E7).round() as i32;
    fixed.to_le_bytes()
}

/// Build a minimal archive: header followed directly by the metadata blob.
fn archive(metadata: &[u8], compression: u8, bounds: [f64; 4]) -> Vec<u8> {
    let mut bytes = vec![0_u8; HEADER_LEN];
    bytes[0..7].copy_from_slice(MAGIC);
    bytes[7] = 3;
    bytes[24..32].copy_from_slice(&(HEADER_LEN as u64).to_le_bytes());
    bytes[32..40].copy_from_slice(&(metadata.len() as u64).to_le_bytes());
    bytes[97] = compression;
    bytes[98] = 2;
    bytes[99] = 1;
    bytes[100] = 0;
    bytes[101] = 14;
    bytes[102..106].copy_from_slice(&e7(bounds[0]));
    bytes[106..110].copy_from_slice(&e7(bounds[1]));
    bytes[110..114].copy_from_slice(&e7(bounds[2]));
    bytes[114..118].copy_from_slice(&e7(bounds[3]));
    bytes[118] = 5;
    bytes[119..123].copy_from_slice(&e7(35.0));
    bytes[123..127].copy_from_slice(&e7(39.0));
    bytes.extend_from_slice(metadata);
    bytes
}

fn gzip(raw: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), GzLevel::default());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

const MANIFEST: &str = r#"{"name":"migros","vector_layers":[{"id":"branches","fields":{"name":"String"}}],"format":"pbf"}"#;

#[test]
fn parse_reads_bounds_and_zooms() {
    let bytes = archive(MANIFEST.as_bytes(), 1, [26.0, 36.0, 44.8, 42.1]);
    let header = Header::parse(&bytes).unwrap();

    assert_eq!(header.version, 3);
    assert_eq!(header.min_zoom, 0);
    assert_eq!(header.max_zoom, 14);
    assert_eq!(header.tile_type, TileType::Mvt);
    assert_eq!(header.tile_compression, Compression::Gzip);
    assert_eq!(header.internal_compression, Compression::None);
    assert!((header.bounds.min_lon - 26.0).abs() < 1e-7);
    assert!((header.bounds.max_lat - 42.1).abs() < 1e-7);
    assert!((header.center_lat - 39.0).abs() < 1e-7);
    assert_eq!(header.metadata, 127..127 + MANIFEST.len() as u64);
}

#[test]
fn parse_decodes_negative_coordinates() {
    let bytes = archive(b"", 1, [-122.5, -33.9, -70.25, 47.6]);
    let header = Header::parse(&bytes).unwrap();
    assert!((header.bounds.min_lon + 122.5).abs() < 1e-7);
    assert!((header.bounds.min_lat + 33.9).abs() < 1e-7);
}

#[test]
fn parse_rejects_short_input() {
    assert!(matches!(Header::parse(&[0_u8; 20]), Err(TileError::Truncated(20))));
}

#[test]
fn parse_rejects_bad_magic() {
    let mut bytes = archive(b"", 1, [0.0; 4]);
    bytes[0] = b'X';
    assert!(matches!(Header::parse(&bytes), Err(TileError::BadMagic)));
}

#[test]
fn parse_rejects_other_versions() {
    let mut bytes = archive(b"", 1, [0.0; 4]);
    bytes[7] = 2;
    assert!(matches!(Header::parse(&bytes), Err(TileError::UnsupportedVersion(2))));
}

#[test]
fn parse_rejects_inverted_bounds() {
    let bytes = archive(b"", 1, [10.0, 0.0, -10.0, 5.0]);
    assert!(matches!(Header::parse(&bytes), Err(TileError::InvertedBounds(_))));
}

#[test]
fn range_headers_are_inclusive() {
    let bytes = archive(MANIFEST.as_bytes(), 1, [0.0; 4]);
    let header = Header::parse(&bytes).unwrap();
    let span = header.metadata_span().unwrap().unwrap();
    assert_eq!(range_header(&HEADER_SPAN), "bytes=0-126");
    assert_eq!(range_header(&span), format!("bytes=127-{}", 127 + MANIFEST.len() - 1));
}

#[test]
fn empty_metadata_has_no_span() {
    let header = Header::parse(&archive(b"", 1, [0.0; 4])).unwrap();
    assert_eq!(header.metadata_span().unwrap(), None);
    assert_eq!(decode_metadata(&header, &[]).unwrap(), Metadata::default());
}

#[test]
fn oversized_metadata_span_is_rejected() {
    let mut bytes = archive(b"", 1, [0.0; 4]);
    bytes[32..40].copy_from_slice(&(MAX_METADATA_BYTES + 1).to_le_bytes());
    let header = Header::parse(&bytes).unwrap();
    assert!(matches!(header.metadata_span(), Err(TileError::MetadataTooLarge)));
}

#[test]
fn partial_content_body_is_the_span() {
    let body = vec![7_u8; 3];
    assert_eq!(slice_range(PARTIAL_CONTENT, body.clone(), &(100..103)), body);
}

#[test]
fn full_body_is_sliced_to_span() {
    let body: Vec<u8> = (0..10).collect();
    assert_eq!(slice_range(200, body, &(2..5)), vec![2, 3, 4]);
}

#[test]
fn short_full_body_yields_short_slice() {
    let body: Vec<u8> = (0..4).collect();
    assert_eq!(slice_range(200, body.clone(), &(2..50)), vec![2, 3]);
    assert!(slice_range(200, body, &(10..20)).is_empty());
}

#[test]
fn decode_metadata_plain_and_gzip_agree() {
    let plain_bytes = archive(MANIFEST.as_bytes(), 1, [0.0; 4]);
    let plain_header = Header::parse(&plain_bytes).unwrap();
    let plain = decode_metadata(&plain_header, MANIFEST.as_bytes()).unwrap();

    let compressed = gzip(MANIFEST.as_bytes());
    let gz_bytes = archive(&compressed, 2, [0.0; 4]);
    let gz_header = Header::parse(&gz_bytes).unwrap();
    let gz = decode_metadata(&gz_header, &compressed).unwrap();

    assert_eq!(plain, gz);
    assert_eq!(plain.name.as_deref(), Some("migros"));
    assert_eq!(plain.vector_layers.len(), 1);
    assert_eq!(plain.vector_layers[0].id, "branches");
    assert_eq!(plain.extra["format"], "pbf");
}

#[test]
fn decode_metadata_null_layers_is_empty() {
    let raw = br#"{"vector_layers":null}"#;
    let header = Header::parse(&archive(raw, 1, [0.0; 4])).unwrap();
    assert!(decode_metadata(&header, raw).unwrap().vector_layers.is_empty());
}

#[test]
fn decode_metadata_rejects_length_mismatch() {
    let header = Header::parse(&archive(MANIFEST.as_bytes(), 1, [0.0; 4])).unwrap();
    let err = decode_metadata(&header, b"{}").unwrap_err();
    assert!(matches!(err, TileError::MetadataLength { actual: 2, .. }));
}

#[test]
fn decode_metadata_caps_gzip_output() {
    let bomb = gzip(&vec![b' '; usize::try_from(MAX_METADATA_BYTES).unwrap() + 1]);
    let header = Header::parse(&archive(&bomb, 2, [0.0; 4])).unwrap();
    assert!(matches!(decode_metadata(&header, &bomb), Err(TileError::MetadataTooLarge)));
}

#[test]
fn decode_metadata_rejects_brotli() {
    let header = Header::parse(&archive(b"xx", 3, [0.0; 4])).unwrap();
    assert!(matches!(
        decode_metadata(&header, b"xx"),
        Err(TileError::UnsupportedCompression(Compression::Brotli))
    ));
}

#[test]
fn read_archive_from_cursor() {
    let compressed = gzip(MANIFEST.as_bytes());
    let mut cursor = Cursor::new(archive(&compressed, 2, [1.0, 2.0, 3.0, 4.0]));
    let (header, metadata) = read_archive(&mut cursor).unwrap();
    assert!((header.bounds.max_lon - 3.0).abs() < 1e-7);
    assert_eq!(metadata.vector_layers[0].id, "branches");
}

#[test]
fn read_archive_rejects_hostile_metadata_length() {
    let mut bytes = archive(b"", 1, [0.0; 4]);
    bytes[32..40].copy_from_slice(&u64::MAX.to_le_bytes());
    let result = std::panic::catch_unwind(|| read_archive(&mut Cursor::new(bytes)));
    let err = result.expect("no panic on hostile length").unwrap_err();
    assert!(matches!(err, TileError::MetadataTooLarge));
}

#[test]
fn read_archive_rejects_truncated_metadata() {
    let mut bytes = archive(MANIFEST.as_bytes(), 1, [0.0; 4]);
    bytes.truncate(HEADER_LEN + 4);
    let err = read_archive(&mut Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, TileError::MetadataLength { actual: 4, .. }));
}
