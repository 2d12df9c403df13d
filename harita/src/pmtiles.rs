//! PMTiles v3 header and metadata decoding.
//!
//! Only the parts the frontend needs are decoded: the fixed 127-byte header
//! (bounds, zooms, center, compression, offsets) and the JSON metadata blob
//! it points at. Directory and tile decoding stay with the rendering engine's
//! PMTiles protocol handler.
//!
//! Header layout (little-endian):
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 7 | magic `PMTiles` |
//! | 7 | 1 | format version (3) |
//! | 8..96 | 8 each | root dir, metadata, leaf dirs, tile data (offset, length); addressed tiles, tile entries, tile contents |
//! | 96 | 1 | clustered |
//! | 97 | 1 | internal compression |
//! | 98 | 1 | tile compression |
//! | 99 | 1 | tile type |
//! | 100 | 1 | min zoom |
//! | 101 | 1 | max zoom |
//! | 102..118 | 4 each | min lon, min lat, max lon, max lat (e7 fixed point) |
//! | 118 | 1 | center zoom |
//! | 119..127 | 4 each | center lon, center lat (e7) |

#[cfg(test)]
#[path = "pmtiles_test.rs"]
mod pmtiles_test;

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bounds::BoundingBox;
use crate::layers::VectorLayer;

pub const HEADER_LEN: usize = 127;
pub const MAGIC: &[u8; 7] = b"PMTiles";
pub const SUPPORTED_VERSION: u8 = 3;

/// Byte span of the fixed header.
pub const HEADER_SPAN: Range<u64> = 0..HEADER_LEN as u64;

/// Upper bound on the metadata blob, both as stored and once decompressed.
pub const MAX_METADATA_BYTES: u64 = 16 * 1024 * 1024;

/// HTTP 206 Partial Content.
pub const PARTIAL_CONTENT: u16 = 206;

const E7: f64 = 10_000_000.0;

/// Error returned while decoding a PMTiles archive.
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("archive header is truncated ({0} of {HEADER_LEN} bytes)")]
    Truncated(usize),
    #[error("not a PMTiles archive (bad magic)")]
    BadMagic,
    #[error("unsupported PMTiles version {0}")]
    UnsupportedVersion(u8),
    #[error("unsupported metadata compression: {0:?}")]
    UnsupportedCompression(Compression),
    #[error("metadata is {actual} bytes, header declares {expected}")]
    MetadataLength { expected: u64, actual: u64 },
    #[error("metadata exceeds {MAX_METADATA_BYTES} bytes")]
    MetadataTooLarge,
    #[error("header bounds are inverted: {0:?}")]
    InvertedBounds(BoundingBox),
    #[error("metadata decompression failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("metadata is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compression applied to directories/metadata or to tile payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Unknown,
    None,
    Gzip,
    Brotli,
    Zstd,
}

impl From<u8> for Compression {
    fn from(raw: u8) -> Self {
        match raw {
            1 => Self::None,
            2 => Self::Gzip,
            3 => Self::Brotli,
            4 => Self::Zstd,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Unknown,
    Mvt,
    Png,
    Jpeg,
    Webp,
    Avif,
}

impl From<u8> for TileType {
    fn from(raw: u8) -> Self {
        match raw {
            1 => Self::Mvt,
            2 => Self::Png,
            3 => Self::Jpeg,
            4 => Self::Webp,
            5 => Self::Avif,
            _ => Self::Unknown,
        }
    }
}

/// Decoded fixed-size archive header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Header {
    pub version: u8,
    pub root_directory: Range<u64>,
    pub metadata: Range<u64>,
    pub leaf_directories: Range<u64>,
    pub tile_data: Range<u64>,
    pub addressed_tiles: u64,
    pub tile_entries: u64,
    pub tile_contents: u64,
    pub clustered: bool,
    pub internal_compression: Compression,
    pub tile_compression: Compression,
    pub tile_type: TileType,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub bounds: BoundingBox,
    pub center_zoom: u8,
    pub center_lon: f64,
    pub center_lat: f64,
}

fn le_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0_u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(buf)
}

fn le_e7(bytes: &[u8], at: usize) -> f64 {
    let mut buf = [0_u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    f64::from(i32::from_le_bytes(buf)) / E7
}

fn span(bytes: &[u8], at: usize) -> Range<u64> {
    let offset = le_u64(bytes, at);
    offset..offset.saturating_add(le_u64(bytes, at + 8))
}

impl Header {
    /// Decode the header from the first [`HEADER_LEN`] bytes of an archive.
    ///
    /// # Errors
    ///
    /// Fails on short input, wrong magic, a version other than 3, or bounds
    /// whose minimum exceeds their maximum.
    pub fn parse(bytes: &[u8]) -> Result<Self, TileError> {
        if bytes.len() < HEADER_LEN {
            return Err(TileError::Truncated(bytes.len()));
        }
        if &bytes[0..7] != MAGIC {
            return Err(TileError::BadMagic);
        }
        let version = bytes[7];
        if version != SUPPORTED_VERSION {
            return Err(TileError::UnsupportedVersion(version));
        }
        let bounds = BoundingBox::new(le_e7(bytes, 102), le_e7(bytes, 106), le_e7(bytes, 110), le_e7(bytes, 114));
        if !bounds.is_finalized() {
            return Err(TileError::InvertedBounds(bounds));
        }

        Ok(Self {
            version,
            root_directory: span(bytes, 8),
            metadata: span(bytes, 24),
            leaf_directories: span(bytes, 40),
            tile_data: span(bytes, 56),
            addressed_tiles: le_u64(bytes, 72),
            tile_entries: le_u64(bytes, 80),
            tile_contents: le_u64(bytes, 88),
            clustered: bytes[96] == 1,
            internal_compression: Compression::from(bytes[97]),
            tile_compression: Compression::from(bytes[98]),
            tile_type: TileType::from(bytes[99]),
            min_zoom: bytes[100],
            max_zoom: bytes[101],
            bounds,
            center_zoom: bytes[118],
            center_lon: le_e7(bytes, 119),
            center_lat: le_e7(bytes, 123),
        })
    }

    /// Byte length of the metadata blob.
    #[must_use]
    pub fn metadata_len(&self) -> u64 {
        self.metadata.end - self.metadata.start
    }

    /// Span of the metadata blob to fetch, `None` when there is none.
    ///
    /// # Errors
    ///
    /// Fails with [`TileError::MetadataTooLarge`] past [`MAX_METADATA_BYTES`].
    pub fn metadata_span(&self) -> Result<Option<Range<u64>>, TileError> {
        match self.metadata_len() {
            0 => Ok(None),
            len if len > MAX_METADATA_BYTES => Err(TileError::MetadataTooLarge),
            _ => Ok(Some(self.metadata.clone())),
        }
    }
}

/// Inclusive HTTP `Range` header value for `span`.
#[must_use]
pub fn range_header(span: &Range<u64>) -> String {
    format!("bytes={}-{}", span.start, span.end.saturating_sub(1))
}

/// Bytes of `span` from a ranged response body.
///
/// A `206` body is already the span; a `200` body is the whole archive and
/// gets sliced. Short bodies are returned as-is for the decoder to reject.
#[must_use]
pub fn slice_range(status: u16, body: Vec<u8>, span: &Range<u64>) -> Vec<u8> {
    if status == PARTIAL_CONTENT {
        return body;
    }
    let start = usize::try_from(span.start).unwrap_or(usize::MAX).min(body.len());
    let end = usize::try_from(span.end).unwrap_or(usize::MAX).min(body.len());
    body[start..end.max(start)].to_vec()
}

/// The archive's embedded JSON manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, deserialize_with = "deserialize_layers")]
    pub vector_layers: Vec<VectorLayer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `vector_layers: null` is treated the same as a missing key.
fn deserialize_layers<'de, D>(deserializer: D) -> Result<Vec<VectorLayer>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<VectorLayer>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decompress and parse the metadata blob described by `header`.
///
/// # Errors
///
/// Fails when the blob length disagrees with the header, the compression is
/// neither none nor gzip, or the JSON is malformed.
pub fn decode_metadata(header: &Header, raw: &[u8]) -> Result<Metadata, TileError> {
    let expected = header.metadata_len();
    let actual = u64::try_from(raw.len()).unwrap_or(u64::MAX);
    if actual != expected {
        return Err(TileError::MetadataLength { expected, actual });
    }
    if raw.is_empty() {
        return Ok(Metadata::default());
    }
    if actual > MAX_METADATA_BYTES {
        return Err(TileError::MetadataTooLarge);
    }

    let json = match header.internal_compression {
        Compression::None => raw.to_vec(),
        Compression::Gzip => {
            let mut out = Vec::new();
            GzDecoder::new(raw).take(MAX_METADATA_BYTES + 1).read_to_end(&mut out)?;
            if u64::try_from(out.len()).unwrap_or(u64::MAX) > MAX_METADATA_BYTES {
                return Err(TileError::MetadataTooLarge);
            }
            out
        }
        other => return Err(TileError::UnsupportedCompression(other)),
    };
    let metadata: Metadata = serde_json::from_slice(&json)?;
    log::debug!("decoded pmtiles metadata with {} vector layers", metadata.vector_layers.len());
    Ok(metadata)
}

/// Read header and metadata from a seekable archive (local file).
///
/// # Errors
///
/// Propagates I/O failures and any [`TileError`] from decoding. A metadata
/// span reaching past the end of the archive is a
/// [`TileError::MetadataLength`].
pub fn read_archive<R: Read + Seek>(reader: &mut R) -> Result<(Header, Metadata), TileError> {
    let mut head = [0_u8; HEADER_LEN];
    reader.seek(SeekFrom::Start(0))?;
    let read = read_up_to(reader, &mut head)?;
    let header = Header::parse(&head[..read])?;

    let mut raw = Vec::new();
    if let Some(span) = header.metadata_span()? {
        let archive_len = reader.seek(SeekFrom::End(0))?;
        if span.end > archive_len {
            return Err(TileError::MetadataLength {
                expected: header.metadata_len(),
                actual: archive_len.saturating_sub(span.start),
            });
        }
        reader.seek(SeekFrom::Start(span.start))?;
        reader.by_ref().take(header.metadata_len()).read_to_end(&mut raw)?;
    }

    let metadata = decode_metadata(&header, &raw)?;
    Ok((header, metadata))
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
