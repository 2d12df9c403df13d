//! Offline and remote inspection of PMTiles archives.
//!
//! DESIGN
//! ======
//! Local paths are read with a seek to the metadata span; `http(s)` sources
//! are read with two `Range` requests exactly like the browser does, so the
//! output here matches what the map view will derive.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use std::fs::File;
use std::io::BufReader;
use std::ops::Range;

use harita::Color;
use harita::api::check_status;
use harita::bounds::{BoundingBox, merge_boxes};
use harita::layers::{derive_layers, derive_source_layers};
use harita::pmtiles::{HEADER_SPAN, Header, Metadata, decode_metadata, range_header, read_archive, slice_range};
use serde_json::Value;

use crate::CliError;

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Header and manifest of a local file or remote archive.
pub async fn open(source: &str) -> Result<(Header, Metadata), CliError> {
    if is_remote(source) {
        let client = reqwest::Client::new();
        let head = fetch_range(&client, source, &HEADER_SPAN).await?;
        let header = Header::parse(&head)?;
        let raw = match header.metadata_span()? {
            Some(span) => fetch_range(&client, source, &span).await?,
            None => Vec::new(),
        };
        let metadata = decode_metadata(&header, &raw)?;
        Ok((header, metadata))
    } else {
        let mut reader = BufReader::new(File::open(source)?);
        Ok(read_archive(&mut reader)?)
    }
}

async fn fetch_range(client: &reqwest::Client, url: &str, range: &Range<u64>) -> Result<Vec<u8>, CliError> {
    let response = client
        .get(url)
        .header(reqwest::header::RANGE, range_header(range))
        .send()
        .await?;
    let status = response.status().as_u16();
    check_status(status)?;
    let body = response.bytes().await?.to_vec();
    tracing::debug!(%url, status, len = body.len(), "range response");
    Ok(slice_range(status, body, range))
}

/// Summary printed by `tiles inspect`.
pub fn summary(header: &Header, metadata: &Metadata) -> Value {
    serde_json::json!({
        "header": header,
        "metadata": metadata,
    })
}

/// Style layers for `metadata`, optionally scoped to `source_id`.
pub fn style_layers(metadata: &Metadata, color: &Color, source_id: Option<&str>, opacity: f64) -> Vec<Value> {
    let rules = match source_id {
        Some(id) => derive_source_layers(id, &metadata.vector_layers, color, opacity),
        None => derive_layers(&metadata.vector_layers, color, opacity),
    };
    rules.iter().map(harita::layers::RenderRule::to_style_layer).collect()
}

/// Merged bounds of every header; `None` when there are none.
pub fn merged_bounds(headers: &[Header]) -> Option<BoundingBox> {
    merge_boxes(headers.iter().map(|h| Some(h.bounds)))
}
