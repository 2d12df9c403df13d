//! PMTiles header and manifest loading over HTTP `Range` requests.
//!
//! DESIGN
//! ======
//! Two requests per source: the fixed 127-byte header, then exactly the
//! metadata span it points at. Servers that ignore `Range` and answer `200`
//! with the whole archive still work; the requested span is sliced out of
//! the full body.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use harita::api::ApiError;
use harita::pmtiles::TileError;
use harita::source::TileSource;

pub(crate) fn tile_error(e: TileError) -> ApiError {
    ApiError::Decode(e.to_string())
}

#[cfg(feature = "hydrate")]
async fn fetch_range(url: &str, range: &std::ops::Range<u64>) -> Result<Vec<u8>, ApiError> {
    use harita::pmtiles::{range_header, slice_range};

    let resp = gloo_net::http::Request::get(url)
        .header("Range", &range_header(range))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    harita::api::check_status(resp.status())?;
    let status = resp.status();
    let body = resp.binary().await.map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(slice_range(status, body, range))
}

/// Read the header and manifest of `source` and return it loaded.
///
/// # Errors
///
/// Network and status failures are [`ApiError`]s; malformed archives are
/// reported as [`ApiError::Decode`].
pub async fn load_source(source: TileSource) -> Result<TileSource, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use harita::pmtiles::{HEADER_SPAN, Header, decode_metadata};

        let head = fetch_range(&source.url, &HEADER_SPAN).await?;
        let header = Header::parse(&head).map_err(tile_error)?;
        let raw = match header.metadata_span().map_err(tile_error)? {
            Some(span) => fetch_range(&source.url, &span).await?,
            None => Vec::new(),
        };
        let metadata = decode_metadata(&header, &raw).map_err(tile_error)?;
        log::info!(
            "loaded {} ({} vector layers, z{}-{})",
            source.url,
            metadata.vector_layers.len(),
            header.min_zoom,
            header.max_zoom
        );
        Ok(source.loaded(header, metadata))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = source;
        Err(ApiError::Unavailable)
    }
}

/// Load every source; the first failure wins.
///
/// # Errors
///
/// Propagates the first [`load_source`] failure.
pub async fn load_sources(sources: Vec<TileSource>) -> Result<Vec<TileSource>, ApiError> {
    let mut loaded = Vec::with_capacity(sources.len());
    for source in sources {
        loaded.push(load_source(source).await?);
    }
    Ok(loaded)
}
