//! Signed uploads to Supabase Storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! `POST /addSource` returns a one-shot ticket (`path` + `token`) for the
//! bucket named after the upload format. The browser sends the raw file to
//! the storage endpoint directly; the backend never proxies file bytes.

#![allow(clippy::unused_async)]

use harita::api::{AddSourceResponse, ApiError, SourceFormat, signed_upload_url};

use crate::config::ClientConfig;

/// Bytes handed to storage: the picked browser file, or nothing during SSR.
#[cfg(feature = "hydrate")]
pub type FilePayload = web_sys::File;
#[cfg(not(feature = "hydrate"))]
pub type FilePayload = ();

/// Target URL for `ticket` in the `format` bucket.
///
/// # Errors
///
/// Fails when the configured Supabase URL is not absolute.
pub fn upload_url(config: &ClientConfig, format: SourceFormat, ticket: &AddSourceResponse) -> Result<String, ApiError> {
    signed_upload_url(&config.supabase_url, format.bucket(), &ticket.path, &ticket.token)
}

/// `PUT` the file to its signed storage URL.
///
/// # Errors
///
/// Transport failures and non-2xx responses.
pub async fn upload(
    config: &ClientConfig,
    format: SourceFormat,
    ticket: &AddSourceResponse,
    payload: &FilePayload,
) -> Result<(), ApiError> {
    let url = upload_url(config, format, ticket)?;
    #[cfg(feature = "hydrate")]
    {
        let content_type = match payload.type_() {
            t if t.is_empty() => "application/octet-stream".to_owned(),
            t => t,
        };
        let resp = gloo_net::http::Request::put(&url)
            .header("apikey", &config.supabase_anon_key)
            .header("x-upsert", "false")
            .header("Content-Type", &content_type)
            .body(payload.clone())
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        harita::api::check_status(resp.status())?;
        log::info!("stored {} bytes at {}/{}", payload.size(), format.bucket(), ticket.path);
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, payload);
        Err(ApiError::Unavailable)
    }
}
