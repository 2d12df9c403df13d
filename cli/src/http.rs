//! Backend and storage calls over `reqwest`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the same HTTP surface as the browser client: the map API with
//! the raw access token in `Authorization`, and Supabase Storage for signed
//! uploads. Payloads are local file paths read at upload time.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::path::PathBuf;

use async_trait::async_trait;
use harita::api::{
    AUTHORIZATION, AddSourceRequest, AddSourceResponse, ApiError, Endpoint, IdRequest, MapDetail, MapSummary, Method,
    NewMapRequest, NewMapResponse, SourceFormat, check_status, signed_upload_url,
};
use harita::workflow::MapBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    supabase_url: String,
    anon_key: String,
}

impl HttpBackend {
    pub fn new(api_url: &str, token: Option<String>, supabase_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_owned(),
            token: token.filter(|t| !t.trim().is_empty()),
            supabase_url: supabase_url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.to_owned(),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.api_url)
    }

    fn require_session(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::MissingSession)
    }

    /// Storage target for an upload ticket.
    pub fn upload_url(&self, format: SourceFormat, ticket: &AddSourceResponse) -> Result<String, ApiError> {
        signed_upload_url(&self.supabase_url, format.bucket(), &ticket.path, &ticket.token)
    }

    async fn send(&self, endpoint: Endpoint, body: Option<&impl Serialize>) -> Result<reqwest::Response, ApiError> {
        let url = self.url(endpoint);
        let mut request = match endpoint.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        }
        .header(AUTHORIZATION, self.token.as_deref().unwrap_or_default());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        tracing::debug!(%url, status, "backend response");
        check_status(status)?;
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, endpoint: Endpoint, body: Option<&impl Serialize>) -> Result<T, ApiError> {
        let response = self.send(endpoint, body).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn list_maps(&self) -> Result<Vec<MapSummary>, ApiError> {
        self.require_session()?;
        self.json(Endpoint::ListMaps, None::<&()>).await
    }

    pub async fn get_map(&self, id: &str) -> Result<MapDetail, ApiError> {
        self.json(Endpoint::GetMap, Some(&IdRequest::new(id))).await
    }

    pub async fn delete_map(&self, id: &str) -> Result<(), ApiError> {
        self.require_session()?;
        self.send(Endpoint::DeleteMap, Some(&IdRequest::new(id))).await?;
        Ok(())
    }
}

/// Content type sent with an upload of `format`.
pub fn content_type(format: SourceFormat) -> &'static str {
    match format {
        SourceFormat::GeoJson => "application/geo+json",
        SourceFormat::PmTiles => "application/octet-stream",
    }
}

#[async_trait(?Send)]
impl MapBackend for HttpBackend {
    type Payload = PathBuf;

    async fn new_map(&self, request: &NewMapRequest) -> Result<String, ApiError> {
        self.require_session()?;
        let response: NewMapResponse = self.json(Endpoint::NewMap, Some(request)).await?;
        Ok(response.id)
    }

    async fn add_source(&self, request: &AddSourceRequest) -> Result<AddSourceResponse, ApiError> {
        self.require_session()?;
        self.json(Endpoint::AddSource, Some(request)).await
    }

    async fn upload(&self, format: SourceFormat, ticket: &AddSourceResponse, payload: &PathBuf) -> Result<(), ApiError> {
        let url = self.upload_url(format, ticket)?;
        let bytes = tokio::fs::read(payload)
            .await
            .map_err(|e| ApiError::Network(format!("read {}: {e}", payload.display())))?;
        let size = bytes.len();
        let response = self
            .client
            .put(&url)
            .header("apikey", &self.anon_key)
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type(format))
            .body(bytes)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response.status().as_u16())?;
        tracing::info!(size, bucket = format.bucket(), path = %ticket.path, "uploaded");
        Ok(())
    }

    async fn assemble_map(&self, request: &IdRequest) -> Result<(), ApiError> {
        self.require_session()?;
        self.send(Endpoint::AssembleMap, Some(request)).await?;
        Ok(())
    }
}
