//! Browser implementation of the map-creation backend.

use async_trait::async_trait;
use harita::api::{AddSourceRequest, AddSourceResponse, ApiError, IdRequest, NewMapRequest, SourceFormat};
use harita::workflow::MapBackend;

use super::api::ApiClient;
use super::storage::{self, FilePayload};
use crate::config::ClientConfig;

/// REST calls through [`ApiClient`], file bytes straight to storage.
pub struct BrowserBackend {
    pub api: ApiClient,
    pub config: ClientConfig,
}

#[async_trait(?Send)]
impl MapBackend for BrowserBackend {
    type Payload = FilePayload;

    async fn new_map(&self, request: &NewMapRequest) -> Result<String, ApiError> {
        self.api.new_map(request).await
    }

    async fn add_source(&self, request: &AddSourceRequest) -> Result<AddSourceResponse, ApiError> {
        self.api.add_source(request).await
    }

    async fn upload(&self, format: SourceFormat, ticket: &AddSourceResponse, payload: &FilePayload) -> Result<(), ApiError> {
        storage::upload(&self.config, format, ticket, payload).await
    }

    async fn assemble_map(&self, request: &IdRequest) -> Result<(), ApiError> {
        self.api.assemble_map(request).await
    }
}
