//! Backend REST calls for map inventory and map creation.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx status is classified into an [`ApiError`] instead of being
//! read as "no data", so views can tell an access-denied map from an
//! outage. Transport failures become `Network`, body failures `Decode`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use harita::api::{
    AddSourceRequest, AddSourceResponse, ApiError, Endpoint, IdRequest, MapDetail, MapSummary, NewMapRequest,
};
#[cfg(feature = "hydrate")]
use harita::api::{AUTHORIZATION, NewMapResponse, check_status};
use harita::session::SessionState;
#[cfg(feature = "hydrate")]
use serde::Serialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

/// Backend client bound to one base URL and (optionally) one access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, token: Option<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_owned(), token }
    }

    /// Client carrying whatever token `state` holds (none while unknown or
    /// signed out).
    pub fn for_session(base: impl Into<String>, state: &SessionState) -> Self {
        Self::new(base, state.access_token().map(str::to_owned))
    }

    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.base)
    }

    /// Raw token for the `Authorization` header; empty when anonymous so
    /// public maps stay readable.
    #[must_use]
    pub fn authorization(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    /// Fail fast for endpoints that need a signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingSession`] without a token.
    pub fn require_session(&self) -> Result<&str, ApiError> {
        self.token.as_deref().filter(|t| !t.is_empty()).ok_or(ApiError::MissingSession)
    }

    #[cfg(feature = "hydrate")]
    async fn send(&self, endpoint: Endpoint, body: Option<&impl Serialize>) -> Result<gloo_net::http::Response, ApiError> {
        let url = self.url(endpoint);
        let builder = match endpoint.method() {
            harita::api::Method::Get => gloo_net::http::Request::get(&url),
            harita::api::Method::Post => gloo_net::http::Request::post(&url),
        }
        .header(AUTHORIZATION, self.authorization());
        let request = match body {
            Some(body) => builder.json(body).map_err(|e| ApiError::Decode(e.to_string()))?,
            None => builder.build().map_err(|e| ApiError::Network(e.to_string()))?,
        };
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if let Err(e) = check_status(resp.status()) {
            log::warn!("{} {} -> {}", url, resp.status(), e);
            return Err(e);
        }
        Ok(resp)
    }

    #[cfg(feature = "hydrate")]
    async fn json<T: DeserializeOwned>(&self, endpoint: Endpoint, body: Option<&impl Serialize>) -> Result<T, ApiError> {
        let resp = self.send(endpoint, body).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `GET /maps`
    ///
    /// # Errors
    ///
    /// Fails without a session or on any non-2xx response.
    pub async fn list_maps(&self) -> Result<Vec<MapSummary>, ApiError> {
        self.require_session()?;
        #[cfg(feature = "hydrate")]
        {
            self.json(Endpoint::ListMaps, None::<&()>).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    /// `POST /getMap`; works anonymously for public maps.
    ///
    /// # Errors
    ///
    /// `Forbidden`/`NotFound`/`Unauthorized` when the map is not visible to
    /// the caller.
    pub async fn get_map(&self, id: &str) -> Result<MapDetail, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.json(Endpoint::GetMap, Some(&IdRequest::new(id))).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = IdRequest::new(id);
            Err(ApiError::Unavailable)
        }
    }

    /// `POST /deleteMap`
    ///
    /// # Errors
    ///
    /// Fails without a session or on any non-2xx response.
    pub async fn delete_map(&self, id: &str) -> Result<(), ApiError> {
        self.require_session()?;
        #[cfg(feature = "hydrate")]
        {
            self.send(Endpoint::DeleteMap, Some(&IdRequest::new(id))).await.map(drop)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }

    /// `POST /newMap`, returning the new map id.
    ///
    /// # Errors
    ///
    /// Fails without a session or on any non-2xx response.
    pub async fn new_map(&self, request: &NewMapRequest) -> Result<String, ApiError> {
        self.require_session()?;
        #[cfg(feature = "hydrate")]
        {
            self.json::<NewMapResponse>(Endpoint::NewMap, Some(request)).await.map(|r| r.id)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    /// `POST /addSource`, returning the storage upload ticket.
    ///
    /// # Errors
    ///
    /// Fails without a session or on any non-2xx response.
    pub async fn add_source(&self, request: &AddSourceRequest) -> Result<AddSourceResponse, ApiError> {
        self.require_session()?;
        #[cfg(feature = "hydrate")]
        {
            self.json(Endpoint::AddSource, Some(request)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    /// `POST /assembleMap`
    ///
    /// # Errors
    ///
    /// Fails without a session or on any non-2xx response.
    pub async fn assemble_map(&self, request: &IdRequest) -> Result<(), ApiError> {
        self.require_session()?;
        #[cfg(feature = "hydrate")]
        {
            self.send(Endpoint::AssembleMap, Some(request)).await.map(drop)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }
}
