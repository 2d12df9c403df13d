//! Backend HTTP surface: endpoint table, JSON bodies, and typed failures.
//!
//! DESIGN
//! ======
//! Body types mirror the backend's camelCase JSON exactly so serde stays
//! lossless in both directions. Every non-2xx status becomes an
//! [`ApiError`] variant instead of "no data", so views can tell an
//! access-denied map from a broken server.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::color::Color;

/// Header carrying the raw access token (no `Bearer` prefix).
pub const AUTHORIZATION: &str = "Authorization";
/// Local backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    ListMaps,
    GetMap,
    DeleteMap,
    NewMap,
    AddSource,
    AssembleMap,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ListMaps => "/maps",
            Self::GetMap => "/getMap",
            Self::DeleteMap => "/deleteMap",
            Self::NewMap => "/newMap",
            Self::AddSource => "/addSource",
            Self::AssembleMap => "/assembleMap",
        }
    }

    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::ListMaps => Method::Get,
            _ => Method::Post,
        }
    }

    /// Absolute URL under `base` (trailing slashes on `base` are ignored).
    #[must_use]
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

/// Typed failure of a backend or storage call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("not signed in")]
    MissingSession,
    #[error("request failed: {0}")]
    Network(String),
    #[error("unauthorized (401)")]
    Unauthorized,
    #[error("forbidden (403)")]
    Forbidden,
    #[error("not found (404)")]
    NotFound,
    #[error("server error ({0})")]
    Server(u16),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Classify an HTTP status; `None` for success statuses.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            500..=599 => Some(Self::Server(status)),
            other => Some(Self::Status(other)),
        }
    }

    /// The caller may not see this resource (or it does not exist for them).
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden | Self::NotFound)
    }

    /// Short message suitable for inline display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingSession | Self::Unauthorized => "Please log in again.".to_owned(),
            Self::Forbidden | Self::NotFound => "Map not public".to_owned(),
            Self::Server(_) | Self::Status(_) => format!("The server could not complete the request: {self}"),
            Self::Network(_) | Self::Decode(_) | Self::Unavailable => format!("Load failure: {self}"),
        }
    }
}

/// `Ok` for 2xx statuses, the classified error otherwise.
///
/// # Errors
///
/// Returns the [`ApiError`] matching a non-success `status`.
pub fn check_status(status: u16) -> Result<(), ApiError> {
    ApiError::from_status(status).map_or(Ok(()), Err)
}

/// Ids arrive as strings from some backends and numbers from others.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

/// Entry of `GET /maps`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A source reference inside `POST /getMap`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub color: Color,
    pub url: String,
}

/// Response of `POST /getMap`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDetail {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

/// `{id}` body of `getMap`, `deleteMap`, and `assembleMap`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

impl IdRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMapRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMapResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// Upload format; doubles as the storage bucket name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[serde(rename = "geojson")]
    GeoJson,
    #[serde(rename = "pmtiles")]
    PmTiles,
}

impl SourceFormat {
    /// `.pmtiles` files are uploaded as-is; anything else is GeoJSON for the
    /// backend to convert.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) if ext.eq_ignore_ascii_case("pmtiles") => Self::PmTiles,
            _ => Self::GeoJson,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::PmTiles => "pmtiles",
        }
    }

    #[must_use]
    pub const fn bucket(self) -> &'static str {
        self.as_str()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSourceRequest {
    pub map_id: String,
    pub name: String,
    pub color: Color,
    pub format: SourceFormat,
}

/// Upload ticket returned by `POST /addSource`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSourceResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub source_id: String,
    #[serde(default)]
    pub signed_url: String,
    pub token: String,
    pub path: String,
}

/// Storage endpoint that accepts a signed upload:
/// `<storage>/storage/v1/object/upload/sign/<bucket>/<path>?token=<token>`.
///
/// # Errors
///
/// Returns [`ApiError::Network`] if `storage_base` is not an absolute URL.
pub fn signed_upload_url(storage_base: &str, bucket: &str, path: &str, token: &str) -> Result<String, ApiError> {
    let mut url = Url::parse(storage_base).map_err(|e| ApiError::Network(format!("invalid storage URL: {e}")))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ApiError::Network("storage URL cannot be a base".to_owned()))?;
        segments
            .pop_if_empty()
            .extend(["storage", "v1", "object", "upload", "sign", bucket])
            .extend(path.split('/').filter(|s| !s.is_empty()));
    }
    url.query_pairs_mut().append_pair("token", token);
    Ok(url.into())
}
