//! Map creation: create the map record, register and upload each source,
//! then ask the backend to assemble tiles.
//!
//! DESIGN
//! ======
//! The step order is fixed and lives here once; the browser and the CLI
//! only differ in how a payload reaches storage, which is what
//! [`MapBackend`] abstracts. Every step reports progress before it starts
//! so a failure message can name the step that broke.

#[cfg(test)]
#[path = "workflow_test.rs"]
mod workflow_test;

use std::fmt;

use async_trait::async_trait;

use crate::api::{AddSourceRequest, AddSourceResponse, ApiError, IdRequest, NewMapRequest, SourceFormat};
use crate::color::Color;

/// Name, description, and visibility entered for a new map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapDraft {
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl MapDraft {
    #[must_use]
    pub fn to_request(&self) -> NewMapRequest {
        NewMapRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            public: self.public,
        }
    }
}

/// One file queued for upload with its display color.
#[derive(Clone, Debug)]
pub struct SourceUpload<P> {
    pub name: String,
    pub color: Color,
    pub payload: P,
}

impl<P> SourceUpload<P> {
    pub fn new(name: impl Into<String>, color: Color, payload: P) -> Self {
        Self { name: name.into(), color, payload }
    }

    #[must_use]
    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_file_name(&self.name)
    }
}

/// Backend operations the creation workflow drives.
#[async_trait(?Send)]
pub trait MapBackend {
    /// Whatever carries file bytes on this platform.
    type Payload;

    async fn new_map(&self, request: &NewMapRequest) -> Result<String, ApiError>;

    async fn add_source(&self, request: &AddSourceRequest) -> Result<AddSourceResponse, ApiError>;

    async fn upload(&self, format: SourceFormat, ticket: &AddSourceResponse, payload: &Self::Payload) -> Result<(), ApiError>;

    async fn assemble_map(&self, request: &IdRequest) -> Result<(), ApiError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    CreateMap,
    AddSource(String),
    Upload(String),
    Assemble,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateMap => f.write_str("Creating map"),
            Self::AddSource(name) => write!(f, "Creating {name}"),
            Self::Upload(name) => write!(f, "Uploading {name}"),
            Self::Assemble => f.write_str("Assembling map... converting GeoJSON to PMTiles"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{step} failed: {source}")]
pub struct WorkflowError {
    pub step: Step,
    #[source]
    pub source: ApiError,
}

fn at(step: &Step) -> impl FnOnce(ApiError) -> WorkflowError + '_ {
    move |source| WorkflowError { step: step.clone(), source }
}

/// Run the full creation sequence and return the new map id.
///
/// Sources are processed in order; the first failure stops the run and
/// later steps (including assembly) are not attempted.
///
/// # Errors
///
/// Returns a [`WorkflowError`] naming the step whose backend call failed.
pub async fn create_map<B, F>(
    backend: &B,
    draft: &MapDraft,
    sources: &[SourceUpload<B::Payload>],
    mut progress: F,
) -> Result<String, WorkflowError>
where
    B: MapBackend + ?Sized,
    F: FnMut(&Step),
{
    let step = Step::CreateMap;
    progress(&step);
    let map_id = backend.new_map(&draft.to_request()).await.map_err(at(&step))?;
    log::info!("created map {map_id} with {} source(s)", sources.len());

    for source in sources {
        let format = source.format();
        let step = Step::AddSource(source.name.clone());
        progress(&step);
        let request = AddSourceRequest {
            map_id: map_id.clone(),
            name: source.name.clone(),
            color: source.color.clone(),
            format,
        };
        let ticket = backend.add_source(&request).await.map_err(at(&step))?;

        let step = Step::Upload(source.name.clone());
        progress(&step);
        backend.upload(format, &ticket, &source.payload).await.map_err(at(&step))?;
        log::debug!("uploaded {} to {}/{}", source.name, format.bucket(), ticket.path);
    }

    let step = Step::Assemble;
    progress(&step);
    backend.assemble_map(&IdRequest::new(map_id.clone())).await.map_err(at(&step))?;
    Ok(map_id)
}
