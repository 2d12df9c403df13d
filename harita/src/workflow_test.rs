use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

#[derive(Default)]
struct MockBackend {
    calls: RefCell<Vec<String>>,
    fail_upload_of: Option<String>,
}

#[async_trait(?Send)]
impl MapBackend for MockBackend {
    type Payload = Vec<u8>;

    async fn new_map(&self, request: &NewMapRequest) -> Result<String, ApiError> {
        self.calls.borrow_mut().push(format!("new_map {}", request.name));
        Ok("m1".to_owned())
    }

    async fn add_source(&self, request: &AddSourceRequest) -> Result<AddSourceResponse, ApiError> {
        self.calls
            .borrow_mut()
            .push(format!("add_source {} {} {}", request.map_id, request.name, request.format.as_str()));
        Ok(AddSourceResponse {
            source_id: format!("s-{}", request.name),
            signed_url: String::new(),
            token: "tok".to_owned(),
            path: format!("u/{}/{}", request.map_id, request.name),
        })
    }

    async fn upload(&self, format: SourceFormat, ticket: &AddSourceResponse, payload: &Vec<u8>) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(format!("upload {} {} {}", format.bucket(), ticket.path, payload.len()));
        if self.fail_upload_of.as_deref().is_some_and(|name| ticket.path.ends_with(name)) {
            return Err(ApiError::Server(500));
        }
        Ok(())
    }

    async fn assemble_map(&self, request: &IdRequest) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("assemble {}", request.id));
        Ok(())
    }
}

fn draft() -> MapDraft {
    MapDraft {
        name: "Shops".to_owned(),
        description: "Branches".to_owned(),
        public: true,
    }
}

fn uploads() -> Vec<SourceUpload<Vec<u8>>> {
    vec![
        SourceUpload::new("shops.geojson", Color::default(), vec![1, 2, 3]),
        SourceUpload::new("roads.pmtiles", Color::parse("#ff7f00").unwrap(), vec![9]),
    ]
}

#[test]
fn runs_steps_in_order() {
    let backend = MockBackend::default();
    let mut steps = Vec::new();
    let id = block_on(create_map(&backend, &draft(), &uploads(), |s| steps.push(s.to_string()))).unwrap();

    assert_eq!(id, "m1");
    assert_eq!(
        steps,
        [
            "Creating map",
            "Creating shops.geojson",
            "Uploading shops.geojson",
            "Creating roads.pmtiles",
            "Uploading roads.pmtiles",
            "Assembling map... converting GeoJSON to PMTiles",
        ]
    );
    assert_eq!(
        *backend.calls.borrow(),
        [
            "new_map Shops",
            "add_source m1 shops.geojson geojson",
            "upload geojson u/m1/shops.geojson 3",
            "add_source m1 roads.pmtiles pmtiles",
            "upload pmtiles u/m1/roads.pmtiles 1",
            "assemble m1",
        ]
    );
}

#[test]
fn upload_failure_stops_before_assembly() {
    let backend = MockBackend {
        fail_upload_of: Some("shops.geojson".to_owned()),
        ..MockBackend::default()
    };
    let mut last = None;
    let err = block_on(create_map(&backend, &draft(), &uploads(), |s| last = Some(s.clone()))).unwrap_err();

    assert_eq!(err.step, Step::Upload("shops.geojson".to_owned()));
    assert_eq!(err.source, ApiError::Server(500));
    assert_eq!(last, Some(Step::Upload("shops.geojson".to_owned())));
    assert!(!backend.calls.borrow().iter().any(|c| c.starts_with("assemble")));
    assert_eq!(err.to_string(), "Uploading shops.geojson failed: server error (500)");
}

#[test]
fn map_without_sources_still_assembles() {
    let backend = MockBackend::default();
    let id = block_on(create_map(&backend, &draft(), &[], |_| {})).unwrap();
    assert_eq!(id, "m1");
    assert_eq!(*backend.calls.borrow(), ["new_map Shops", "assemble m1"]);
}

#[test]
fn draft_maps_to_request() {
    let request = draft().to_request();
    assert_eq!(request.name, "Shops");
    assert!(request.public);
}

#[test]
fn upload_format_follows_extension() {
    let upload = SourceUpload::new("x.PMTILES", Color::default(), ());
    assert_eq!(upload.format(), SourceFormat::PmTiles);
}
