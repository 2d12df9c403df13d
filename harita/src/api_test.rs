use super::*;
use serde_json::json;

#[test]
fn endpoint_paths_and_methods() {
    assert_eq!(Endpoint::ListMaps.path(), "/maps");
    assert_eq!(Endpoint::ListMaps.method(), Method::Get);
    assert_eq!(Endpoint::AddSource.path(), "/addSource");
    assert_eq!(Endpoint::AssembleMap.method(), Method::Post);
}

#[test]
fn endpoint_url_trims_trailing_slash() {
    assert_eq!(Endpoint::GetMap.url("http://localhost:3000/"), "http://localhost:3000/getMap");
    assert_eq!(Endpoint::NewMap.url(DEFAULT_API_URL), "http://localhost:3000/newMap");
}

#[test]
fn from_status_classifies() {
    assert_eq!(ApiError::from_status(200), None);
    assert_eq!(ApiError::from_status(204), None);
    assert_eq!(ApiError::from_status(401), Some(ApiError::Unauthorized));
    assert_eq!(ApiError::from_status(403), Some(ApiError::Forbidden));
    assert_eq!(ApiError::from_status(404), Some(ApiError::NotFound));
    assert_eq!(ApiError::from_status(500), Some(ApiError::Server(500)));
    assert_eq!(ApiError::from_status(418), Some(ApiError::Status(418)));
    assert_eq!(check_status(502), Err(ApiError::Server(502)));
    assert_eq!(check_status(201), Ok(()));
}

#[test]
fn access_denied_maps_to_not_public_message() {
    assert!(ApiError::Forbidden.is_access_denied());
    assert!(ApiError::NotFound.is_access_denied());
    assert!(!ApiError::Server(500).is_access_denied());
    assert_eq!(ApiError::Forbidden.user_message(), "Map not public");
    assert!(ApiError::Network("offline".to_owned()).user_message().starts_with("Load failure"));
}

#[test]
fn map_summary_accepts_numeric_ids() {
    let maps: Vec<MapSummary> = serde_json::from_value(json!([
        {"id": 12, "name": "Parks", "description": "City parks"},
        {"id": "abc", "name": "Roads"}
    ]))
    .unwrap();
    assert_eq!(maps[0].id, "12");
    assert_eq!(maps[1].id, "abc");
    assert_eq!(maps[1].description, "");
}

#[test]
fn map_summary_rejects_object_ids() {
    let err = serde_json::from_value::<MapSummary>(json!({"id": {}, "name": "x"}));
    assert!(err.is_err());
}

#[test]
fn map_detail_parses_sources() {
    let detail: MapDetail = serde_json::from_value(json!({
        "name": "Shops",
        "description": "All shops",
        "public": true,
        "sources": [{"color": "#FF0000", "url": "https://cdn.test/a.pmtiles"}]
    }))
    .unwrap();
    assert!(detail.public);
    assert_eq!(detail.sources[0].color.as_str(), "#ff0000");
    assert_eq!(detail.sources[0].url, "https://cdn.test/a.pmtiles");
}

#[test]
fn add_source_request_uses_camel_case() {
    let body = AddSourceRequest {
        map_id: "m1".to_owned(),
        name: "shops.geojson".to_owned(),
        color: Color::default(),
        format: SourceFormat::GeoJson,
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({"mapId": "m1", "name": "shops.geojson", "color": "#ffffff", "format": "geojson"})
    );
}

#[test]
fn add_source_response_parses_ticket() {
    let ticket: AddSourceResponse = serde_json::from_value(json!({
        "sourceId": 4,
        "signedUrl": "https://x.test/sign",
        "token": "jwt",
        "path": "u/m/shops.geojson"
    }))
    .unwrap();
    assert_eq!(ticket.source_id, "4");
    assert_eq!(ticket.path, "u/m/shops.geojson");
}

#[test]
fn source_format_from_extension() {
    assert_eq!(SourceFormat::from_file_name("a.pmtiles"), SourceFormat::PmTiles);
    assert_eq!(SourceFormat::from_file_name("a.PMTiles"), SourceFormat::PmTiles);
    assert_eq!(SourceFormat::from_file_name("a.geojson"), SourceFormat::GeoJson);
    assert_eq!(SourceFormat::from_file_name("a.json"), SourceFormat::GeoJson);
    assert_eq!(SourceFormat::from_file_name("pmtiles"), SourceFormat::GeoJson);
    assert_eq!(SourceFormat::PmTiles.bucket(), "pmtiles");
}

#[test]
fn signed_upload_url_encodes_path() {
    let url = signed_upload_url("https://abc.supabase.co", "geojson", "user/map/my shops.geojson", "t.k-n").unwrap();
    assert_eq!(
        url,
        "https://abc.supabase.co/storage/v1/object/upload/sign/geojson/user/map/my%20shops.geojson?token=t.k-n"
    );
}

#[test]
fn signed_upload_url_rejects_relative_base() {
    assert!(matches!(
        signed_upload_url("not a url", "geojson", "p", "t"),
        Err(ApiError::Network(_))
    ));
}
