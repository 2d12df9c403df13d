use super::*;

fn backend(token: Option<&str>) -> HttpBackend {
    HttpBackend::new("http://api.test/", token.map(str::to_owned), "http://storage.test", "anon")
}

#[test]
fn endpoint_urls_ignore_trailing_slash() {
    assert_eq!(backend(None).url(Endpoint::GetMap), "http://api.test/getMap");
}

#[test]
fn blank_token_counts_as_signed_out() {
    assert_eq!(backend(Some("  ")).require_session(), Err(ApiError::MissingSession));
    assert_eq!(backend(Some("jwt")).require_session(), Ok("jwt"));
}

#[test]
fn upload_url_uses_format_bucket() {
    let ticket = AddSourceResponse {
        source_id: "7".into(),
        signed_url: String::new(),
        token: "tok".into(),
        path: "42/shops.pmtiles".into(),
    };
    assert_eq!(
        backend(None).upload_url(SourceFormat::PmTiles, &ticket).unwrap(),
        "http://storage.test/storage/v1/object/upload/sign/pmtiles/42/shops.pmtiles?token=tok"
    );
}

#[test]
fn content_types_follow_format() {
    assert_eq!(content_type(SourceFormat::GeoJson), "application/geo+json");
    assert_eq!(content_type(SourceFormat::PmTiles), "application/octet-stream");
}

#[tokio::test]
async fn signed_in_calls_fail_fast_without_token() {
    let backend = backend(None);
    assert_eq!(backend.list_maps().await, Err(ApiError::MissingSession));
    assert_eq!(backend.delete_map("1").await, Err(ApiError::MissingSession));
    assert_eq!(
        backend.new_map(&NewMapRequest::default()).await,
        Err(ApiError::MissingSession)
    );
}
