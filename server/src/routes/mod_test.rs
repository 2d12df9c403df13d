use super::*;

#[test]
fn pkg_dir_joins_site_root() {
    assert_eq!(pkg_dir("target/site", "pkg"), PathBuf::from("target/site/pkg"));
}

#[tokio::test]
async fn healthz_reports_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[test]
fn static_routes_build_without_leptos_config() {
    let config = HostConfig { port: 0, assets_dir: PathBuf::from("assets") };
    let _router: Router = static_routes(&config);
}
