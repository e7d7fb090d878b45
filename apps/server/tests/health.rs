use axum::{body::Body, http::Request};
use taxonomist_server::{api::app_router, build_state, config::Config};
use tempfile::tempdir;
use tower::ServiceExt;

#[tokio::test]
async fn healthz_works() {
    let tmp = tempdir().unwrap();
    let config = Config::with_db_path(tmp.path().join("test.db").to_string_lossy());
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn readyz_checks_the_registry() {
    let tmp = tempdir().unwrap();
    let config = Config::with_db_path(tmp.path().join("nested/dir/test.db").to_string_lossy());
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/api/v1/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(tmp.path().join("nested/dir/test.db").exists());
}
