mod common;

use axum::http::{header, StatusCode};

/// App whose worker root is a temp dir holding `storage/` and `datasets/`.
async fn app_with_storage() -> (common::TestApp, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("storage/previews")).unwrap();
    std::fs::create_dir_all(dir.path().join("datasets/ava-ava")).unwrap();
    std::fs::create_dir_all(dir.path().join("secrets")).unwrap();
    std::fs::write(dir.path().join("storage/previews/p1.png"), b"\x89PNG").unwrap();
    std::fs::write(dir.path().join("datasets/ava-ava/img.JPG"), b"jpeg").unwrap();
    std::fs::write(dir.path().join("secrets/key.txt"), b"secret").unwrap();

    let url = common::dead_worker_url().await;
    let config = common::test_config(&url, dir.path(), dir.path());
    (common::build_test_app_with(config).await, dir)
}

#[tokio::test]
async fn serves_storage_file_with_headers() {
    let (app, _dir) = app_with_storage().await;

    let response = common::get(
        &app.router,
        "/api/assets/file?path=storage%2Fpreviews%2Fp1.png",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=60");
    assert_eq!(common::body_bytes(response).await, b"\x89PNG");
}

#[tokio::test]
async fn serves_dataset_file_by_absolute_path() {
    let (app, dir) = app_with_storage().await;
    let absolute = dir.path().join("datasets/ava-ava/img.JPG");
    let uri = format!(
        "/api/assets/file?path={}",
        urlencoding::encode(&absolute.to_string_lossy())
    );

    let response = common::get(&app.router, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
}

#[tokio::test]
async fn traversal_is_rejected() {
    let (app, _dir) = app_with_storage().await;

    let response = common::get(&app.router, "/api/assets/file?path=../../etc/passwd").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Invalid file path.");

    let response =
        common::get(&app.router, "/api/assets/file?path=storage/../secrets/key.txt").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_path_is_rejected() {
    let (app, _dir) = app_with_storage().await;

    let response = common::get(&app.router, "/api/assets/file").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Missing path parameter.");
}

#[tokio::test]
async fn paths_outside_allowed_roots_are_forbidden() {
    let (app, _dir) = app_with_storage().await;

    let response = common::get(&app.router, "/api/assets/file?path=secrets/key.txt").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Access denied.");

    let response = common::get(&app.router, "/api/assets/file?path=%2Fetc%2Fpasswd").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unreadable_file_is_404() {
    let (app, _dir) = app_with_storage().await;

    let response = common::get(&app.router, "/api/assets/file?path=storage/missing.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "File not found.");
}
