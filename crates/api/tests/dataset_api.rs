mod common;

use axum::http::StatusCode;
use serde_json::json;

fn added(dataset_path: &str) -> serde_json::Value {
    json!({
        "status": "ok",
        "dataset_path": dataset_path,
        "file_name": "img_0004.png",
        "count": 4
    })
}

#[tokio::test]
async fn add_uses_derived_dataset_path_by_default() {
    let (worker, calls) = common::mock_post(
        "/api/models/{id}/dataset/add",
        StatusCode::OK,
        added("datasets/ava-ava"),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        &format!("/api/models/{id}/dataset/add"),
        json!({ "imagePath": "storage/g1.png" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["dataset_path"], "datasets/ava-ava");
    assert_eq!(body["file_name"], "img_0004.png");
    assert_eq!(body["count"], 4);

    let sent = &calls.bodies()[0];
    assert_eq!(sent["model_id"], id.to_string());
    assert_eq!(sent["dataset_path"], "datasets/ava-ava");
    assert_eq!(sent["image_path"], "storage/g1.png");
    assert_eq!(sent["source"], "comfyui");
}

#[tokio::test]
async fn add_forwards_explicit_dataset_path() {
    let (worker, calls) = common::mock_post(
        "/api/models/{id}/dataset/add",
        StatusCode::OK,
        added("custom/ava"),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        &format!("/api/models/{id}/dataset/add"),
        json!({ "datasetPath": " custom/ava ", "imageData": "aGVsbG8=", "source": "upload" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let sent = &calls.bodies()[0];
    assert_eq!(sent["dataset_path"], "custom/ava");
    assert_eq!(sent["image_data"], "aGVsbG8=");
    assert_eq!(sent["source"], "upload");
}

#[tokio::test]
async fn add_to_unknown_model_is_404() {
    let (worker, calls) = common::mock_post(
        "/api/models/{id}/dataset/add",
        StatusCode::OK,
        added("datasets/x"),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;

    let response = common::post_json(
        &app.router,
        "/api/models/12/dataset/add",
        json!({ "datasetPath": "datasets/x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn mistyped_field_is_rejected_before_the_worker() {
    let (worker, calls) = common::mock_post(
        "/api/models/{id}/dataset/add",
        StatusCode::OK,
        added("datasets/ava"),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        &format!("/api/models/{id}/dataset/add"),
        json!({ "datasetPath": "datasets/ava", "imagePath": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("imagePath"));
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn full_size_image_data_reaches_the_worker() {
    let (worker, calls) = common::mock_post(
        "/api/models/{id}/dataset/add",
        StatusCode::OK,
        added("datasets/ava"),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;
    let image_data = "A".repeat(3 * 1024 * 1024);

    let response = common::post_json(
        &app.router,
        &format!("/api/models/{id}/dataset/add"),
        json!({ "datasetPath": "datasets/ava", "imageData": image_data }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(calls.count(), 1);
    assert_eq!(
        calls.bodies()[0]["image_data"].as_str().unwrap().len(),
        3 * 1024 * 1024
    );
}
