mod common;

use axum::http::StatusCode;
use serde_json::json;
use studionova_db::models::asset::AssetFilter;
use studionova_db::store::StudioStore;

#[tokio::test]
async fn generate_without_image_records_job_only() {
    let (worker, _calls) = common::mock_post(
        "/api/generate-image",
        StatusCode::OK,
        json!({ "job_id": "g1" }),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        "/api/generate/image",
        json!({ "modelId": id, "prompt": "portrait of @ava" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["jobId"], "g1");
    assert_eq!(body["status"], "queued");
    assert!(body["imagePath"].is_null());
    assert!(body["assetId"].is_null());

    let jobs = app.store.list_generation_jobs(id).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert!(jobs[0].asset_id.is_none());
    assert_eq!(jobs[0].status, "queued");
    assert!(app.store.list_assets(&AssetFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn generate_with_image_links_job_to_new_asset() {
    let (worker, calls) = common::mock_post(
        "/api/generate-image",
        StatusCode::OK,
        json!({ "job_id": "g2", "status": "completed", "image_path": "storage/g2.png" }),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        "/api/generate/image",
        json!({
            "modelId": id.to_string(),
            "prompt": "  portrait  ",
            "negativePrompt": " blurry ",
            "steps": 12,
            "cfgScale": 5,
            "seed": 42,
            "sampler": "dpmpp_2m"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["imagePath"], "storage/g2.png");
    let asset_id = body["assetId"].as_i64().unwrap();

    let assets = app.store.list_assets(&AssetFilter::default()).await.unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id, asset_id);
    assert_eq!(assets[0].kind, "image");
    assert!(!assets[0].is_upscaled);

    let jobs = app.store.list_generation_jobs(id).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].asset_id, Some(asset_id));
    assert_eq!(jobs[0].prompt, "portrait");
    assert_eq!(jobs[0].negative_prompt.as_deref(), Some("blurry"));
    assert_eq!(jobs[0].settings_json["source"], "web:v0.01");
    assert_eq!(jobs[0].settings_json["steps"], 12);
    assert_eq!(jobs[0].settings_json["cfgScale"], 5.0);
    assert_eq!(jobs[0].settings_json["seed"], 42);
    assert_eq!(jobs[0].settings_json["sampler"], "dpmpp_2m");

    let sent = &calls.bodies()[0];
    assert_eq!(sent["prompt"], "portrait");
    assert_eq!(sent["negative_prompt"], "blurry");
    assert_eq!(sent["scheduler"], "normal");
    assert_eq!(sent["width"], 1024);
    assert!(sent["lora_path"].is_null());
}

#[tokio::test]
async fn generate_passes_trained_lora() {
    let (train, _) = common::mock_post(
        "/api/train-lora",
        StatusCode::OK,
        json!({ "job_id": "t1", "status": "completed", "output_weight": "out/ava.safetensors" }),
    );
    let (generate, calls) = common::mock_post(
        "/api/generate-image",
        StatusCode::OK,
        json!({ "job_id": "g3" }),
    );
    let url = common::spawn_worker(train.merge(generate)).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    common::post_json(&app.router, &format!("/api/models/{id}/train-lora"), json!({})).await;
    common::post_json(
        &app.router,
        "/api/generate/image",
        json!({ "modelId": id, "prompt": "portrait" }),
    )
    .await;

    assert_eq!(calls.bodies()[0]["lora_path"], "out/ava.safetensors");
}

#[tokio::test]
async fn generate_validates_before_calling_worker() {
    let (worker, calls) = common::mock_post(
        "/api/generate-image",
        StatusCode::OK,
        json!({ "job_id": "g4" }),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response =
        common::post_json(&app.router, "/api/generate/image", json!({ "prompt": "x" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(response).await["error"], "modelId is required.");

    let response = common::post_json(
        &app.router,
        "/api/generate/image",
        json!({ "modelId": id, "prompt": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(response).await["error"], "prompt is required.");

    let response = common::post_json(
        &app.router,
        "/api/generate/image",
        json!({ "modelId": 999, "prompt": "portrait" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(calls.count(), 0);
    assert!(app.store.list_generation_jobs(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn generate_worker_failure_still_records_failed_job() {
    let (worker, _calls) = common::mock_post(
        "/api/generate-image",
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": "ComfyUI is offline" }),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        "/api/generate/image",
        json!({ "modelId": id, "prompt": "portrait" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(common::body_json(response).await["error"], "ComfyUI is offline");

    let jobs = app.store.list_generation_jobs(id).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, "failed");
    assert!(jobs[0].asset_id.is_none());
}

#[tokio::test]
async fn previews_complete_with_urls_and_no_assets() {
    let (worker, calls) = common::mock_post(
        "/api/generate/comfy",
        StatusCode::OK,
        json!({
            "previews": [
                { "id": "p1", "image_path": "storage/previews/p 1.png", "is_mock": true },
                { "id": "p2", "image_path": "storage/previews/p2.png", "is_mock": false }
            ]
        }),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        &format!("/api/models/{id}/generate"),
        json!({ "prompt": "portrait", "seed": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "completed");
    let previews = body["previews"].as_array().unwrap();
    assert_eq!(previews.len(), 2);
    assert_eq!(previews[0]["imagePath"], "storage/previews/p 1.png");
    assert_eq!(
        previews[0]["previewUrl"],
        "/api/assets/file?path=storage%2Fpreviews%2Fp%201.png"
    );
    assert_eq!(previews[0]["isMock"], true);

    let jobs = app.store.list_generation_jobs(id).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, "completed");
    assert_eq!(jobs[0].settings_json["mode"], "preview");
    assert_eq!(jobs[0].settings_json["steps"], 20);
    assert!(app.store.list_assets(&AssetFilter::default()).await.unwrap().is_empty());

    assert_eq!(calls.bodies()[0]["steps"], 20);
}

#[tokio::test]
async fn empty_previews_record_failed_job() {
    let (worker, _calls) = common::mock_post(
        "/api/generate/comfy",
        StatusCode::OK,
        json!({ "previews": [] }),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;
    let id = common::create_model(&app.router, "Ava", "@ava").await;

    let response = common::post_json(
        &app.router,
        &format!("/api/models/{id}/generate"),
        json!({ "prompt": "portrait" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "failed");
    assert!(body["previews"].as_array().unwrap().is_empty());

    let response = common::get(&app.router, &format!("/api/models/{id}/generation-jobs")).await;
    let jobs = common::body_json(response).await;
    assert_eq!(jobs.as_array().unwrap().len(), 1);
    assert_eq!(jobs[0]["status"], "failed");
    assert_eq!(jobs[0]["type"], "image");
}

#[tokio::test]
async fn previews_for_unknown_model_are_404() {
    let (worker, calls) = common::mock_post(
        "/api/generate/comfy",
        StatusCode::OK,
        json!({ "previews": [] }),
    );
    let url = common::spawn_worker(worker).await;
    let app = common::build_test_app(&url).await;

    let response = common::post_json(
        &app.router,
        "/api/models/77/generate",
        json!({ "prompt": "portrait" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(calls.count(), 0);
}
