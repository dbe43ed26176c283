#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use studionova_api::config::{ServerConfig, DEFAULT_DEV_USER_EMAIL};
use studionova_api::router::build_app_router;
use studionova_api::state::AppState;
use studionova_db::store::{MemoryStore, StudioStore};
use studionova_worker::{WorkerApi, WorkerConfig};

/// A router over a fresh [`MemoryStore`], plus handles for assertions.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub owner_id: i64,
}

/// Serve `router` as a mock worker on an ephemeral port and return its URL.
pub async fn spawn_worker(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A worker URL nothing listens on.
pub async fn dead_worker_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Build a test `ServerConfig` pointing at `worker_url`.
///
/// Dataset counts resolve under `dataset_base_dir`; file requests resolve
/// under `worker_root`.
pub fn test_config(worker_url: &str, worker_root: &Path, dataset_base_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        worker: WorkerConfig {
            base_url: worker_url.to_string(),
            timeout_secs: 10,
        },
        dataset_root: "datasets".to_string(),
        dataset_base_dir: dataset_base_dir.to_path_buf(),
        worker_root: worker_root.to_path_buf(),
        dev_user_email: DEFAULT_DEV_USER_EMAIL.to_string(),
    }
}

/// Build the full application router against an in-memory store.
pub async fn build_test_app_with(config: ServerConfig) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let owner = store.ensure_user(&config.dev_user_email).await.unwrap();
    let worker = WorkerApi::new(&config.worker).unwrap();

    let state = AppState {
        store: store.clone(),
        worker: Arc::new(worker),
        config: Arc::new(config.clone()),
        owner_id: owner.id,
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        owner_id: owner.id,
    }
}

/// Build a test app whose filesystem roots point at nonexistent paths.
pub async fn build_test_app(worker_url: &str) -> TestApp {
    let missing = PathBuf::from("/nonexistent/studionova-test");
    build_test_app_with(test_config(worker_url, &missing, &missing)).await
}

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: impl Into<String>) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.into()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a model through the API and return its id.
pub async fn create_model(app: &Router, name: &str, token: &str) -> i64 {
    let response = post_json(
        app,
        "/api/models",
        serde_json::json!({ "name": name, "token": token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Request bodies received by a mock worker route.
#[derive(Clone, Default)]
pub struct Calls(Arc<std::sync::Mutex<Vec<Value>>>);

impl Calls {
    fn push(&self, body: Value) {
        self.0.lock().unwrap().push(body);
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }
}

/// A mock worker route answering every POST to `path` with `status` and
/// `reply`, recording each request body.
pub fn mock_post(path: &str, status: StatusCode, reply: Value) -> (Router, Calls) {
    let calls = Calls::default();
    let recorded = calls.clone();
    let router = Router::new().route(
        path,
        axum::routing::post(move |axum::Json(body): axum::Json<Value>| {
            let recorded = recorded.clone();
            let reply = reply.clone();
            async move {
                recorded.push(body);
                (status, axum::Json(reply))
            }
        }),
    )
    .layer(axum::extract::DefaultBodyLimit::disable());
    (router, calls)
}
