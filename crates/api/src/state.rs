use std::sync::Arc;

use studionova_core::types::DbId;
use studionova_db::store::StudioStore;
use studionova_worker::WorkerApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL or in-memory store.
    pub store: Arc<dyn StudioStore>,
    /// Client for the worker service.
    pub worker: Arc<WorkerApi>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Id of the dev user that owns every row created through the API.
    pub owner_id: DbId,
}
