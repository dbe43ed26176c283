use std::path::{Path, PathBuf};

use studionova_core::model::DEFAULT_DATASET_ROOT;
use studionova_worker::WorkerConfig;

/// Default owner of every row while authentication is out of scope.
pub const DEFAULT_DEV_USER_EMAIL: &str = "dev@studionova.local";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development next to a
/// worker checkout.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds. Must outlast the worker timeout.
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Worker connection settings.
    pub worker: WorkerConfig,
    /// Root under which default dataset paths are derived.
    pub dataset_root: String,
    /// Directory relative dataset paths are counted against.
    pub dataset_base_dir: PathBuf,
    /// Absolute worker checkout; relative file requests resolve against it.
    pub worker_root: PathBuf,
    /// Email of the user that owns created rows.
    pub dev_user_email: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `3000`                         |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS` | `WORKER_TIMEOUT_SECS + 30`     |
    /// | `DATABASE_URL`         | unset (in-memory store)        |
    /// | `WORKER_URL`           | `http://localhost:8000`        |
    /// | `WORKER_TIMEOUT_SECS`  | `600`                          |
    /// | `KOHYA_DATASET_ROOT`   | `datasets`                     |
    /// | `WORKER_ROOT`          | `../worker`                    |
    /// | `DEV_USER_EMAIL`       | `dev@studionova.local`         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let worker_timeout_secs: u64 = std::env::var("WORKER_TIMEOUT_SECS")
            .map(|v| v.parse().expect("WORKER_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(WorkerConfig::DEFAULT_TIMEOUT_SECS);

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .map(|v| v.parse().expect("REQUEST_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(worker_timeout_secs + 30);

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let worker = WorkerConfig {
            base_url: std::env::var("WORKER_URL")
                .unwrap_or_else(|_| WorkerConfig::DEFAULT_BASE_URL.into()),
            timeout_secs: worker_timeout_secs,
        };

        let dataset_root = std::env::var("KOHYA_DATASET_ROOT")
            .ok()
            .filter(|root| !root.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATASET_ROOT.into());

        let cwd = std::env::current_dir().expect("Current directory must be readable");
        let worker_root = std::env::var("WORKER_ROOT").unwrap_or_else(|_| "../worker".into());
        let worker_root = absolute_dir(&cwd, Path::new(&worker_root));

        let dev_user_email =
            std::env::var("DEV_USER_EMAIL").unwrap_or_else(|_| DEFAULT_DEV_USER_EMAIL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            worker,
            dataset_root,
            dataset_base_dir: cwd,
            worker_root,
            dev_user_email,
        }
    }

    /// Directories the file endpoint may serve from.
    pub fn allowed_file_roots(&self) -> Vec<PathBuf> {
        vec![
            self.worker_root.join("storage"),
            self.worker_root.join("datasets"),
        ]
    }
}

/// Make `path` absolute against `base`, resolving `..` through the
/// filesystem when the directory exists.
fn absolute_dir(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    std::fs::canonicalize(&joined).unwrap_or(joined)
}
