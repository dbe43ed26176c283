/// Connection settings for the worker service.
///
/// Constructed once at startup and handed to [`crate::WorkerApi::new`];
/// tests build one pointing at a mock server.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Worker root URL, e.g. `http://localhost:8000`. A trailing `/api` is
    /// accepted and not duplicated.
    pub base_url: String,
    /// Per-request timeout in seconds. Training and generation calls block
    /// until the worker answers, so this is generous.
    pub timeout_secs: u64,
}

impl WorkerConfig {
    /// Default worker URL used when `WORKER_URL` is unset.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    /// Default request timeout.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Root URL without trailing slashes or `/api` suffix.
    pub fn root_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        trimmed
            .strip_suffix("/api")
            .unwrap_or(trimmed)
            .to_string()
    }

    /// Base URL for the worker's JSON API (`{root}/api`).
    pub fn api_url(&self) -> String {
        format!("{}/api", self.root_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_appends_prefix() {
        let config = WorkerConfig::new("http://localhost:8000");
        assert_eq!(config.api_url(), "http://localhost:8000/api");
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        let config = WorkerConfig::new("http://worker:8000//");
        assert_eq!(config.root_url(), "http://worker:8000");
        assert_eq!(config.api_url(), "http://worker:8000/api");
    }

    #[test]
    fn existing_api_suffix_is_not_duplicated() {
        let config = WorkerConfig::new("http://worker:8000/api/");
        assert_eq!(config.api_url(), "http://worker:8000/api");
        assert_eq!(config.root_url(), "http://worker:8000");
    }
}
