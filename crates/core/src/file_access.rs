//! Access rules for serving worker-written files over HTTP.
//!
//! Requested paths are checked lexically before the filesystem is touched:
//! any `..` is rejected outright, and the resolved absolute path must lie
//! under one of the allow-listed storage roots.

use std::path::{Component, Path, PathBuf};

use crate::error::CoreError;

/// Drop `.` components and unify separators without touching the
/// filesystem. Callers reject `..` before reaching this point.
fn normalize_lexically(path: &Path) -> PathBuf {
    let unified = path.to_string_lossy().replace('\\', "/");
    Path::new(&unified)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Resolve a client-supplied file path to an absolute path under one of
/// `allowed_roots`.
///
/// Relative paths are resolved against `worker_root`.
pub fn resolve_storage_file(
    requested: Option<&str>,
    worker_root: &Path,
    allowed_roots: &[PathBuf],
) -> Result<PathBuf, CoreError> {
    let requested = match requested.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return Err(CoreError::Validation("Missing path parameter.".to_string())),
    };

    if requested.contains("..") {
        return Err(CoreError::Validation("Invalid file path.".to_string()));
    }

    let candidate = Path::new(requested);
    let absolute = if candidate.is_absolute() {
        normalize_lexically(candidate)
    } else {
        normalize_lexically(&worker_root.join(candidate))
    };

    let permitted = allowed_roots
        .iter()
        .map(|root| normalize_lexically(root))
        .any(|root| absolute.starts_with(&root));

    if !permitted {
        return Err(CoreError::Forbidden("Access denied.".to_string()));
    }

    Ok(absolute)
}
