//! Dataset directory inspection.

use std::path::{Path, PathBuf};

/// Resolve a dataset path against `base` unless it is already absolute.
pub fn resolve_dataset_dir(dataset_path: &str, base: &Path) -> PathBuf {
    let path = Path::new(dataset_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Count the regular files directly inside `dir`.
///
/// A missing or unreadable directory counts as empty; subdirectories are
/// not descended into.
pub async fn count_dataset_items(dir: &Path) -> usize {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(_) => return 0,
    };

    let mut count = 0;
    while let Ok(Some(entry)) = entries.next_entry().await {
        if matches!(entry.file_type().await, Ok(ft) if ft.is_file()) {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_base() {
        let resolved = resolve_dataset_dir("datasets/ava", Path::new("/srv/studio"));
        assert_eq!(resolved, PathBuf::from("/srv/studio/datasets/ava"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let resolved = resolve_dataset_dir("/data/ava", Path::new("/srv/studio"));
        assert_eq!(resolved, PathBuf::from("/data/ava"));
    }

    #[tokio::test]
    async fn counts_only_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"a").unwrap();
        std::fs::write(dir.path().join("b.png"), b"b").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.png"), b"c").unwrap();

        assert_eq!(count_dataset_items(dir.path()).await, 2);
    }

    #[tokio::test]
    async fn missing_directory_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_dataset_items(&dir.path().join("absent")).await, 0);
    }
}
