//! Laravel project root detection.

use std::path::{Path, PathBuf};

/// Files whose presence marks a Laravel project root.
const ROOT_MARKERS: &[&str] = &["artisan", "composer.json"];

/// True if `dir` looks like a Laravel project root.
pub fn is_project_root(dir: &Path) -> bool {
    ROOT_MARKERS.iter().any(|marker| dir.join(marker).is_file())
}

/// Find the project root for `path`.
///
/// Checks `path` itself, then walks up parent directories looking for a
/// root marker. Falls back to the canonical input path when nothing is
/// found, so plain directories can still be analyzed. Returns `None` only
/// if `path` does not exist.
pub fn find_project_root(path: &Path) -> Option<PathBuf> {
    let canonical = path.canonicalize().ok()?;

    let mut current = Some(canonical.as_path());
    while let Some(dir) = current {
        if is_project_root(dir) {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }

    Some(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "deadasset_root_test_{}_{}",
            tag,
            std::process::id()
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_finds_root_from_subdirectory() {
        let root = temp_dir("walkup");
        fs::write(root.join("artisan"), "#!/usr/bin/env php").unwrap();
        let nested = root.join("resources/views/admin");
        fs::create_dir_all(&nested).unwrap();

        let found = find_project_root(&nested).unwrap();
        assert_eq!(found, root.canonicalize().unwrap());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_path_is_none() {
        assert!(find_project_root(Path::new("/definitely/not/here/deadasset")).is_none());
    }
}
