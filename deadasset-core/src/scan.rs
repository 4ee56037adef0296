//! Deterministic file discovery with directory pruning.
//!
//! Two kinds of listing are needed by the traversal:
//! - per-phase listings (`routes/`, controllers, views), sorted so that the
//!   order in which files are analyzed never changes between runs
//! - the full-tree candidate enumeration, filtered by suffix and by a fixed
//!   list of excluded path prefixes
//!
//! Excluded subtrees are pruned via `WalkDir::filter_entry`, so large
//! dependency directories (`vendor/`, `node_modules/`) are never descended.
//! Walk errors (permission denied, vanished entries) are logged and skipped.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Path prefixes never considered as candidates.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "vendor/",
    "node_modules/",
    "storage/",
    "bootstrap/cache/",
    ".git/",
    ".idea/",
    ".vscode/",
    "public/build/",
    "public/storage/",
];

/// File suffixes that make a file a candidate.
pub const CANDIDATE_SUFFIXES: &[&str] = &[
    ".blade.php",
    ".css",
    ".js",
    ".png",
    ".jpg",
    ".jpeg",
    ".gif",
    ".svg",
    ".ico",
    ".webp",
    ".pdf",
    ".txt",
];

/// Project-relative path of `path` with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// True if `relative` starts with any excluded prefix.
pub fn is_excluded(relative: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|prefix| relative.starts_with(prefix.as_str()))
}

/// True if a project-relative file path qualifies as a candidate by name.
///
/// Only Blade templates qualify among `.php` files.
pub fn is_candidate_name(relative: &str) -> bool {
    if relative.ends_with(".php") && !relative.ends_with(".blade.php") {
        return false;
    }
    CANDIDATE_SUFFIXES
        .iter()
        .any(|suffix| relative.ends_with(suffix))
}

/// The fixed exclusion list combined with caller-supplied prefixes.
///
/// Extra prefixes are normalized to end with `/` so `public/vendor` cannot
/// accidentally exclude `public/vendors.css`.
pub fn excluded_prefixes(extra: &[String]) -> Vec<String> {
    let mut all: Vec<String> = EXCLUDED_PREFIXES.iter().map(|s| s.to_string()).collect();
    for prefix in extra {
        let trimmed = prefix.trim_start_matches("./").trim_start_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };
        if !all.contains(&normalized) {
            all.push(normalized);
        }
    }
    all
}

/// Regular files and symlinks to regular files. Symlinked directories are
/// never descended.
fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Enumerates every candidate file under `root`, sorted.
pub fn gather_candidates(root: &Path, excludes: &[String]) -> Vec<String> {
    let mut out = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        // Prune excluded subtrees before descending into them
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            match relative_path(root, e.path()) {
                Some(rel) => !is_excluded(&format!("{}/", rel), excludes),
                None => true,
            }
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry during enumeration");
                continue;
            }
        };
        if !is_file_entry(&entry) {
            continue;
        }
        let Some(rel) = relative_path(root, entry.path()) else {
            continue;
        };
        if is_excluded(&rel, excludes) || !is_candidate_name(&rel) {
            continue;
        }
        out.push(rel);
    }

    out.sort();
    out
}

/// Regular files directly inside `dir`, sorted. Missing directory → empty.
pub fn list_top_level_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(error = %e, dir = %dir.display(), "skipping unreadable entry");
                None
            }
        })
        .filter(is_file_entry)
        .map(|e| e.into_path())
        .collect()
}

/// Files under `dir` (recursively) whose name ends with `suffix`, sorted.
/// Missing directory → empty.
pub fn gather_files_with_suffix(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(error = %e, dir = %dir.display(), "skipping unreadable entry");
                None
            }
        })
        .filter(is_file_entry)
        .filter(|e| e.file_name().to_string_lossy().ends_with(suffix))
        .map(|e| e.into_path())
        .collect()
}
