//! Git tracked-file lookup.
//!
//! Queried once per run to choose between `git rm -f` and `rm` for each
//! removal command. Any failure (git missing, not a repository, non-zero
//! exit) degrades to an empty set.

use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{DeadassetError, DeadassetResult};

/// Runs `git -C <root> ls-files -z` and returns the tracked paths.
pub fn try_tracked_files(root: &Path) -> DeadassetResult<BTreeSet<String>> {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["ls-files", "-z"])
        .output()
        .map_err(|e| DeadassetError::vcs(format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeadassetError::vcs(format!(
            "git ls-files exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(parse_ls_files(&String::from_utf8_lossy(&output.stdout)))
}

/// Tracked paths under `root`, or an empty set if git cannot answer.
pub fn tracked_files(root: &Path) -> BTreeSet<String> {
    match try_tracked_files(root) {
        Ok(files) => files,
        Err(e) => {
            debug!(error = %e, "treating all files as untracked");
            BTreeSet::new()
        }
    }
}

/// Splits NUL-separated `ls-files -z` output.
pub fn parse_ls_files(output: &str) -> BTreeSet<String> {
    output
        .split('\0')
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
