//! Builder pattern API for deadasset analysis.
//!
//! ```rust,ignore
//! use deadasset_core::prelude::*;
//!
//! let result = Deadasset::new("/path/to/laravel-app")
//!     .exclude_prefixes(["public/vendor/"])
//!     .ignore_patterns(["*.txt"])
//!     .analyze()?;
//!
//! for file in &result.unused {
//!     println!("Unused: {}", file);
//! }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::DeadassetConfig;
use crate::detect::find_unused;
use crate::error::DeadassetError;
use crate::graph::UsageGraph;
use crate::report::group_by_extension;
use crate::scan::excluded_prefixes;
use crate::script::{build_commands, RemovalCommand};
use crate::trace::{PhaseStats, Tracer};
use crate::vcs::tracked_files;

/// Builder for configuring an unused-file analysis.
#[derive(Debug, Clone)]
pub struct Deadasset {
    /// Project root to analyze
    root: PathBuf,

    /// Extra excluded path prefixes (added to the fixed list)
    excluded_prefixes: Vec<String>,

    /// Patterns for unused files that should not be reported
    ignored_patterns: Vec<String>,
}

impl Deadasset {
    /// Create a new analysis builder for the given project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_prefixes: Vec::new(),
            ignored_patterns: Vec::new(),
        }
    }

    /// Add path prefixes to exclude from candidate enumeration.
    pub fn exclude_prefixes(mut self, prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Add patterns for unused files to leave out of the report.
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Apply ignore/exclude settings from a loaded config file.
    pub fn with_config(self, config: &DeadassetConfig) -> Self {
        self.exclude_prefixes(config.exclude_prefixes().iter().cloned())
            .ignore_patterns(config.ignore_patterns().iter().cloned())
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Run every traversal phase and return the raw usage graph.
    pub fn trace(&self) -> Result<(UsageGraph, Vec<PhaseStats>)> {
        if !self.root.is_dir() {
            return Err(DeadassetError::invalid_argument(format!(
                "project root is not a directory: {}",
                self.root.display()
            ))
            .into());
        }

        let tracer = Tracer::new(&self.root, excluded_prefixes(&self.excluded_prefixes));
        let mut graph = UsageGraph::new();
        let phases = tracer.run(&mut graph);
        Ok((graph, phases))
    }

    /// Run the analysis and return results.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Traverse all phases
        let (graph, phases) = self.trace()?;

        // 2. Candidates minus used, then drop ignored paths
        let (ignored, unused): (Vec<String>, Vec<String>) = find_unused(&graph)
            .into_iter()
            .map(String::from)
            .partition(|path| self.is_ignored(path));

        info!(
            root = %self.root.display(),
            candidates = graph.candidates().len(),
            used = graph.used().len(),
            unused = unused.len(),
            ignored = ignored.len(),
            unresolved = graph.unresolved().len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            root: self.root.clone(),
            total_candidates: graph.candidates().len(),
            used_count: graph.used().len(),
            unused,
            ignored,
            phases,
            graph,
        })
    }

    /// Removal commands for the unused files, using git's tracked-file list.
    pub fn removal_commands(&self, result: &AnalysisResult) -> Vec<RemovalCommand> {
        let tracked = tracked_files(&self.root);
        build_commands(&result.unused, &tracked)
    }

    /// Check if a path matches any ignored pattern.
    fn is_ignored(&self, path: &str) -> bool {
        self.ignored_patterns
            .iter()
            .any(|pattern| matches_pattern(pattern, path))
    }
}

/// `prefix*`, `*suffix`, or a literal matched by equality or containment.
pub fn matches_pattern(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix('*') {
        path.starts_with(prefix)
    } else if let Some(suffix) = pattern.strip_prefix('*') {
        path.ends_with(suffix)
    } else {
        path == pattern || path.contains(pattern)
    }
}

/// Result of running the analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Root path that was analyzed
    pub root: PathBuf,

    /// Number of candidate files found by enumeration
    pub total_candidates: usize,

    /// Size of the used set (includes non-candidate targets)
    pub used_count: usize,

    /// Unused candidates, sorted
    pub unused: Vec<String>,

    /// Unused candidates suppressed by ignore patterns, sorted
    pub ignored: Vec<String>,

    /// Per-phase counters, in execution order
    pub phases: Vec<PhaseStats>,

    /// The accumulated usage graph
    pub graph: UsageGraph,
}

impl AnalysisResult {
    pub fn has_unused(&self) -> bool {
        !self.unused.is_empty()
    }

    /// Unused files grouped by extension.
    pub fn by_extension(&self) -> BTreeMap<String, Vec<String>> {
        group_by_extension(&self.unused)
    }

    /// Share of candidates reported unused, in percent.
    pub fn unused_percentage(&self) -> f64 {
        if self.total_candidates == 0 {
            0.0
        } else {
            (self.unused.len() as f64 / self.total_candidates as f64) * 100.0
        }
    }
}
