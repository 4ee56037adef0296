//! Usage graph accumulation.
//!
//! [`UsageGraph`] holds the whole mutable state of a run:
//! - the candidate set (every file that could be reported as unused)
//! - the used set (every target some analyzed file resolved to)
//! - the reference multimap (target → files that reference it)
//!
//! All three only grow. There is no removal operation; the unused set is
//! computed once at the end as `candidates − used`.
//!
//! Ordered collections keep every iteration deterministic, so two runs over
//! the same tree produce identical sets and identical reports.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graphmap::DiGraphMap;

use crate::extract::RawReference;
use crate::resolve::{resolve, view_path, Resolution};

/// Accumulated reference state for one project.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UsageGraph {
    candidates: BTreeSet<String>,
    used: BTreeSet<String>,
    references: BTreeMap<String, BTreeSet<String>>,
    unresolved: BTreeSet<String>,
}

impl UsageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the candidate set.
    pub fn add_candidate(&mut self, path: impl Into<String>) {
        self.candidates.insert(path.into());
    }

    /// Mark a target as used.
    pub fn mark_used(&mut self, path: impl Into<String>) {
        self.used.insert(path.into());
    }

    /// Record that `source` references `target`.
    pub fn record_edge(&mut self, target: impl Into<String>, source: impl Into<String>) {
        self.references
            .entry(target.into())
            .or_default()
            .insert(source.into());
    }

    /// Keep a raw reference that could not be turned into a path.
    pub fn record_unresolved(&mut self, raw: impl Into<String>) {
        self.unresolved.insert(raw.into());
    }

    /// Resolve one raw reference found in `source` and fold it into the graph.
    ///
    /// Files are marked used and recorded as edges; route paths are recorded
    /// as edges only; unresolvable references are kept aside.
    pub fn apply(&mut self, source: &str, raw: &RawReference) {
        match resolve(raw) {
            Resolution::File(path) => {
                self.record_edge(path.clone(), source);
                self.mark_used(path);
            }
            Resolution::Route(path) => self.record_edge(path, source),
            Resolution::Unresolved(raw) => self.record_unresolved(raw),
        }
    }

    /// True if `path` already appears as a target in the reference multimap.
    pub fn is_edge_target(&self, path: &str) -> bool {
        self.references.contains_key(path)
    }

    /// Loose "is this name mentioned anywhere" check.
    ///
    /// True if `name` is a used path or an edge target, or if it occurs as a
    /// substring of any recorded referencing file. The substring test means a
    /// name contained in an unrelated path counts as referenced.
    pub fn is_referenced(&self, name: &str) -> bool {
        self.used.contains(name)
            || self.references.contains_key(name)
            || self
                .references
                .values()
                .flatten()
                .any(|source| source.contains(name))
    }

    /// Check a dotted view name through its canonical Blade path, then loosely.
    pub fn is_view_referenced(&self, view_name: &str) -> bool {
        self.is_edge_target(&view_path(view_name)) || self.is_referenced(view_name)
    }

    pub fn is_used(&self, path: &str) -> bool {
        self.used.contains(path)
    }

    pub fn is_candidate(&self, path: &str) -> bool {
        self.candidates.contains(path)
    }

    /// Files that reference `target`, in sorted order.
    pub fn referrers(&self, target: &str) -> Vec<&str> {
        self.references
            .get(target)
            .map(|sources| sources.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn candidates(&self) -> &BTreeSet<String> {
        &self.candidates
    }

    pub fn used(&self) -> &BTreeSet<String> {
        &self.used
    }

    pub fn references(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.references
    }

    pub fn unresolved(&self) -> &BTreeSet<String> {
        &self.unresolved
    }

    /// Total number of (target, source) pairs.
    pub fn edge_count(&self) -> usize {
        self.references.values().map(BTreeSet::len).sum()
    }
}

/// Builds a directed `source → target` graph from the reference multimap.
///
/// Uses `DiGraphMap<&str, ()>` so nodes borrow the graph's own strings.
pub fn build_reference_graph(graph: &UsageGraph) -> DiGraphMap<&str, ()> {
    let mut g = DiGraphMap::new();

    for (target, sources) in graph.references() {
        g.add_node(target.as_str());
        for source in sources {
            g.add_edge(source.as_str(), target.as_str(), ());
        }
    }

    g
}
