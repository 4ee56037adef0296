//! Phase-ordered traversal of a Laravel project.
//!
//! Five phases run once each, in this order:
//!
//! 1. **Routes**: every top-level file under `routes/` is marked used and analyzed.
//! 2. **Controllers**: a controller is marked used and analyzed only if its
//!    path is already an edge target, or its class name passes the loose
//!    [`UsageGraph::is_referenced`] check.
//! 3. **Templates**: a Blade view is marked used and analyzed only if its
//!    path is already an edge target, or its dotted name passes
//!    [`UsageGraph::is_view_referenced`].
//! 4. **Assets**: well-known public entry files are marked used if present.
//! 5. **Enumeration**: the full tree is walked to build the candidate set.
//!
//! Each phase receives the [`UsageGraph`] explicitly, so a phase can be run
//! and tested on its own. Within a phase files are visited in sorted order;
//! a view marked late in the templates phase does not cause earlier views to
//! be revisited.
//!
//! A file that cannot be read or decoded is logged and skipped. Missing
//! directories simply make a phase empty.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::error::{DeadassetResult, IoResultExt};
use crate::extract::{extract, FileKind};
use crate::graph::UsageGraph;
use crate::resolve::{view_name_from_path, BLADE_SUFFIX, CONTROLLERS_DIR, PUBLIC_DIR, ROUTES_DIR, VIEWS_DIR};
use crate::scan::{gather_candidates, gather_files_with_suffix, list_top_level_files, relative_path};

/// Public files that are always in use when present.
pub const PUBLIC_ENTRY_FILES: &[&str] = &["index.php", ".htaccess", "robots.txt", "favicon.ico"];

/// One traversal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Routes,
    Controllers,
    Templates,
    Assets,
    Enumeration,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 5] = [
        Phase::Routes,
        Phase::Controllers,
        Phase::Templates,
        Phase::Assets,
        Phase::Enumeration,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Routes => write!(f, "routes"),
            Self::Controllers => write!(f, "controllers"),
            Self::Templates => write!(f, "templates"),
            Self::Assets => write!(f, "assets"),
            Self::Enumeration => write!(f, "enumeration"),
        }
    }
}

/// Counters for a single phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseStats {
    pub phase: Phase,
    /// Files looked at by the phase
    pub visited: usize,
    /// Files marked used (or, for enumeration, added as candidates)
    pub marked: usize,
    /// Files whose content was extracted successfully
    pub analyzed: usize,
    /// Files skipped because they could not be read or decoded
    pub failed: usize,
}

impl PhaseStats {
    fn new(phase: Phase) -> Self {
        Self {
            phase,
            visited: 0,
            marked: 0,
            analyzed: 0,
            failed: 0,
        }
    }
}

/// Reads a source file as UTF-8 text.
pub fn read_source(path: &Path) -> DeadassetResult<String> {
    fs::read_to_string(path).with_path(path)
}

/// Extracts every reference in `path` and folds it into `graph`.
///
/// `source` is the project-relative name recorded on each edge. Returns the
/// number of raw references found.
pub fn analyze_file(
    path: &Path,
    source: &str,
    kind: FileKind,
    graph: &mut UsageGraph,
) -> DeadassetResult<usize> {
    let content = read_source(path)?;
    let refs = extract(&content, kind);
    for raw in &refs {
        graph.apply(source, raw);
    }
    debug!(file = %source, kind = %kind, references = refs.len(), "analyzed");
    Ok(refs.len())
}

/// Drives the five phases over one project root.
#[derive(Debug, Clone)]
pub struct Tracer {
    root: PathBuf,
    excludes: Vec<String>,
}

impl Tracer {
    /// `excludes` is the complete list of excluded path prefixes used by the
    /// enumeration phase (see [`crate::scan::excluded_prefixes`]).
    pub fn new(root: impl Into<PathBuf>, excludes: Vec<String>) -> Self {
        Self {
            root: root.into(),
            excludes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs every phase in order.
    pub fn run(&self, graph: &mut UsageGraph) -> Vec<PhaseStats> {
        Phase::ALL
            .iter()
            .map(|phase| self.run_phase(*phase, graph))
            .collect()
    }

    /// Runs a single phase.
    pub fn run_phase(&self, phase: Phase, graph: &mut UsageGraph) -> PhaseStats {
        let stats = match phase {
            Phase::Routes => self.routes_phase(graph),
            Phase::Controllers => self.controllers_phase(graph),
            Phase::Templates => self.templates_phase(graph),
            Phase::Assets => self.assets_phase(graph),
            Phase::Enumeration => self.enumeration_phase(graph),
        };
        debug!(
            phase = %stats.phase,
            visited = stats.visited,
            marked = stats.marked,
            analyzed = stats.analyzed,
            failed = stats.failed,
            used = graph.used().len(),
            "phase complete"
        );
        stats
    }

    fn analyze_into(
        &self,
        path: &Path,
        source: &str,
        kind: FileKind,
        graph: &mut UsageGraph,
        stats: &mut PhaseStats,
    ) {
        match analyze_file(path, source, kind, graph) {
            Ok(_) => stats.analyzed += 1,
            Err(e) if e.is_recoverable() => {
                warn!(file = %path.display(), error = %e, "failed to analyze file, skipping");
                stats.failed += 1;
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "unexpected analysis failure, skipping");
                stats.failed += 1;
            }
        }
    }

    fn routes_phase(&self, graph: &mut UsageGraph) -> PhaseStats {
        let mut stats = PhaseStats::new(Phase::Routes);

        for path in list_top_level_files(&self.root.join(ROUTES_DIR)) {
            let Some(rel) = relative_path(&self.root, &path) else {
                continue;
            };
            stats.visited += 1;
            graph.mark_used(rel.clone());
            stats.marked += 1;
            self.analyze_into(&path, &rel, FileKind::RouteDefinition, graph, &mut stats);
        }

        stats
    }

    fn controllers_phase(&self, graph: &mut UsageGraph) -> PhaseStats {
        let mut stats = PhaseStats::new(Phase::Controllers);

        for path in gather_files_with_suffix(&self.root.join(CONTROLLERS_DIR), ".php") {
            let Some(rel) = relative_path(&self.root, &path) else {
                continue;
            };
            stats.visited += 1;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            if graph.is_edge_target(&rel) || graph.is_referenced(&stem) {
                graph.mark_used(rel.clone());
                stats.marked += 1;
                self.analyze_into(&path, &rel, FileKind::Handler, graph, &mut stats);
            }
        }

        stats
    }

    fn templates_phase(&self, graph: &mut UsageGraph) -> PhaseStats {
        let mut stats = PhaseStats::new(Phase::Templates);

        for path in gather_files_with_suffix(&self.root.join(VIEWS_DIR), BLADE_SUFFIX) {
            let Some(rel) = relative_path(&self.root, &path) else {
                continue;
            };
            let Some(view_name) = view_name_from_path(&rel) else {
                continue;
            };
            stats.visited += 1;

            if graph.is_edge_target(&rel) || graph.is_view_referenced(&view_name) {
                graph.mark_used(rel.clone());
                stats.marked += 1;
                self.analyze_into(&path, &rel, FileKind::ViewTemplate, graph, &mut stats);
            }
        }

        stats
    }

    fn assets_phase(&self, graph: &mut UsageGraph) -> PhaseStats {
        let mut stats = PhaseStats::new(Phase::Assets);
        let public = self.root.join(PUBLIC_DIR);

        for name in PUBLIC_ENTRY_FILES {
            stats.visited += 1;
            if public.join(name).exists() {
                graph.mark_used(format!("{}/{}", PUBLIC_DIR, name));
                stats.marked += 1;
            }
        }

        stats
    }

    fn enumeration_phase(&self, graph: &mut UsageGraph) -> PhaseStats {
        let mut stats = PhaseStats::new(Phase::Enumeration);

        for rel in gather_candidates(&self.root, &self.excludes) {
            stats.visited += 1;
            stats.marked += 1;
            graph.add_candidate(rel);
        }

        stats
    }
}
