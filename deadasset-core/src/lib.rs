//! deadasset-core: unused view and asset detection for Laravel projects
//!
//! This library scans a project tree, follows the references that route
//! files, controllers and Blade templates make to one another, and reports
//! the views and static assets nothing points at.
//!
//! Detection is purely textual (regex rules, no PHP parsing), so it can both
//! miss usages and invent them. Treat the output as a review list.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use deadasset_core::prelude::*;
//!
//! let builder = Deadasset::new("/path/to/laravel-app");
//! let result = builder.analyze()?;
//!
//! for file in &result.unused {
//!     println!("Unused: {}", file);
//! }
//!
//! let commands = builder.removal_commands(&result);
//! let script = render_script(builder.root(), &commands, None);
//! ```
//!
//! # Module Organization
//!
//! - [`extract`]: per-kind regex rule tables producing raw references
//! - [`resolve`]: Laravel naming conventions, raw reference → project path
//! - [`graph`]: the usage graph (candidates, used set, reference multimap)
//! - [`trace`]: the five traversal phases
//! - [`scan`]: sorted directory listings and candidate enumeration
//! - [`detect`]: candidates minus used
//! - [`report`]: grouped plain-text and JSON output
//! - [`script`]: shell-quoted removal commands and script rendering
//! - [`vcs`]: git tracked-file lookup
//! - [`builder`]: fluent builder API for configuration
//! - [`error`]: typed error handling
//!
//! # Cargo Features
//!
//! - `dot` (default): Graphviz DOT export of the reference graph

pub mod builder;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod graph;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod resolve;
pub mod root;
pub mod scan;
pub mod script;
pub mod trace;
pub mod vcs;

#[cfg(feature = "dot")]
pub mod visualize;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{DeadassetError, DeadassetResult, IoResultExt};

// Builder API
pub use builder::{matches_pattern, AnalysisResult, Deadasset};

// Configuration
pub use config::{load_config, parse_config, DeadassetConfig, OutputConfig, CONFIG_FILE};

// Detection
pub use detect::find_unused;

// Extraction and resolution
pub use extract::{extract, rules_for, FileKind, RawReference, Rule};
pub use resolve::{
    asset_path, class_path, component_path, controller_path, resolve, view_name_from_path,
    view_path, Resolution,
};

// Graph
pub use graph::{build_reference_graph, UsageGraph};

// Logging
pub use logging::{init_structured_logging, log_error, log_warn};

// Reporting
pub use report::{
    extension_of, group_by_extension, json_report, print_json, print_plain, render_plain,
};

// Root detection
pub use root::{find_project_root, is_project_root};

// File scanning
pub use scan::{
    excluded_prefixes, gather_candidates, gather_files_with_suffix, is_candidate_name,
    list_top_level_files, relative_path, CANDIDATE_SUFFIXES, EXCLUDED_PREFIXES,
};

// Removal script
pub use script::{
    build_commands, render_script, shell_quote, write_script, RemovalCommand, DEFAULT_SCRIPT_NAME,
};

// Traversal
pub use trace::{analyze_file, read_source, Phase, PhaseStats, Tracer, PUBLIC_ENTRY_FILES};

// Version control
pub use vcs::{parse_ls_files, tracked_files, try_tracked_files};

#[cfg(feature = "dot")]
pub use visualize::generate_dot;

#[cfg(test)]
mod tests;
