//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use deadasset_core::prelude::*;
//! ```

// Core analysis types
pub use crate::error::{DeadassetError, DeadassetResult};
pub use crate::graph::UsageGraph;

// Builder API
pub use crate::builder::{AnalysisResult, Deadasset};

// Extraction
pub use crate::extract::{extract, FileKind, RawReference};

// Traversal
pub use crate::trace::{Phase, Tracer};

// Detection
pub use crate::detect::find_unused;

// Configuration
pub use crate::config::{load_config, DeadassetConfig};

// Removal script
pub use crate::script::{build_commands, render_script, write_script, RemovalCommand};
