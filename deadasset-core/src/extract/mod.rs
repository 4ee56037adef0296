//! Reference extraction from route files, handlers and Blade templates.
//!
//! Extraction is purely textual: each file kind owns an ordered table of
//! regex rules (see [`rules`]) and every match becomes a [`RawReference`].
//! Nothing is resolved to a path here; that is the job of
//! [`crate::resolve`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │      rules.rs       │     │       mod.rs        │
//! │  ─────────────────  │     │  ─────────────────  │
//! │  (kind, pattern,    │ ──▶ │  extract(content,   │
//! │   handler) tables   │     │  kind) -> refs      │
//! └─────────────────────┘     └──────────┬──────────┘
//!                                        ▼
//!                             ┌─────────────────────┐
//!                             │     resolve.rs      │
//!                             └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use deadasset_core::extract::{extract, FileKind, RawReference};
//!
//! let refs = extract("@include('admin.users.index')", FileKind::ViewTemplate);
//! assert_eq!(refs, vec![RawReference::View("admin.users.index".into())]);
//! ```

pub mod rules;

use std::fmt;

pub use rules::{rules_for, Rule};

/// The kind of source file being analyzed. Selects the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Top-level file under `routes/`
    RouteDefinition,
    /// Server-side PHP handler (controllers under `app/Http/Controllers`)
    Handler,
    /// Blade view template (`*.blade.php`)
    ViewTemplate,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RouteDefinition => write!(f, "route"),
            Self::Handler => write!(f, "handler"),
            Self::ViewTemplate => write!(f, "template"),
        }
    }
}

/// An unresolved string literal pulled out of source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawReference {
    /// `use Foo\Bar;` namespace import
    Class(String),
    /// Dotted view name from `view(...)` or a structural Blade directive
    View(String),
    /// Controller class bound to a route literal by `Route::<verb>(...)`
    Controller { route: String, class: String },
    /// `include`/`require` literal argument, used verbatim
    Include(String),
    /// `<x-dotted.name` component tag
    Component(String),
    /// `href`/`src` value ending in a known asset extension
    Asset(String),
    /// `@vite(...)` argument, relative to the bundler root
    Bundle(String),
    /// `action`/`href` value that may name a route; kept for traceability only
    RoutePath(String),
}

impl RawReference {
    /// The literal text this reference was built from.
    pub fn literal(&self) -> &str {
        match self {
            Self::Class(s)
            | Self::View(s)
            | Self::Include(s)
            | Self::Component(s)
            | Self::Asset(s)
            | Self::Bundle(s)
            | Self::RoutePath(s) => s,
            Self::Controller { class, .. } => class,
        }
    }
}

/// Extract every raw reference from `content` using the rule table for `kind`.
///
/// References come back in rule-table order, and within a rule in match
/// order. Duplicates are kept; the accumulator is set-based.
pub fn extract(content: &str, kind: FileKind) -> Vec<RawReference> {
    let mut out = Vec::new();
    for rule in rules_for(kind) {
        rule.apply(content, &mut out);
    }
    out
}
