//! Declarative extraction rules.
//!
//! Each file kind maps to an ordered table of `(name, pattern, handler)`
//! rules. Patterns are compiled once per process and shared between calls.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{FileKind, RawReference};

/// Extensions an `href`/`src` value must end in to count as a static asset.
pub const ASSET_EXTENSIONS: &[&str] = &[
    "css", "js", "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "pdf", "txt",
];

type Handler = fn(&Captures<'_>, &mut Vec<RawReference>);

/// A single compiled extraction rule.
pub struct Rule {
    /// Stable rule name, used in logs and tests
    pub name: &'static str,
    pattern: Regex,
    handler: Handler,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, handler: Handler) -> Self {
        Self {
            name,
            // SAFETY: every pattern is a literal in this file and covered by tests.
            pattern: Regex::new(pattern).expect("Hardcoded regex pattern is valid"),
            handler,
        }
    }

    /// The regex source of this rule.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Run the rule over `content`, appending every produced reference to `out`.
    pub fn apply(&self, content: &str, out: &mut Vec<RawReference>) {
        for caps in self.pattern.captures_iter(content) {
            (self.handler)(&caps, out);
        }
    }
}

fn group(caps: &Captures<'_>, i: usize) -> String {
    caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default()
}

fn is_external(value: &str) -> bool {
    value.starts_with("http") || value.starts_with("//")
}

// ============================================================================
// PHP rules (route definitions and handlers)
// ============================================================================

fn on_use(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    out.push(RawReference::Class(group(caps, 1)));
}

fn on_view_call(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    out.push(RawReference::View(group(caps, 1)));
}

fn on_route_controller(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    out.push(RawReference::Controller {
        route: group(caps, 1),
        class: group(caps, 2),
    });
}

fn on_include(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    out.push(RawReference::Include(group(caps, 1)));
}

fn php_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new("use-statement", r"use\s+([A-Za-z0-9\\]+);", on_use),
            Rule::new("view-call", r#"view\s*\([\s'"]*([^'")]+)[\s'"]*"#, on_view_call),
            Rule::new(
                "route-controller",
                r#"Route::[a-z]+\([\s'"]*([^'"]+)['"],\s*\[?([A-Za-z0-9\\]+Controller)"#,
                on_route_controller,
            ),
            Rule::new(
                "include",
                r#"(?:include|require)(?:_once)?\s*\(?['"]([^'"]+)['"]"#,
                on_include,
            ),
        ]
    })
}

// ============================================================================
// Blade rules
// ============================================================================

fn on_structural_directive(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    let name = group(caps, 1);
    // Plain section/yield names carry no dot.
    if name.contains('.') {
        out.push(RawReference::View(name));
    }
}

fn on_component_tag(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    out.push(RawReference::Component(group(caps, 1)));
}

fn on_asset_attribute(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    let value = group(caps, 1);
    if !is_external(&value) {
        out.push(RawReference::Asset(value));
    }
}

fn bundler_string_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"['"]([^'"]+)['"]"#).expect("Hardcoded regex pattern is valid")
    })
}

fn on_bundler_list(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    let list = group(caps, 1);
    for inner in bundler_string_regex().captures_iter(&list) {
        out.push(RawReference::Bundle(group(&inner, 1)));
    }
}

fn on_bundler_single(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    out.push(RawReference::Bundle(group(caps, 1)));
}

fn on_route_link(caps: &Captures<'_>, out: &mut Vec<RawReference>) {
    let value = group(caps, 1);
    if !value.starts_with("http") && !value.starts_with('#') {
        out.push(RawReference::RoutePath(value));
    }
}

fn blade_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let asset_pattern = format!(
            r#"(?:href|src)=['"]([^'"]+\.(?:{}))['"]"#,
            ASSET_EXTENSIONS.join("|")
        );
        vec![
            Rule::new(
                "structural-directive",
                r#"@(?:include|extends|component|yield|section)\s*\([\s'"]*([^'")]+)[\s'"]*"#,
                on_structural_directive,
            ),
            Rule::new("component-tag", r"<x-([a-z0-9.-]+)", on_component_tag),
            Rule::new("asset-attribute", &asset_pattern, on_asset_attribute),
            Rule::new(
                "bundler-list",
                r"@vite\(\s*\[([^\]]+)\]\s*\)",
                on_bundler_list,
            ),
            Rule::new(
                "bundler-single",
                r#"@vite\(\s*['"]([^'"]+)['"]\s*\)"#,
                on_bundler_single,
            ),
            Rule::new("route-link", r#"(?:action|href)=['"]/?([^'"]+)['"]"#, on_route_link),
        ]
    })
}

/// The ordered rule table for a file kind.
pub fn rules_for(kind: FileKind) -> &'static [Rule] {
    match kind {
        FileKind::RouteDefinition | FileKind::Handler => php_rules(),
        FileKind::ViewTemplate => blade_rules(),
    }
}
