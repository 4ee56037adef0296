//! Output formatting - plaintext and JSON.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use serde_json::json;

use crate::builder::AnalysisResult;
use crate::script::RemovalCommand;

/// Extension of `path` including the leading dot (`.css`), or `""` if none.
///
/// Only the last suffix counts, so Blade views group under `.php`.
pub fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Group paths by extension; both keys and paths come back sorted.
pub fn group_by_extension<S: AsRef<str>>(paths: &[S]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for path in paths {
        let path = path.as_ref();
        groups
            .entry(extension_of(path))
            .or_default()
            .push(path.to_string());
    }
    for files in groups.values_mut() {
        files.sort();
    }
    groups
}

/// Render unused files grouped by extension.
pub fn render_plain<S: AsRef<str>>(unused: &[S]) -> String {
    let mut out = String::new();

    if unused.is_empty() {
        out.push_str("No unused files found.\n");
        return out;
    }

    let _ = writeln!(out, "Found {} unused files:", unused.len());
    let _ = writeln!(out, "{}", "-".repeat(80));
    for (ext, files) in group_by_extension(unused) {
        let label = if ext.is_empty() { "(no extension)" } else { ext.as_str() };
        let _ = writeln!(out, "\n{} files ({}):", label, files.len());
        for file in files {
            let _ = writeln!(out, "  {}", file);
        }
    }

    out
}

/// Prints unused files in plain text format.
pub fn print_plain<S: AsRef<str>>(unused: &[S]) {
    print!("{}", render_plain(unused));
}

/// Build the JSON report value.
pub fn json_report(result: &AnalysisResult, commands: &[RemovalCommand]) -> serde_json::Value {
    json!({
        "root": result.root.display().to_string(),
        "total_candidates": result.total_candidates,
        "used": result.used_count,
        "unused_count": result.unused.len(),
        "unused_by_extension": group_by_extension(&result.unused),
        "commands": commands.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

/// Minimal report holding only the unused paths.
fn fallback_json(unused: &[String]) -> String {
    json!({ "unused": unused }).to_string()
}

/// Prints the analysis in JSON format.
///
/// Falls back to a minimal hand-built object if serialization fails.
pub fn print_json(result: &AnalysisResult, commands: &[RemovalCommand]) {
    match serde_json::to_string_pretty(&json_report(result, commands)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "JSON serialization failed");
            println!("{}", fallback_json(&result.unused));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("public/css/app.css"), ".css");
        assert_eq!(extension_of("resources/views/a.blade.php"), ".php");
        assert_eq!(extension_of("public/.htaccess"), "");
        assert_eq!(extension_of("LICENSE"), "");
    }

    #[test]
    fn test_group_by_extension_sorted() {
        let groups = group_by_extension(&["public/z.css", "public/a.js", "public/a.css"]);
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec![".css", ".js"]);
        assert_eq!(groups[".css"], vec!["public/a.css", "public/z.css"]);
    }

    #[test]
    fn test_render_plain_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(render_plain(&empty), "No unused files found.\n");
    }

    #[test]
    fn test_render_plain_grouped() {
        let out = render_plain(&["public/js/b.js", "public/css/a.css", "public/js/a.js"]);
        assert!(out.starts_with("Found 3 unused files:\n"));
        let css = out.find(".css files (1):").unwrap();
        let js = out.find(".js files (2):").unwrap();
        assert!(css < js);
        assert!(out.find("  public/js/a.js").unwrap() < out.find("  public/js/b.js").unwrap());
    }

    #[test]
    fn test_fallback_json_escapes_paths() {
        let unused = vec![
            "public/images/it's \"quoted\".png".to_string(),
            "public/odd\\name\u{7}.txt".to_string(),
        ];
        let parsed: serde_json::Value = serde_json::from_str(&fallback_json(&unused)).unwrap();
        assert_eq!(parsed["unused"][0], "public/images/it's \"quoted\".png");
        assert_eq!(parsed["unused"][1], "public/odd\\name\u{7}.txt");
    }
}
