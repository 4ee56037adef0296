//! deadasset CLI - unused view and asset detector for Laravel projects.
//!
//! Features:
//! - Automatic project root detection (artisan / composer.json)
//! - Route -> controller -> view -> asset reference tracing
//! - Git-aware removal script generation
//! - Graphviz DOT visualization of the reference graph

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use deadasset_core::{
    find_project_root, generate_dot, init_structured_logging, load_config, log_error, log_warn,
    print_json, print_plain, render_script, write_script, Deadasset, DeadassetConfig,
    DEFAULT_SCRIPT_NAME,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Unused view and asset detector for Laravel")]
pub struct Cli {
    /// Path to the Laravel project (or any directory inside it)
    #[arg(default_value = ".")]
    path: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Path patterns to leave out of the report (`prefix*`, `*suffix`, or substring)
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Extra path prefixes to exclude from candidate enumeration
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Removal script file name (relative to the current directory)
    #[arg(long, value_name = "FILE")]
    script: Option<String>,

    /// Do not write a removal script
    #[arg(long)]
    no_script: bool,

    /// Generate Graphviz DOT output for the reference graph
    #[arg(long)]
    dot: bool,

    /// Write DOT output to a specified file instead of stdout
    #[arg(long, value_name = "FILE")]
    dot_file: Option<String>,

    /// Show which files reference the given project-relative path
    #[arg(long, value_name = "PATH")]
    explain: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

/// Security: Validates output file paths to prevent path traversal attacks.
///
/// Rejects:
/// - Absolute paths (must be relative to current directory)
/// - Paths containing `..` (parent directory traversal)
/// - Paths with null bytes (injection attacks)
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    for component in p.components() {
        if matches!(component, std::path::Component::ParentDir) {
            return Err(anyhow!(
                "Path traversal (..) not allowed in output paths: {}",
                path
            ));
        }
    }

    // Backslash-separated traversal is not a ParentDir component on Unix.
    let normalized = path.replace('\\', "/");
    if normalized.contains("/../") || normalized.starts_with("../") {
        return Err(anyhow!("Path traversal attempt detected: {}", path));
    }

    Ok(p)
}

/// Loads deadasset.toml from the project root, warning instead of failing.
fn load_config_or_default(root: &Path) -> DeadassetConfig {
    match load_config(root) {
        Ok(Some(cfg)) => cfg,
        Ok(None) => DeadassetConfig::default(),
        Err(e) => {
            eprintln!("[WARN] config load failed: {:#}", e);
            DeadassetConfig::default()
        }
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] deadasset internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
    }));

    let cli = Cli::parse();

    init_structured_logging(cli.log_json);

    // 1. Determine project root
    let input_path = Path::new(&cli.path);
    let root = find_project_root(input_path)
        .with_context(|| format!("Failed to find project root from: {}", cli.path))?;

    // 2. Merge deadasset.toml with command-line flags (flags win for scalars)
    let config = load_config_or_default(&root);
    let json = cli.json || config.wants_json();
    let script_name = cli
        .script
        .clone()
        .or_else(|| config.script_name().map(String::from))
        .unwrap_or_else(|| DEFAULT_SCRIPT_NAME.to_string());
    let script_path = if cli.no_script {
        None
    } else {
        Some(validate_output_path(&script_name)?)
    };

    // 3. Trace and detect
    let builder = Deadasset::new(&root)
        .with_config(&config)
        .exclude_prefixes(cli.exclude.iter().cloned())
        .ignore_patterns(cli.ignore.iter().cloned());

    if !json {
        println!("Analyzing used files in {} ...", root.display());
    }
    let result = builder
        .analyze()
        .with_context(|| format!("Failed to analyze project: {}", root.display()))?;

    // 4. Removal commands (git-aware)
    let commands = builder.removal_commands(&result);

    // 5. Report results
    if json {
        print_json(&result, &commands);
    } else {
        println!();
        print_plain(&result.unused);
    }

    // 6. Reference explanation (if requested)
    if let Some(ref target) = cli.explain {
        let referrers = result.graph.referrers(target);
        if referrers.is_empty() {
            eprintln!("{}: no recorded references", target);
        } else {
            eprintln!("{} is referenced by:", target);
            for source in referrers {
                eprintln!("  {}", source);
            }
        }
    }

    // 7. Removal script
    if let Some(safe_path) = script_path {
        let script = render_script(&root, &commands, Some(Utc::now()));
        write_script(&safe_path, &script)?;

        if json {
            eprintln!("Commands saved to: {}", safe_path.display());
        } else {
            println!("\n{}", "=".repeat(80));
            println!("COMMANDS TO REMOVE UNUSED FILES:");
            println!("{}", "=".repeat(80));
            println!("\nCommands saved to: {}", safe_path.display());
            println!(
                "To run: chmod +x {0} && ./{0}",
                safe_path.display()
            );
        }
    }

    // 8. DOT/Graphviz output (safe - don't crash on write errors)
    if cli.dot || cli.dot_file.is_some() {
        let dot = generate_dot(&result.graph);
        if let Some(ref file) = cli.dot_file {
            match validate_output_path(file) {
                Ok(safe_path) => {
                    if let Err(e) = fs::write(&safe_path, &dot) {
                        log_warn(&format!("DOT write failed to {}: {}", safe_path.display(), e));
                    }
                }
                Err(e) => {
                    log_error(&format!("Invalid output path: {}", e));
                    std::process::exit(2);
                }
            }
        } else if json {
            // stdout carries the JSON document
            eprintln!("{}", dot);
        } else {
            println!("{}", dot);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_output_path_accepts_relative() {
        assert_eq!(
            validate_output_path("remove_unused_files.sh").unwrap(),
            PathBuf::from("remove_unused_files.sh")
        );
        assert!(validate_output_path("out/graph.dot").is_ok());
    }

    #[test]
    fn test_validate_output_path_rejects_absolute() {
        assert!(validate_output_path("/tmp/x.sh").is_err());
    }

    #[test]
    fn test_validate_output_path_rejects_traversal() {
        assert!(validate_output_path("../x.sh").is_err());
        assert!(validate_output_path("a/../../x.sh").is_err());
        assert!(validate_output_path("a\\..\\x.sh").is_err());
    }

    #[test]
    fn test_validate_output_path_rejects_null_bytes() {
        assert!(validate_output_path("x\0.sh").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["deadasset"]);
        assert_eq!(cli.path, ".");
        assert!(!cli.json);
        assert!(cli.script.is_none());
        assert!(!cli.no_script);
    }

    #[test]
    fn test_cli_multi_value_flags() {
        let cli = Cli::parse_from([
            "deadasset",
            "app",
            "--ignore",
            "*.txt",
            "legacy",
            "--exclude",
            "public/vendor/",
        ]);
        assert_eq!(cli.path, "app");
        assert_eq!(cli.ignore, vec!["*.txt", "legacy"]);
        assert_eq!(cli.exclude, vec!["public/vendor/"]);
    }
}
