//! Configuration loading from deadasset.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::DeadassetError;

/// Config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "deadasset.toml";

/// Main configuration structure for deadasset.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeadassetConfig {
    /// Path patterns never reported as unused (`prefix*`, `*suffix`, or substring).
    pub ignore: Option<Vec<String>>,
    /// Extra path prefixes excluded from enumeration.
    pub exclude: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
    /// Removal script file name.
    pub script: Option<String>,
}

impl DeadassetConfig {
    pub fn ignore_patterns(&self) -> &[String] {
        self.ignore.as_deref().unwrap_or_default()
    }

    pub fn exclude_prefixes(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or_default()
    }

    /// True if the configured output format is JSON.
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }

    pub fn script_name(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.script.as_deref())
    }
}

/// Parses config text; `path` is only used for error context.
pub fn parse_config(path: &Path, content: &str) -> Result<DeadassetConfig> {
    let cfg: DeadassetConfig = toml::from_str(content)
        .map_err(|e| DeadassetError::config(path, e.to_string()))?;

    if let Some(format) = cfg.output.as_ref().and_then(|o| o.format.as_deref()) {
        if !matches!(format.to_ascii_lowercase().as_str(), "plain" | "json") {
            return Err(DeadassetError::config(
                path,
                format!("unknown output format '{}' (expected \"plain\" or \"json\")", format),
            )
            .into());
        }
    }

    Ok(cfg)
}

/// Loads configuration from deadasset.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<DeadassetConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg = parse_config(&path, &content).context("Invalid deadasset.toml")?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let cfg = parse_config(
            Path::new("deadasset.toml"),
            r#"
ignore = ["resources/views/vendor/*", "*.txt"]
exclude = ["public/vendor/"]

[output]
format = "json"
script = "cleanup.sh"
"#,
        )
        .unwrap();

        assert_eq!(cfg.ignore_patterns(), ["resources/views/vendor/*", "*.txt"]);
        assert_eq!(cfg.exclude_prefixes(), ["public/vendor/"]);
        assert!(cfg.wants_json());
        assert_eq!(cfg.script_name(), Some("cleanup.sh"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let cfg = parse_config(Path::new("deadasset.toml"), "").unwrap();
        assert_eq!(cfg, DeadassetConfig::default());
        assert!(cfg.ignore_patterns().is_empty());
        assert!(!cfg.wants_json());
        assert_eq!(cfg.script_name(), None);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = parse_config(Path::new("deadasset.toml"), "[output]\nformat = \"xml\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config(Path::new("deadasset.toml"), "ignored = []\n").is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = std::env::temp_dir().join(format!("deadasset_config_none_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert!(load_config(&dir).unwrap().is_none());
        std::fs::remove_dir_all(&dir).ok();
    }
}
