//! Configuration file support for sbom-decompose.
//!
//! Provides YAML-based configuration through `sbom-decompose.config.yml`
//! files, and the merge of file values with command-line overrides.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::OutputFormat;
use crate::decomposition::domain::{DecomposeOptions, DEFAULT_MIN_TRANSITIVE_SEVERITY};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-decompose.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    pub min_transitive_severity: Option<f64>,
    pub only_vulnerable: Option<bool>,
    pub max_depth: Option<usize>,
    pub fail_on_vulnerable: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Explicit `--config` wins; otherwise look next to the input SBOM.
pub fn load_for_input(explicit: Option<&Path>, input: &Path) -> Result<Option<ConfigFile>> {
    if let Some(path) = explicit {
        return load_config_from_path(path).map(Some);
    }

    let dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    discover_config(dir)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(severity) = config.min_transitive_severity {
        if !(0.0..=10.0).contains(&severity) {
            bail!(
                "Invalid config: min_transitive_severity must be between 0.0 and 10.0, got {}.\n\n\
                 💡 Hint: Use a CVSS-style score such as 7.0 or 9.0.",
                severity
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line (or through the environment).
///
/// Flags only override when set; an unset flag defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub min_transitive_severity: Option<f64>,
    pub only_vulnerable: bool,
    pub max_depth: Option<usize>,
    pub fail_on_vulnerable: bool,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub options: DecomposeOptions,
    pub fail_on_vulnerable: bool,
}

impl Settings {
    /// Merges with precedence command line > config file > defaults.
    pub fn resolve(overrides: &Overrides, file: Option<&ConfigFile>) -> Result<Self> {
        let format = overrides
            .format
            .or_else(|| file.and_then(|f| f.format))
            .unwrap_or_default();
        let min_transitive_severity = overrides
            .min_transitive_severity
            .or_else(|| file.and_then(|f| f.min_transitive_severity))
            .unwrap_or(DEFAULT_MIN_TRANSITIVE_SEVERITY);
        let max_depth = overrides
            .max_depth
            .or_else(|| file.and_then(|f| f.max_depth))
            .unwrap_or(0);
        let only_vulnerable = overrides.only_vulnerable
            || file.and_then(|f| f.only_vulnerable).unwrap_or(false);
        let fail_on_vulnerable = overrides.fail_on_vulnerable
            || file.and_then(|f| f.fail_on_vulnerable).unwrap_or(false);

        Ok(Self {
            format,
            options: DecomposeOptions::new(min_transitive_severity, only_vulnerable, max_depth)?,
            fail_on_vulnerable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: markdown
min_transitive_severity: 7.0
only_vulnerable: true
max_depth: 4
fail_on_vulnerable: true
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Markdown));
        assert_eq!(config.min_transitive_severity, Some(7.0));
        assert_eq!(config.only_vulnerable, Some(true));
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.fail_on_vulnerable, Some(true));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_format_alias_md() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: md\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Markdown));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: json\nmax_depth: 2\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.max_depth, Some(2));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_for_input_uses_input_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "only_vulnerable: true\n").unwrap();
        let input = dir.path().join("bom.cdx.json");

        let config = load_for_input(None, &input).unwrap().unwrap();
        assert_eq!(config.only_vulnerable, Some(true));
    }

    #[test]
    fn test_load_for_input_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "max_depth: 1\n").unwrap();
        let explicit = dir.path().join("other.yml");
        fs::write(&explicit, "max_depth: 9\n").unwrap();

        let config = load_for_input(Some(&explicit), &dir.path().join("bom.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.max_depth, Some(9));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_severity_out_of_range_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "min_transitive_severity: 11.5\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("must be between 0.0 and 10.0"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: json\ncheck_cve: true\nseverity: high\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("check_cve"));
        assert!(config.unknown_fields.contains_key("severity"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(&Overrides::default(), None).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.options, DecomposeOptions::default());
        assert!(!settings.fail_on_vulnerable);
    }

    #[test]
    fn test_resolve_file_values_apply() {
        let file = ConfigFile {
            format: Some(OutputFormat::Markdown),
            min_transitive_severity: Some(5.5),
            only_vulnerable: Some(true),
            max_depth: Some(3),
            fail_on_vulnerable: Some(true),
            ..Default::default()
        };

        let settings = Settings::resolve(&Overrides::default(), Some(&file)).unwrap();
        assert_eq!(settings.format, OutputFormat::Markdown);
        assert_eq!(settings.options.min_transitive_severity, 5.5);
        assert!(settings.options.only_vulnerable);
        assert_eq!(settings.options.max_depth, 3);
        assert!(settings.fail_on_vulnerable);
    }

    #[test]
    fn test_resolve_overrides_beat_file() {
        let file = ConfigFile {
            format: Some(OutputFormat::Markdown),
            min_transitive_severity: Some(5.5),
            max_depth: Some(3),
            ..Default::default()
        };
        let overrides = Overrides {
            format: Some(OutputFormat::Json),
            min_transitive_severity: Some(9.0),
            max_depth: Some(1),
            ..Default::default()
        };

        let settings = Settings::resolve(&overrides, Some(&file)).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.options.min_transitive_severity, 9.0);
        assert_eq!(settings.options.max_depth, 1);
    }

    #[test]
    fn test_resolve_rejects_invalid_override() {
        let overrides = Overrides {
            min_transitive_severity: Some(-1.0),
            ..Default::default()
        };
        assert!(Settings::resolve(&overrides, None).is_err());
    }
}
