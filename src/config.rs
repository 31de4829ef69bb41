//! Planner configuration module.
//!
//! Handles loading, merging, and validating `iiif-plan.toml`. Stock defaults
//! are serialized to a TOML table and the user file is merged on top, so a
//! config file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! style = "text"   # "text" (numbered listing) or "json"
//! pretty = true    # Pretty-print JSON output
//!
//! [source]
//! width = 0        # Default source width when --width is omitted (0 = none)
//! height = 0       # Default source height when --height is omitted (0 = none)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "iiif-plan.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Planner configuration loaded from `iiif-plan.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanConfig {
    /// How plans are printed.
    pub output: OutputConfig,
    /// Fallback source dimensions.
    pub source: SourceConfig,
}

impl PlanConfig {
    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.source.width == 0) != (self.source.height == 0) {
            return Err(ConfigError::Validation(
                "source.width and source.height must be set together".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub style: OutputStyle,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            style: OutputStyle::Text,
            pretty: true,
        }
    }
}

/// Source dimensions used when the command line omits them. `0` means unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub width: u32,
    pub height: u32,
}

impl SourceConfig {
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        (self.width > 0 && self.height > 0).then_some((self.width, self.height))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PlanConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `iiif-plan.toml` from `dir` as a raw TOML value, if present.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `dir`, merged over stock defaults and validated.
pub fn load_config(dir: &Path) -> Result<PlanConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: PlanConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Fully-commented stock `iiif-plan.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# iiif-plan configuration
# =======================
# Place this file as iiif-plan.toml in the directory passed to --config-dir
# (default: the current directory). Every key is optional.

[output]
# "text" prints a numbered directive listing; "json" prints the directive
# array, one object per directive tagged by "op".
style = "text"
# Pretty-print JSON output.
pretty = true

[source]
# Source image dimensions used when --width/--height are not given.
# 0 means unset; set both or neither.
width = 0
height = 0
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = PlanConfig::default();
        assert_eq!(config.output.style, OutputStyle::Text);
        assert!(config.output.pretty);
        assert_eq!(config.source.dimensions(), None);
    }

    #[test]
    fn parse_partial_config() {
        let config: PlanConfig = toml::from_str("[output]\nstyle = \"json\"\n").unwrap();
        assert_eq!(config.output.style, OutputStyle::Json);
        // Default values preserved
        assert!(config.output.pretty);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: PlanConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.output.style, OutputStyle::Text);
        assert_eq!(config.source.dimensions(), None);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<PlanConfig, _> = toml::from_str("[output]\ncolour = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn half_set_source_fails_validation() {
        let config: PlanConfig = toml::from_str("[source]\nwidth = 100\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output.style, OutputStyle::Text);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[output]\npretty = false\n\n[source]\nwidth = 640\nheight = 480\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert!(!config.output.pretty);
        assert_eq!(config.output.style, OutputStyle::Text);
        assert_eq!(config.source.dimensions(), Some((640, 480)));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[output]\nstyle = \"text\"\npretty = true\n").unwrap();
        let overlay: toml::Value = toml::from_str("[output]\npretty = false\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["output"]["style"].as_str(), Some("text"));
        assert_eq!(merged["output"]["pretty"].as_bool(), Some(false));
    }
}
