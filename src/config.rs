//! Tool configuration.
//!
//! Everything works without a config file. To change a default, drop a
//! `.raw-image-urls.toml` into the repository root:
//!
//! ```text
//! my-photos/
//! ├── .git/
//! ├── .raw-image-urls.toml   # optional
//! ├── kitchen/
//! │   └── 001.jpg
//! └── lobby.JPEG
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! remote = "origin"               # Remote whose URL names the GitHub repo
//!
//! [scan]
//! extensions = ["jpg", "jpeg"]    # Matched case-insensitively, no leading dot
//! skip_dirs = [".git"]            # Directory names pruned from the walk
//!
//! [outputs]
//! urls = "image_urls_only.txt"    # One URL per line
//! json = "image_data.json"        # Full bundle, pretty-printed
//! csv = "image_data.csv"          # filename,url,size_bytes,size_mb
//!
//! [console]
//! sample_urls = 5                 # URLs previewed by `export`
//! ```
//!
//! The file is sparse: values it leaves out keep their stock defaults.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the repository root.
pub const CONFIG_FILE_NAME: &str = ".raw-image-urls.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `.raw-image-urls.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote whose URL identifies the GitHub repository.
    pub remote: String,
    pub scan: ScanConfig,
    pub outputs: OutputsConfig,
    pub console: ConsoleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            scan: ScanConfig::default(),
            outputs: OutputsConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl Config {
    /// Reject values that would make the run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.trim().is_empty() {
            return Err(ConfigError::Validation("remote must not be empty".into()));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self.scan.extensions.iter().find(|e| e.starts_with('.')) {
            return Err(ConfigError::Validation(format!(
                "scan.extensions entries are written without the dot, got {ext:?}"
            )));
        }
        for (key, name) in [
            ("outputs.urls", &self.outputs.urls),
            ("outputs.json", &self.outputs.json),
            ("outputs.csv", &self.outputs.csv),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Which files the walk picks up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Image extensions, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Directory names whose whole subtree is skipped.
    pub skip_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".into(), "jpeg".into()],
            skip_dirs: vec![".git".into()],
        }
    }
}

/// File names written by `export`, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputsConfig {
    pub urls: String,
    pub json: String,
    pub csv: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            urls: "image_urls_only.txt".into(),
            json: "image_data.json".into(),
            csv: "image_data.csv".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// How many URLs `export` previews on stdout.
    pub sample_urls: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { sample_urls: 5 }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Config::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so an
///   `extensions` array is replaced, not appended to.
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

/// Load the config file from `root` as a raw TOML value.
///
/// Returns `Ok(None)` if there is no config file.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config for the repository at `root`.
pub fn load_config(root: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// A fully-commented stock config file, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# raw-image-urls configuration
# ============================
# Save as .raw-image-urls.toml in the repository root.
# All settings are optional; values shown are the defaults.
# Unknown keys will cause an error.

# Remote whose URL identifies the GitHub repository.
# Only https://github.com/<owner>/<repo>(.git) remotes are supported.
remote = "origin"

# ---------------------------------------------------------------------------
# Image discovery
# ---------------------------------------------------------------------------
[scan]
# File extensions treated as images, without the leading dot.
# Matching is case-insensitive: "jpg" also matches PHOTO.JPG.
extensions = ["jpg", "jpeg"]

# Directory names pruned from the walk, at any depth.
skip_dirs = [".git"]

# ---------------------------------------------------------------------------
# Files written by `export` (relative to --output)
# ---------------------------------------------------------------------------
[outputs]
urls = "image_urls_only.txt"
json = "image_data.json"
csv = "image_data.csv"

# ---------------------------------------------------------------------------
# Console
# ---------------------------------------------------------------------------
[console]
# Number of URLs previewed by `export`.
sample_urls = 5
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.scan.extensions, vec!["jpg", "jpeg"]);
        assert_eq!(config.scan.skip_dirs, vec![".git"]);
        assert_eq!(config.outputs.urls, "image_urls_only.txt");
        assert_eq!(config.outputs.json, "image_data.json");
        assert_eq!(config.outputs.csv, "image_data.csv");
        assert_eq!(config.console.sample_urls, 5);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[console]
sample_urls = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.console.sample_urls, 10);
        // Defaults preserved
        assert_eq!(config.remote, "origin");
        assert_eq!(config.scan.extensions, vec!["jpg", "jpeg"]);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: Config = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, Config::default());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
remote = "upstream"

[scan]
extensions = ["jpg", "png"]
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.scan.extensions, vec!["jpg", "png"]);
        // Sibling key in the same table keeps its default
        assert_eq!(config.scan.skip_dirs, vec![".git"]);
        assert_eq!(config.outputs, OutputsConfig::default());
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
[outputs]
jsn = "data.json"
"#,
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err().to_string();
        assert!(err.contains("unknown field"), "got: {err}");
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<Config, _> = toml::from_str("[scna]\nextensions = []\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn empty_extensions_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[scan]\nextensions = []\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn dotted_extension_rejected() {
        let mut config = Config::default();
        config.scan.extensions = vec![".jpg".into()];
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains(".jpg"));
    }

    #[test]
    fn empty_output_name_rejected() {
        let mut config = Config::default();
        config.outputs.csv = " ".into();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("outputs.csv"));
    }

    #[test]
    fn empty_remote_rejected() {
        let mut config = Config::default();
        config.remote = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("remote = \"origin\"").unwrap();
        let overlay: toml::Value = toml::from_str("remote = \"fork\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["remote"].as_str(), Some("fork"));
    }

    #[test]
    fn merge_toml_array_replaced_not_appended() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[scan]\nextensions = [\"png\"]").unwrap();
        let merged = merge_toml(base, overlay);
        let exts = merged["scan"]["extensions"].as_array().unwrap();
        assert_eq!(exts.len(), 1);
        assert_eq!(exts[0].as_str(), Some("png"));
        assert!(merged["scan"].get("skip_dirs").is_some());
    }
}
