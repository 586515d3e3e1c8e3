//! Parser configuration.
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/iosparse/iosparse.toml)
//! - User configuration (~/.iosparse.toml)
//! - Project configuration (./iosparse.toml)
//! - Environment variables

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// IOS auto-numbering increment for ACL rules without a sequence number.
pub const DEFAULT_ACL_SEQUENCE_STEP: u32 = 10;

/// Knobs that change how a configuration is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Emit a warning for every unmodeled line inside a modeled block
    pub warn_unmodeled: bool,

    /// Store interface names in canonical long form (`Gi0/1` -> `GigabitEthernet0/1`)
    pub expand_interface_names: bool,

    /// Warn about `ip access-group` references to undefined ACLs
    pub report_dangling_access_groups: bool,

    /// Increment used to number ACL rules that carry no sequence number
    pub acl_sequence_step: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            warn_unmodeled: true,
            expand_interface_names: true,
            report_dangling_access_groups: true,
            acl_sequence_step: DEFAULT_ACL_SEQUENCE_STEP,
        }
    }
}

/// A configuration file as written; absent keys keep the lower layer's value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    warn_unmodeled: Option<bool>,
    expand_interface_names: Option<bool>,
    report_dangling_access_groups: Option<bool>,
    acl_sequence_step: Option<u32>,
}

impl ParserConfig {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = ParserConfig::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load from a specific file, ignoring the standard locations and the
    /// environment.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let config = ParserConfig::default().merge_from_file(&path_buf)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        // Explicit path takes priority
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = vec![PathBuf::from("/etc/iosparse/iosparse.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".iosparse.toml"));
        }
        paths.push(PathBuf::from("iosparse.toml"));
        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let file: ConfigFile = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            _ => toml::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        Ok(self.merge(file))
    }

    fn merge(&self, file: ConfigFile) -> ParserConfig {
        ParserConfig {
            warn_unmodeled: file.warn_unmodeled.unwrap_or(self.warn_unmodeled),
            expand_interface_names: file
                .expand_interface_names
                .unwrap_or(self.expand_interface_names),
            report_dangling_access_groups: file
                .report_dangling_access_groups
                .unwrap_or(self.report_dangling_access_groups),
            acl_sequence_step: file.acl_sequence_step.unwrap_or(self.acl_sequence_step),
        }
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_flag("IOSPARSE_WARN_UNMODELED") {
            self.warn_unmodeled = value;
        }

        if let Some(value) = env_flag("IOSPARSE_EXPAND_INTERFACE_NAMES") {
            self.expand_interface_names = value;
        }

        if let Some(value) = env_flag("IOSPARSE_REPORT_DANGLING") {
            self.report_dangling_access_groups = value;
        }

        if let Ok(step) = std::env::var("IOSPARSE_ACL_SEQUENCE_STEP") {
            if let Ok(n) = step.trim().parse() {
                self.acl_sequence_step = n;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.acl_sequence_step == 0 {
            anyhow::bail!("acl_sequence_step must be greater than zero");
        }
        Ok(())
    }
}

/// Read a boolean environment variable (`1/0`, `true/false`, `yes/no`, `on/off`).
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
