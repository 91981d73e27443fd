//! Configuration loading and config file resolution
//!
//! Config file resolution follows a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. `ABMD_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/abmd/<module>.toml`)
//! 4. Compiled defaults (fallback)
//!
//! Sections are deserialized with every field optional. Crates that consume
//! a section own its defaults and validation.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ABMD_CONFIG";

/// Default log level when neither the config file nor RUST_LOG set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Chapter alignment tuning (optional)
    #[serde(default)]
    pub alignment: AlignmentSection,

    /// Shared attribute shaping (optional)
    #[serde(default)]
    pub attributes: AttributeSection,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// `[alignment]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlignmentSection {
    /// Ordered strategy names; order is the order they are tried in
    pub strategies: Option<Vec<String>>,
    /// Whether embedded track numbers may be trusted
    pub trust_local_numbering: Option<bool>,
    /// Average distance below which local titles count as template variants
    pub noise_threshold: Option<f64>,
    /// Minimum share of titles that must keep content after affix stripping
    pub affix_commonness_threshold: Option<f64>,
    /// Cost of an edit operation touching a digit
    pub digit_edit_cost: Option<u32>,
    /// What to do when no strategy applies ("reject" or "remote_order")
    pub unmatched_policy: Option<String>,
}

/// `[attributes]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSection {
    pub include_narrator_in_artists: Option<bool>,
    pub keep_series_reference_in_title: Option<bool>,
    pub keep_series_reference_in_subtitle: Option<bool>,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` argument; file must exist
    CommandLine(PathBuf),
    /// `ABMD_CONFIG` environment variable; file must exist
    Environment(PathBuf),
    /// Platform config directory; file may be absent
    PlatformDefault(PathBuf),
    /// No config file location could be determined
    CompiledDefaults,
}

impl ConfigSource {
    /// Path of the config file, if this source names one
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformDefault(p) => Some(p),
            ConfigSource::CompiledDefaults => None,
        }
    }

    /// Whether a missing file at this location is an error
    pub fn is_explicit(&self) -> bool {
        matches!(
            self,
            ConfigSource::CommandLine(_) | ConfigSource::Environment(_)
        )
    }
}

/// Resolves and loads the TOML config for one module
pub struct ConfigResolver {
    module_name: String,
}

impl ConfigResolver {
    /// Create resolver for a module (e.g. "abmd-ai")
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    /// Determine which config source applies
    pub fn resolve(&self, cli_arg: Option<&Path>) -> ConfigSource {
        // Priority 1: Command-line argument
        if let Some(path) = cli_arg {
            return ConfigSource::CommandLine(path.to_path_buf());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return ConfigSource::Environment(PathBuf::from(path));
            }
        }

        // Priority 3: Platform config directory
        if let Some(dir) = dirs::config_dir() {
            let file_name = format!("{}.toml", self.module_name);
            return ConfigSource::PlatformDefault(dir.join("abmd").join(file_name));
        }

        // Priority 4: Compiled defaults
        ConfigSource::CompiledDefaults
    }

    /// Resolve and load the configuration
    ///
    /// A missing file at the platform default location falls back to
    /// compiled defaults. A missing file named explicitly is an error.
    pub fn load(&self, cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
        let source = self.resolve(cli_arg);

        let config = match source.path() {
            Some(path) if path.exists() => load_toml_config(path)?,
            Some(path) if source.is_explicit() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                info!(
                    path = %path.display(),
                    "No config file found, using compiled defaults"
                );
                TomlConfig::default()
            }
            None => {
                info!("Could not determine config directory, using compiled defaults");
                TomlConfig::default()
            }
        };

        Ok((config, source))
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    debug!(path = %path.display(), "Loading config file");
    let content = std::fs::read_to_string(path)?;
    parse_toml_config(&content)
        .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))
}

/// Parse TOML config text
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_toml_config("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.alignment.strategies.is_none());
        assert!(config.attributes.include_narrator_in_artists.is_none());
    }

    #[test]
    fn test_parse_alignment_section() {
        let config = parse_toml_config(
            r#"
            [alignment]
            strategies = ["leading_number", "greedy_nearest"]
            trust_local_numbering = false
            noise_threshold = 3.5
            digit_edit_cost = 12
            "#,
        )
        .unwrap();

        assert_eq!(
            config.alignment.strategies,
            Some(vec!["leading_number".to_string(), "greedy_nearest".to_string()])
        );
        assert_eq!(config.alignment.trust_local_numbering, Some(false));
        assert_eq!(config.alignment.noise_threshold, Some(3.5));
        assert_eq!(config.alignment.digit_edit_cost, Some(12));
        assert!(config.alignment.unmatched_policy.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse_toml_config("[alignment]\nnoise = 4\n");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_cli_argument_wins() {
        let resolver = ConfigResolver::new("abmd-ai");
        let source = resolver.resolve(Some(Path::new("/tmp/explicit.toml")));
        assert_eq!(
            source,
            ConfigSource::CommandLine(PathBuf::from("/tmp/explicit.toml"))
        );
        assert!(source.is_explicit());
    }

    #[test]
    fn test_compiled_defaults_has_no_path() {
        assert!(ConfigSource::CompiledDefaults.path().is_none());
        assert!(!ConfigSource::CompiledDefaults.is_explicit());
    }
}
