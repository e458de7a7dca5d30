//! Engine configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_RULES_DIR: &str = "rules";
pub const DEFAULT_GATEWAY_START: &str = "gateway:start";
pub const DEFAULT_GATEWAY_END: &str = "gateway:end";

/// Top-level engine configuration.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment (`TENET_RULES_DIR` — the only env knob by contract)
/// 3. Project config (`tenet.toml` in the working root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: RulesConfig,
    pub check: CheckConfig,
}

/// Where the catalog lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Directory holding one TOML file per module.
    pub dir: Option<PathBuf>,
}

/// Check-time knobs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Report format: "console" or "json".
    pub format: Option<String>,
    /// Comment marker opening a gateway region.
    pub gateway_start: Option<String>,
    /// Comment marker closing a gateway region.
    pub gateway_end: Option<String>,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub rules_dir: Option<PathBuf>,
    pub format: Option<String>,
}

impl EngineConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join("tenet.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment
        if let Some(dir) = std::env::var_os("TENET_RULES_DIR") {
            config.rules.dir = Some(PathBuf::from(dir));
        }

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the resolved configuration values.
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        if let Some(ref format) = config.check.format {
            if format != "console" && format != "json" {
                return Err(ConfigError::ValidationFailed {
                    field: "check.format".to_string(),
                    message: format!("unknown format '{format}' (expected 'console' or 'json')"),
                });
            }
        }
        for (field, value) in [
            ("check.gateway_start", &config.check.gateway_start),
            ("check.gateway_end", &config.check.gateway_end),
        ] {
            if let Some(marker) = value {
                if marker.trim().is_empty() {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "marker must not be empty".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolved rules directory (falls back to `./rules`).
    pub fn rules_dir(&self) -> PathBuf {
        self.rules
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_DIR))
    }

    /// Resolved report format (falls back to "console").
    pub fn format(&self) -> &str {
        self.check.format.as_deref().unwrap_or("console")
    }

    /// Resolved gateway region markers.
    pub fn gateway_markers(&self) -> (&str, &str) {
        (
            self.check
                .gateway_start
                .as_deref()
                .unwrap_or(DEFAULT_GATEWAY_START),
            self.check
                .gateway_end
                .as_deref()
                .unwrap_or(DEFAULT_GATEWAY_END),
        )
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut EngineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins where it has a value.
    fn merge(base: &mut EngineConfig, other: &EngineConfig) {
        if other.rules.dir.is_some() {
            base.rules.dir = other.rules.dir.clone();
        }
        if other.check.format.is_some() {
            base.check.format = other.check.format.clone();
        }
        if other.check.gateway_start.is_some() {
            base.check.gateway_start = other.check.gateway_start.clone();
        }
        if other.check.gateway_end.is_some() {
            base.check.gateway_end = other.check.gateway_end.clone();
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut EngineConfig, cli: &CliOverrides) {
        if let Some(ref dir) = cli.rules_dir {
            config.rules.dir = Some(dir.clone());
        }
        if let Some(ref format) = cli.format {
            config.check.format = Some(format.clone());
        }
    }
}
