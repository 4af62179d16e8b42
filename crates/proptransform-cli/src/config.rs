//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML, chosen by extension)
//! - Command-line arguments, applied by the caller on top

use crate::error::{Error, Result};
use proptransform_core::{BuiltinTransform, TransformRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name stem searched for in the working and home directories
const CONFIG_STEM: &str = ".proptransform";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transformation type used when `--type` is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,

    /// Extra identifiers, each naming a built-in transformation
    pub aliases: BTreeMap<String, String>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// On-disk configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => FileFormat::Json,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Yaml,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, FileFormat::from_path(path))
    }

    fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let config = match format {
            FileFormat::Yaml if content.trim().is_empty() => Self::default(),
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Runs before logging is set up, so broken files are reported on stderr.
    pub fn load() -> Result<Self> {
        let (config, skipped) = Self::load_first(&Self::default_config_paths());
        for (path, e) in &skipped {
            eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
        }
        Ok(config)
    }

    /// Load the first existing file among `paths` that parses
    ///
    /// Also returns every existing file that failed to load, in order.
    pub fn load_first(paths: &[PathBuf]) -> (Self, Vec<(PathBuf, Error)>) {
        let mut skipped = Vec::new();
        for path in paths.iter().filter(|p| p.exists()) {
            match Self::from_file(path) {
                Ok(config) => return (config, skipped),
                Err(e) => skipped.push((path.clone(), e)),
            }
        }
        (Self::default(), skipped)
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Default configuration file paths, in lookup order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let extensions = ["yaml", "json", "toml"];
        let mut paths = Vec::new();

        // Current directory
        for ext in extensions {
            paths.push(PathBuf::from(format!("{}.{}", CONFIG_STEM, ext)));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let dir = config_dir.join("proptransform");
            for ext in extensions {
                paths.push(dir.join(format!("config.{}", ext)));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for ext in extensions {
                paths.push(home_dir.join(format!("{}.{}", CONFIG_STEM, ext)));
            }
        }

        paths
    }

    /// Serialize in the format implied by `path`'s extension
    pub fn render_for(&self, path: &Path) -> Result<String> {
        self.render(FileFormat::from_path(path))
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> Result<String> {
        self.render(FileFormat::Yaml)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        self.render(FileFormat::Json)
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        self.render(FileFormat::Toml)
    }

    fn render(&self, format: FileFormat) -> Result<String> {
        let content = match format {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.render_for(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a registry holding the built-ins plus every configured alias
    pub fn build_registry(&self) -> Result<Arc<TransformRegistry>> {
        let registry = TransformRegistry::with_builtins();
        for (alias, target) in &self.aliases {
            let kind: BuiltinTransform = target.parse().map_err(|_| {
                Error::config(format!(
                    "alias \"{}\" targets unknown built-in \"{}\"",
                    alias, target
                ))
            })?;
            registry.register_builtin(alias.clone(), kind);
        }
        Ok(Arc::new(registry))
    }
}
