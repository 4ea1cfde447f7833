//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory holding the logbook files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Term matched against descriptions by the oil-change alert
    #[serde(default)]
    pub service_term: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("carnet")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the data directory: explicit flag, then config, then platform default.
pub fn resolve_data_dir(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.or_else(|| config.data_dir.clone())
        .unwrap_or_else(carnet_store::default_data_dir)
}

/// Resolve the output format: an explicit non-default flag wins, otherwise
/// a configured default applies.
pub fn resolve_format(cmd_format: OutputFormat, config: &Config) -> OutputFormat {
    if cmd_format != OutputFormat::default() {
        return cmd_format;
    }
    match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        Some("csv") => OutputFormat::Csv,
        _ => cmd_format,
    }
}
