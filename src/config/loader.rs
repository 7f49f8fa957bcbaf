use super::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "poh-storage.toml";

/// Where the loaded configuration came from. The loader runs before the
/// logger exists, so the caller logs this once tracing is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// No file existed; defaults were written to the config path
    Created,
    /// Read from an existing file
    Existing,
}

pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Loader for `poh-storage.toml` next to the executable
    pub fn new() -> Self {
        let exe_path = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
        let exe_dir = exe_path.parent().unwrap_or_else(|| Path::new("."));
        Self::with_path(exe_dir.join(CONFIG_FILE_NAME))
    }

    /// Loader for an explicit config file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self { config_path: config_path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Read the config file, creating it with defaults when it is missing
    pub fn load(&self) -> Result<(Config, ConfigOrigin)> {
        if !self.config_path.exists() {
            let config = Config::default();
            self.save(&config)?;
            return Ok((config, ConfigOrigin::Created));
        }

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file {:?}", self.config_path))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.config_path))?;

        Ok((config, ConfigOrigin::Existing))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_string)
            .with_context(|| format!("Failed to write config file {:?}", self.config_path))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
