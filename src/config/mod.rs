//! Settings for pvsadm itself
//!
//! Settings are layered with figment: embedded defaults, then the user config,
//! then a `pvsadm.toml` in the working directory, then `PVSADM_` environment
//! variables. They only tune the tool (logging); credentials and the audit
//! file are never read from here.

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-local settings file
const LOCAL_CONFIG: &str = "pvsadm.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub log: LogSettings,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Base `EnvFilter` directive
    pub level: String,

    /// Show the module each line comes from
    #[serde(default)]
    pub target: bool,

    /// Prefix lines with a timestamp
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

fn default_timestamps() -> bool {
    true
}

impl Settings {
    /// Load settings from the standard locations.
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment(Self::user_config_path(), Some(LOCAL_CONFIG.into())))
    }

    /// Build the provider chain. Missing files are skipped.
    pub fn figment(user_config: Option<PathBuf>, local_config: Option<PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(path) = user_config {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = local_config {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed("PVSADM_").split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().context("Failed to load pvsadm settings")
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pvsadm").join("config.toml"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: LogSettings {
                level: "info".to_string(),
                target: false,
                timestamps: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_defaults() {
        let settings = Settings::from_figment(Settings::figment(None, None)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let figment = Settings::figment(
            Some(temp_dir.path().join("absent.toml")),
            Some(temp_dir.path().join("also-absent.toml")),
        );
        assert!(Settings::from_figment(figment).is_ok());
    }

    #[test]
    fn test_local_file_overrides_user_file() {
        let temp_dir = TempDir::new().unwrap();
        let user = temp_dir.path().join("user.toml");
        let local = temp_dir.path().join("pvsadm.toml");
        std::fs::write(&user, "[log]\nlevel = \"warn\"\ntarget = true\n").unwrap();
        std::fs::write(&local, "[log]\nlevel = \"debug\"\n").unwrap();

        let settings = Settings::from_figment(Settings::figment(Some(user), Some(local))).unwrap();

        assert_eq!(settings.log.level, "debug");
        assert!(settings.log.target);
        assert!(settings.log.timestamps);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("pvsadm.toml");
        std::fs::write(&local, "[log]\nlevel = 42\n").unwrap();

        let result = Settings::from_figment(Settings::figment(None, Some(local)));
        assert!(result.is_err());
    }
}
