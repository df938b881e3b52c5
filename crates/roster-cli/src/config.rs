//! CLI configuration management.
//!
//! The config file holds the site description (URLs, form field names,
//! schedule markup) plus the last username that logged in successfully.
//!
//! Configuration is stored at `~/.config/roster-scrape/config.json` unless
//! `--config <path>` points elsewhere.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roster_core::SiteConfig;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
pub const APP_NAME: &str = "roster-scrape";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub site: SiteConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_username: Option<String>,
}

impl Config {
    /// Load from `path`. Unlike most settings there is no usable default:
    /// without URLs we have nothing to log into.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to read config file {} (it needs at least \"login_url\" and \"schedule_url\")",
                path.display()
            )
        })?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_flattened_site_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r##"{
                "login_url": "https://ess.example.net/Default.aspx",
                "schedule_url": "https://ess.example.net/MyRoster2.aspx",
                "markup": {"heading": "#lblCurrentMonth"},
                "last_username": "12345"
            }"##,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.site.login_url, "https://ess.example.net/Default.aspx");
        assert_eq!(config.site.markup.heading.as_deref(), Some("#lblCurrentMonth"));
        assert_eq!(config.site.markup.container, "table.roster");
        assert_eq!(config.last_username.as_deref(), Some("12345"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config {
            site: SiteConfig::new("https://a.example/login", "https://a.example/roster"),
            last_username: None,
        };
        config.save(&path).unwrap();
        config.last_username = Some("alice".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.site, config.site);
        assert_eq!(loaded.last_username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_missing_file_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }
}
