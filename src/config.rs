//! Application configuration
//!
//! Read from `~/.tableros/config.yaml` when present. Every field has a
//! default so the client runs without any file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    API_URL_ENV, CONFIG_DIR_NAME, DEFAULT_API_BASE_URL, DEFAULT_FETCH_ATTEMPTS,
    DEFAULT_LOG_FILE, DEFAULT_PAGE_SIZE, DEFAULT_SPLASH_MS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    /// Attempts for list queries; mutations are always single-shot
    pub fetch_attempts: u32,
    pub splash_ms: u64,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_attempts: DEFAULT_FETCH_ATTEMPTS,
            splash_ms: DEFAULT_SPLASH_MS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Load from the default location, then apply the environment override
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_dir().join("config.yaml"))?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_url_override(&url);
        }
        Ok(config)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config.sanitized())
    }

    fn apply_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api_base_url = url.to_string();
        }
    }

    fn sanitized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.fetch_attempts = self.fetch_attempts.max(1);
        self
    }
}

/// Directory holding config and preferences
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.fetch_attempts, 2);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_base_url: https://api.example.com\npage_size: 0\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.page_size, 1);
        assert_eq!(config.splash_ms, DEFAULT_SPLASH_MS);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "page_size: [not a number\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_url_override_ignores_blank() {
        let mut config = AppConfig::default();
        config.apply_url_override("   ");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        config.apply_url_override("http://10.0.0.5:8000/");
        assert_eq!(config.api_base_url, "http://10.0.0.5:8000/");
    }
}
