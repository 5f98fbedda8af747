use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result, anyhow};

pub const DEFAULT_USER_ID: &str = "hookchat-user";
pub const DEFAULT_TITLE: &str = "Webhook Chat";

pub const URL_ENV: &str = "HOOKCHAT_WEBHOOK_URL";
pub const USER_ID_ENV: &str = "HOOKCHAT_USER_ID";

/// Command that stores a webhook URL in the config file
pub const SET_URL_COMMAND: &str = "hookchat config set-url <URL>";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Only the trailing `history_window` messages are sent with each request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the user's config directory, falling back to defaults when
    /// no file exists yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn save_webhook_url(url: &str) -> Result<()> {
        Self::save_webhook_url_to(&Self::get_config_path()?, url)
    }

    /// Update only the webhook URL, keeping the other settings in the file.
    /// A file that fails to parse is left alone and reported.
    pub fn save_webhook_url_to(path: &Path, url: &str) -> Result<()> {
        let mut config = Self::load_from(path)?;
        config.webhook_url = Some(url.to_string());
        config.save_to(path)
    }

    /// Override fields from `HOOKCHAT_*` environment variables
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.webhook_url = Some(url);
        }
        if let Some(user_id) = lookup(USER_ID_ENV).filter(|v| !v.trim().is_empty()) {
            self.user_id = Some(user_id);
        }
        self
    }

    pub fn webhook_url(&self) -> Result<&str> {
        self.webhook_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No webhook URL configured. Pass --url, set {}, or run: {}",
                    URL_ENV,
                    SET_URL_COMMAND
                )
            })
    }

    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEFAULT_USER_ID)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("hookchat"))
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.user_id(), DEFAULT_USER_ID);
        assert_eq!(config.title(), DEFAULT_TITLE);
        assert!(config.timeout().is_none());
        assert!(config.webhook_url().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            webhook_url: Some("http://localhost:5678/webhook/chat".to_string()),
            history_window: Some(20),
            timeout_secs: Some(30),
            ..Config::new()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.webhook_url().unwrap(), "http://localhost:5678/webhook/chat");
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_file_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "title": "n8n Chat" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.title(), "n8n Chat");
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_url_error_names_set_url_command() {
        let err = Config::new().webhook_url().unwrap_err().to_string();
        assert!(err.contains(SET_URL_COMMAND));
        assert!(err.contains(URL_ENV));
    }

    #[test]
    fn test_save_webhook_url_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            webhook_url: Some("http://old".to_string()),
            title: Some("n8n Chat".to_string()),
            history_window: Some(10),
            ..Config::new()
        };
        config.save_to(&path).unwrap();

        Config::save_webhook_url_to(&path, "http://new").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.webhook_url().unwrap(), "http://new");
        assert_eq!(loaded.title(), "n8n Chat");
        assert_eq!(loaded.history_window, Some(10));
    }

    #[test]
    fn test_save_webhook_url_leaves_malformed_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ \"title\": ").unwrap();

        assert!(Config::save_webhook_url_to(&path, "http://new").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"title\": ");
    }

    #[test]
    fn test_env_overrides_file() {
        let config = Config {
            webhook_url: Some("http://from-file".to_string()),
            ..Config::new()
        }
        .with_env_from(|key| match key {
            URL_ENV => Some("http://from-env".to_string()),
            USER_ID_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.webhook_url().unwrap(), "http://from-env");
        assert_eq!(config.user_id(), DEFAULT_USER_ID);
    }
}
