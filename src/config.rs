use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT_BASE: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_TEXT_MODEL: &str = "defog/sqlcoder-7b-2";
pub const DEFAULT_VISION_MODEL: &str = "Salesforce/blip-image-captioning-base";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint_base: String,
    pub text_model: String,
    pub vision_model: String,
    /// Empty means anonymous access at the shared rate limit.
    pub api_token: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            endpoint_base: DEFAULT_ENDPOINT_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            api_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::new())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".config").join("sql-scribe").join("config.json"))
    }

    /// Config file first, `HUGGINGFACE_TOKEN` environment variable second.
    pub fn resolved_token(&self) -> Option<String> {
        if !self.api_token.trim().is_empty() {
            return Some(self.api_token.trim().to_string());
        }
        std::env::var("HUGGINGFACE_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.endpoint_base, DEFAULT_ENDPOINT_BASE);
        assert!(config.api_token.is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_explicit_token_wins() {
        let mut config = Config::new();
        config.api_token = "  hf_abc  ".to_string();
        assert_eq!(config.resolved_token().as_deref(), Some("hf_abc"));
    }

    #[test]
    fn test_timeout_floor() {
        let mut config = Config::new();
        config.timeout_secs = 0;
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
