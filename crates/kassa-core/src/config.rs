use crate::i18n::Language;
use crate::ports::DEFAULT_INTERVAL_GROUPING;
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://bapi-etail.wallmob.com";
pub const BASE_URL_ENV: &str = "EXTENDA_BASE_URL";
pub const SHOP_ID_ENV: &str = "EXTENDA_SHOP_ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read error: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("TOML parse error: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub backend: BackendConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: Language,
    pub timezone: Tz,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub scopes: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub shop_id: Option<String>,
    pub interval_grouping: u32,
    pub daily_goal: i64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            timezone: chrono_tz::Europe::Stockholm,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            scopes: "public".to_string(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            shop_id: None,
            interval_grouping: DEFAULT_INTERVAL_GROUPING,
            daily_goal: 20_000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the file, then applies `EXTENDA_*` environment overrides.
    pub fn load_with_environment() -> Result<Self, ConfigError> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.backend.base_url = base_url;
        }

        if let Some(shop_id) = lookup(SHOP_ID_ENV).filter(|value| !value.trim().is_empty()) {
            self.report.shop_id = Some(shop_id);
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kassa")
            .join("config.toml")
    }
}
