use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use roster_engine::{FetchSettings, DEFAULT_BASE_URL};
use roster_logging::roster_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "roster.ron";
pub const CONFIG_PATH_VAR: &str = "ROSTER_CONFIG";
pub const BASE_URL_VAR: &str = "ROSTER_BASE_URL";
pub const API_KEY_VAR: &str = "ROSTER_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid base url {url:?}: {source}")]
    BaseUrl { url: String, source: url::ParseError },
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: "reqres-free-v1".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_bytes: 1024 * 1024,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            log_file: PathBuf::from("./roster.log"),
        }
    }
}

impl AppConfig {
    /// Reads `$ROSTER_CONFIG` or `./roster.ron` if present, then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        let path = explicit.unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    pub fn load_from(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(text) => ron::from_str::<AppConfig>(&text).map_err(|err| ConfigError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Some(base_url) = env(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(api_key) = env(API_KEY_VAR) {
            config.api_key = api_key;
        }
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn fetch_settings(&self) -> Result<FetchSettings, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        let mut settings = FetchSettings::new(base_url, self.api_key.clone());
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs);
        settings.max_bytes = self.max_bytes;
        roster_info!(
            "fetching users from {} (timeout {}s)",
            settings.base_url,
            self.request_timeout_secs
        );
        Ok(settings)
    }
}
