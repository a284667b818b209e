//! Configuration management for playreviews using the prefer crate.
//!
//! Settings are layered: built-in defaults, then a config file (explicit
//! `--config` path or discovered by prefer), then environment variables.
//! CLI flags are applied last by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scrapers::{
    FetchOptions, ReviewSort, DEFAULT_COUNTRY, DEFAULT_LANGUAGE, DEFAULT_MAX_COUNT,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;
/// Timeout for a whole bounded fetch in seconds.
pub const DEFAULT_FETCH_TIMEOUT: u64 = 120;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Review language (`hl`).
    pub language: String,
    /// Review country (`gl`).
    pub country: String,
    pub sort: ReviewSort,
    /// Upper bound on reviews fetched per lookup.
    pub max_count: usize,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
    /// Whole-fetch timeout in seconds.
    pub fetch_timeout: u64,
    /// User agent override; `None` uses the default browser agent.
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            sort: ReviewSort::Newest,
            max_count: DEFAULT_MAX_COUNT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: None,
        }
    }
}

impl Settings {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            language: self.language.clone(),
            country: self.country.clone(),
            sort: self.sort,
            max_count: self.max_count,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Recognized: `HOST`, `PORT`, `PLAYREVIEWS_LANGUAGE`, `PLAYREVIEWS_COUNTRY`,
    /// `PLAYREVIEWS_SORT`, `PLAYREVIEWS_MAX_COUNT`, `PLAYREVIEWS_REQUEST_TIMEOUT`,
    /// `PLAYREVIEWS_FETCH_TIMEOUT`, `PLAYREVIEWS_USER_AGENT`.
    /// Unparseable values are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.trim().parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(language) = get("PLAYREVIEWS_LANGUAGE") {
            self.language = language;
        }
        if let Some(country) = get("PLAYREVIEWS_COUNTRY") {
            self.country = country;
        }
        if let Some(sort) = get("PLAYREVIEWS_SORT") {
            match sort.parse::<ReviewSort>() {
                Ok(sort) => self.sort = sort,
                Err(e) => tracing::warn!("Ignoring invalid PLAYREVIEWS_SORT value: {}", e),
            }
        }
        if let Some(max) = get("PLAYREVIEWS_MAX_COUNT") {
            match max.trim().parse() {
                Ok(max) => self.max_count = max,
                Err(_) => tracing::warn!("Ignoring invalid PLAYREVIEWS_MAX_COUNT value: {}", max),
            }
        }
        if let Some(timeout) = get("PLAYREVIEWS_REQUEST_TIMEOUT") {
            match timeout.trim().parse() {
                Ok(timeout) => self.request_timeout = timeout,
                Err(_) => tracing::warn!(
                    "Ignoring invalid PLAYREVIEWS_REQUEST_TIMEOUT value: {}",
                    timeout
                ),
            }
        }
        if let Some(timeout) = get("PLAYREVIEWS_FETCH_TIMEOUT") {
            match timeout.trim().parse() {
                Ok(timeout) => self.fetch_timeout = timeout,
                Err(_) => tracing::warn!(
                    "Ignoring invalid PLAYREVIEWS_FETCH_TIMEOUT value: {}",
                    timeout
                ),
            }
        }
        if let Some(user_agent) = get("PLAYREVIEWS_USER_AGENT") {
            self.user_agent = Some(user_agent);
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<ReviewSort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Whole-fetch timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Discover a `playreviews` config file in the standard locations.
    /// Falls back to defaults when none is found or it fails to parse.
    pub async fn load() -> Self {
        match prefer::load("playreviews").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// TOML, YAML, and JSON are selected by file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref host) = self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(ref language) = self.language {
            settings.language = language.clone();
        }
        if let Some(ref country) = self.country {
            settings.country = country.clone();
        }
        if let Some(sort) = self.sort {
            settings.sort = sort;
        }
        if let Some(max_count) = self.max_count {
            settings.max_count = max_count;
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(timeout) = self.fetch_timeout {
            settings.fetch_timeout = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
    }
}

/// Options controlling how settings are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file (--config flag).
    pub config_path: Option<PathBuf>,
}

/// Load settings: defaults, then config file, then environment.
pub async fn load_settings(options: &LoadOptions) -> anyhow::Result<Settings> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path)
            .await
            .map_err(anyhow::Error::msg)?,
        None => Config::load().await,
    };

    if let Some(ref path) = config.source_path {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings.apply_env(|key| std::env::var(key).ok());

    Ok(settings)
}
