//! Configuration file support for the matchday CLI.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `MATCHDAY_`, e.g., `MATCHDAY_API_TOKEN`)
//! 3. Config file (~/.config/matchday/config.toml or ./matchday.toml)
//! 4. Built-in defaults
//!
//! The database URL defaults to `sqlite://~/.local/state/matchday/matchday.db`
//! on Linux (using the XDG state directory) if not explicitly configured.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/matchday/matchday.db"  # optional, this is the default
//!
//! [api]
//! url = "https://api.sportmonks.com/v3/football"
//! token = "..."  # or use MATCHDAY_API_TOKEN env var
//!
//! [sync]
//! max_pages = 50
//! hourly_quota = 90
//! panic_cooldown_secs = 900
//! page_delay_ms = 250
//! request_timeout_secs = 20
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Upstream API configuration.
    pub api: ApiConfig,
    /// Sync tunables.
    pub sync: SyncConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL. Defaults to the platform state directory if not
    /// specified.
    pub url: Option<String>,
}

/// Upstream API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the sports-data API.
    pub url: String,
    /// Bearer token. Can also be set via the MATCHDAY_API_TOKEN environment
    /// variable. Required for sync; stats and migrate run without it.
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://api.sportmonks.com/v3/football".to_string(),
            token: None,
        }
    }
}

/// Sync tunables.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum pages fetched per entity per run.
    pub max_pages: u32,
    /// Per-entity requests permitted per rolling hour.
    pub hourly_quota: u32,
    /// Panic-mode cooldown in seconds.
    pub panic_cooldown_secs: u64,
    /// Pacing delay between page fetches in milliseconds.
    pub page_delay_ms: u64,
    /// Per-request network timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_pages: matchday::sync::DEFAULT_PAGE_CAP,
            hourly_quota: matchday::sync::DEFAULT_HOURLY_QUOTA,
            panic_cooldown_secs: matchday::sync::DEFAULT_PANIC_COOLDOWN_SECS,
            page_delay_ms: matchday::sync::DEFAULT_PAGE_DELAY_MS,
            request_timeout_secs: 20,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/matchday/config.toml)
    /// 3. Local config file (./matchday.toml)
    /// 4. Environment variables with MATCHDAY_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "matchday") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("matchday.toml");
        if local_config.exists() {
            tracing::debug!("loading config from ./matchday.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("MATCHDAY")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter enables read-write access and creates the file
    /// if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("matchday.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the API bearer token.
    pub fn api_token(&self) -> Option<String> {
        self.api.token.clone()
    }

    /// Get the upstream API base URL.
    pub fn api_url(&self) -> &str {
        &self.api.url
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/matchday` or `~/.local/state/matchday`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "matchday").map(|dirs| {
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}
