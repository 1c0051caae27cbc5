//! Centralized server configuration.
//!
//! Loaded via the `config` crate from an optional `reportgate` file in the
//! working directory (toml, yaml or json) and `REPORTGATE_*` environment
//! variables, e.g. `REPORTGATE_CONFIG_PATH` or
//! `REPORTGATE_SESSION__TTL_MINUTES`.

use reportgate_access::DEFAULT_SESSION_TTL;
use reportgate_directory::ReloadPolicy;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Directory holding `users.yaml`, `groups.yaml` and `reports.yaml`.
    pub config_path: PathBuf,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Credential directory configuration.
    #[serde(default)]
    pub directory: DirectoryConfig,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle time in minutes before a session expires.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Interval between expired-session sweeps, in seconds.
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

fn default_ttl_minutes() -> i64 {
    2 * 24 * 60
}

fn default_sweep_interval_seconds() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

impl SessionConfig {
    /// Session TTL as a chrono duration.
    ///
    /// Falls back to the default TTL if `ttl_minutes` is out of range, which
    /// [`ServerConfig::from_env`] rejects.
    #[must_use]
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::try_minutes(self.ttl_minutes).unwrap_or(DEFAULT_SESSION_TTL)
    }

    /// Sweep interval as a std duration.
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        let ttl_in_range = chrono::Duration::try_minutes(self.ttl_minutes)
            .is_some_and(|ttl| ttl > chrono::Duration::zero());
        if !ttl_in_range {
            return Err(config::ConfigError::Message(format!(
                "session.ttl_minutes must be a positive number of minutes, got {}",
                self.ttl_minutes
            )));
        }
        if self.sweep_interval_seconds == 0 {
            return Err(config::ConfigError::Message(
                "session.sweep_interval_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// How credential documents are reloaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadMode {
    /// Re-read on every request.
    #[default]
    Always,
    /// Reuse a loaded snapshot for `cache_max_age_seconds`.
    Cached,
}

/// Credential directory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub reload: ReloadMode,

    /// Only used with [`ReloadMode::Cached`].
    #[serde(default = "default_cache_max_age_seconds")]
    pub cache_max_age_seconds: u64,
}

fn default_cache_max_age_seconds() -> u64 {
    60
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            reload: ReloadMode::default(),
            cache_max_age_seconds: default_cache_max_age_seconds(),
        }
    }
}

impl DirectoryConfig {
    /// Converts to the directory's reload policy.
    #[must_use]
    pub fn reload_policy(&self) -> ReloadPolicy {
        match self.reload {
            ReloadMode::Always => ReloadPolicy::Always,
            ReloadMode::Cached => ReloadPolicy::Cached {
                max_age: Duration::from_secs(self.cache_max_age_seconds),
            },
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the optional config file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let source = config::Config::builder()
            .add_source(config::File::with_name("reportgate").required(false))
            .add_source(
                config::Environment::with_prefix("REPORTGATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_config(source)
    }

    /// Deserializes and validates an already built configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or a value is out of range.
    pub fn from_config(source: config::Config) -> Result<Self, config::ConfigError> {
        let config: Self = source.try_deserialize()?;
        config.session.validate()?;
        Ok(config)
    }
}
