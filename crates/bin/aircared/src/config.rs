//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `aircare.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Event bus settings.
    pub events: EventsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Directory of dashboard assets served for non-API paths.
    pub static_dir: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity. Slower SSE clients skip older events.
    pub capacity: usize,
}

impl Config {
    /// Load configuration from `aircare.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("aircare.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AIRCARE_HOST") {
            self.server.host = val;
        }
        // PORT is what hosting platforms set; the prefixed variable wins.
        for key in ["PORT", "AIRCARE_PORT"] {
            if let Some(port) = var(key).and_then(|val| val.parse().ok()) {
                self.server.port = port;
            }
        }
        if let Some(val) = var("AIRCARE_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("AIRCARE_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = var("AIRCARE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "event capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "aircared=info,aircare=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
