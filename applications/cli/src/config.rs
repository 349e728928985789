/// CLI configuration
use crate::error::{CliError, Result};
use applytrack_client::ServerConfig;
use applytrack_core::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "applytrack.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_validation")]
    pub validation: ValidationSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationSettings {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    #[serde(default)]
    pub reject_past_dates: bool,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` must exist when given; otherwise `applytrack.toml` is read
    /// if present. `APPLYTRACK_<SECTION>__<KEY>` variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with APPLYTRACK_)
        settings = settings.add_source(
            config::Environment::with_prefix("APPLYTRACK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(CliError::Config(
                "server.url is required (set APPLYTRACK_SERVER__URL)".to_string(),
            ));
        }

        if self.server.timeout_secs == 0 || self.server.connect_timeout_secs == 0 {
            return Err(CliError::Config(
                "server timeouts must be at least one second".to_string(),
            ));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "storage.database_url is required".to_string(),
            ));
        }

        if self.validation.min_password_length == 0 {
            return Err(CliError::Config(
                "validation.min_password_length must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Connection settings for the remote authority
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.server.url.clone()).with_timeouts(
            Duration::from_secs(self.server.timeout_secs),
            Duration::from_secs(self.server.connect_timeout_secs),
        )
    }

    /// Local input rules
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            min_password_length: self.validation.min_password_length,
            reject_past_dates: self.validation.reject_past_dates,
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        url: default_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/applytrack.db".to_string()
}

fn default_validation() -> ValidationSettings {
    ValidationSettings {
        min_password_length: default_min_password_length(),
        reject_past_dates: false,
    }
}

fn default_min_password_length() -> usize {
    applytrack_core::validation::DEFAULT_MIN_PASSWORD_LENGTH
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            validation: default_validation(),
        }
    }
}
