//! Application configuration structs
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub raider_io: RaiderIoConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Roster file storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the roster file and historical snapshots.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Path to the addon's SavedVariables export, when one is available
    /// on this machine.
    #[serde(default)]
    pub lua_export_path: Option<PathBuf>,
}

impl StorageConfig {
    /// The live roster file.
    #[must_use]
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join("roster.json")
    }

    /// Directory for timestamped historical snapshots.
    #[must_use]
    pub fn snapshots_dir(&self) -> PathBuf {
        self.data_dir.join("rosters")
    }
}

/// Raider.IO guild profile API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RaiderIoConfig {
    /// Access key; sync is unavailable without one.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_realm")]
    pub realm: String,
    #[serde(default = "default_guild_name")]
    pub guild_name: String,
    #[serde(default = "default_raider_io_base_url")]
    pub base_url: String,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "roster-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_region() -> String {
    "eu".to_string()
}

fn default_realm() -> String {
    "Executus".to_string()
}

fn default_guild_name() -> String {
    "The Hive".to_string()
}

fn default_raider_io_base_url() -> String {
    "https://raider.io/api/v1".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but unparsable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| default_host()),
                port: match env::var("SERVER_PORT") {
                    Ok(s) => s
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", s))?,
                    Err(_) => default_port(),
                },
            },
            storage: StorageConfig {
                data_dir: env::var("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_data_dir()),
                lua_export_path: env::var("LUA_EXPORT_PATH").ok().map(PathBuf::from),
            },
            raider_io: RaiderIoConfig {
                api_key: env::var("RAIDERIO_API_KEY").ok().filter(|s| !s.is_empty()),
                region: env::var("RAIDERIO_GUILD_REGION").unwrap_or_else(|_| default_region()),
                realm: env::var("RAIDERIO_GUILD_REALM").unwrap_or_else(|_| default_realm()),
                guild_name: env::var("RAIDERIO_GUILD_NAME")
                    .unwrap_or_else(|_| default_guild_name()),
                base_url: env::var("RAIDERIO_BASE_URL")
                    .unwrap_or_else(|_| default_raider_io_base_url()),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
    }

    /// A configuration suitable for tests, rooted at the given data
    /// directory and never touching process environment.
    #[must_use]
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            server: ServerConfig {
                host: default_host(),
                port: 0,
            },
            storage: StorageConfig {
                data_dir: data_dir.as_ref().to_path_buf(),
                lua_export_path: None,
            },
            raider_io: RaiderIoConfig {
                api_key: None,
                region: default_region(),
                realm: default_realm(),
                guild_name: default_guild_name(),
                base_url: default_raider_io_base_url(),
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_storage_paths_derive_from_data_dir() {
        let storage = StorageConfig {
            data_dir: PathBuf::from("/var/lib/roster"),
            lua_export_path: None,
        };
        assert_eq!(storage.roster_path(), PathBuf::from("/var/lib/roster/roster.json"));
        assert_eq!(storage.snapshots_dir(), PathBuf::from("/var/lib/roster/rosters"));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "roster-server");
        assert_eq!(default_host(), "127.0.0.1");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_region(), "eu");
        assert_eq!(default_raider_io_base_url(), "https://raider.io/api/v1");
    }

    #[test]
    fn test_for_data_dir() {
        let config = AppConfig::for_data_dir("/tmp/x");
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/x"));
        assert!(config.raider_io.api_key.is_none());
    }
}
