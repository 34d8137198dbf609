//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Board behavior configuration.
    #[serde(default)]
    pub board: BoardConfig,
    /// Admin account bootstrap. When set, the account is created on
    /// first startup if it does not exist.
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

/// Admin account bootstrap configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Admin email address.
    pub email: String,
    /// Admin password.
    pub password: String,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for stored files.
    #[serde(default = "default_storage_path")]
    pub base_path: String,
    /// Base URL under which stored files are served.
    #[serde(default = "default_storage_url")]
    pub base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_storage_path(),
            base_url: default_storage_url(),
        }
    }
}

/// Board behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Minimum minutes between anonymous posts.
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: i64,
    /// Maximum accepted image size in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cooldown_minutes: default_cooldown_minutes(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

fn default_storage_path() -> String {
    "./files".to_string()
}

fn default_storage_url() -> String {
    "/files".to_string()
}

const fn default_cooldown_minutes() -> i64 {
    5
}

// 100 KiB, matching the upload cap enforced on submission.
const fn default_max_image_bytes() -> usize {
    100 * 1024
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `CORKBOARD_ENV`)
    /// 3. Environment variables with `CORKBOARD_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("CORKBOARD_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CORKBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("CORKBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_config_defaults() {
        let board = BoardConfig::default();
        assert_eq!(board.cooldown_minutes, 5);
        assert_eq!(board.max_image_bytes, 102_400);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_server_bind_address_parses() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        let addr: std::net::SocketAddr =
            format!("{}:{}", server.host, server.port).parse().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_storage_config_defaults() {
        let storage = StorageConfig::default();
        assert_eq!(storage.base_path, "./files");
        assert_eq!(storage.base_url, "/files");
    }
}
