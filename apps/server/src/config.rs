//! Server configuration module.
//!
//! Configuration is loaded from environment variables, then an optional TOML
//! file named by `SMARTKART_CONFIG`, with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use smartkart_core::{Weight, WEIGHT_TOLERANCE_GRAMS};

/// Environment variable naming the optional TOML config file.
pub const CONFIG_FILE_VAR: &str = "SMARTKART_CONFIG";

const BIND_ADDR: &str = "SMARTKART_BIND_ADDR";
const PORT: &str = "SMARTKART_PORT";
const CATALOG_PATH: &str = "SMARTKART_CATALOG_PATH";
const WEIGHT_TOLERANCE: &str = "SMARTKART_WEIGHT_TOLERANCE_GRAMS";
const SESSION_TTL: &str = "SMARTKART_SESSION_TTL_SECS";

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to listen on
    pub bind_addr: String,

    /// HTTP port
    pub port: u16,

    /// Product catalog JSON file
    pub catalog_path: PathBuf,

    /// Allowed deviation for fixed-weight items
    pub weight_tolerance: Weight,

    /// Idle lifetime of a shopper session
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 5000,
            catalog_path: PathBuf::from("data/products.json"),
            weight_tolerance: Weight::from_grams(WEIGHT_TOLERANCE_GRAMS),
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Optional keys read from the TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    bind_addr: Option<String>,
    port: Option<u16>,
    catalog_path: Option<PathBuf>,
    weight_tolerance_grams: Option<f64>,
    session_ttl_secs: Option<u64>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// ## Precedence
    /// ```text
    /// environment variable  >  TOML file ($SMARTKART_CONFIG)  >  default
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match lookup(CONFIG_FILE_VAR) {
            Some(path) => FileConfig::read(Path::new(&path))?,
            None => FileConfig::default(),
        };
        let defaults = ServerConfig::default();

        let bind_addr = lookup(BIND_ADDR)
            .or(file.bind_addr)
            .unwrap_or(defaults.bind_addr);

        let port = match lookup(PORT) {
            Some(raw) => parse(PORT, &raw)?,
            None => file.port.unwrap_or(defaults.port),
        };

        let catalog_path = lookup(CATALOG_PATH)
            .map(PathBuf::from)
            .or(file.catalog_path)
            .unwrap_or(defaults.catalog_path);

        let tolerance_grams = match lookup(WEIGHT_TOLERANCE) {
            Some(raw) => Some(parse::<f64>(WEIGHT_TOLERANCE, &raw)?),
            None => file.weight_tolerance_grams,
        };
        let weight_tolerance = match tolerance_grams {
            Some(grams) => Weight::from_grams_f64(grams)
                .filter(|w| w.milligrams() >= 0)
                .ok_or_else(|| ConfigError::InvalidValue(WEIGHT_TOLERANCE.to_string()))?,
            None => defaults.weight_tolerance,
        };

        let session_ttl = match lookup(SESSION_TTL) {
            Some(raw) => Duration::from_secs(parse(SESSION_TTL, &raw)?),
            None => file
                .session_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
        };

        Ok(ServerConfig {
            bind_addr,
            port,
            catalog_path,
            weight_tolerance,
            session_ttl,
        })
    }

    /// Socket address to bind the listener to.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue(BIND_ADDR.to_string()))
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {}: {reason}", .path.display())]
    File { path: PathBuf, reason: String },
}
