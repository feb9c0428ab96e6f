//! Configuration loading
//!
//! Resolution priority (highest first):
//! 1. Command-line arguments (applied by the binary after [`ConfigResolver::resolve`])
//! 2. Environment variables (`GENVAR_HOST`, `GENVAR_PORT`, `GENVAR_ENSEMBL_URL`, `GENVAR_LOG_LEVEL`)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing config file is not an error: a warning is logged and defaults apply.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Public Ensembl REST endpoint
pub const DEFAULT_ENSEMBL_BASE_URL: &str = "https://rest.ensembl.org";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "GENVAR_CONFIG";

/// Full configuration file layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub ensembl: EnsemblConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Upstream annotation service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsemblConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Total attempts for the variation lookup (first try included)
    pub max_attempts: u32,
    /// Backoff after failed attempt `n` is `n * backoff_step_secs`
    pub backoff_step_secs: u64,
}

impl Default for EnsemblConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENSEMBL_BASE_URL.to_string(),
            timeout_secs: 15,
            max_attempts: 3,
            backoff_step_secs: 2,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Optional file that receives a copy of every log line (append mode)
    pub log_file: Option<PathBuf>,
    /// Roll the log file over once it would exceed this size
    pub max_file_bytes: u64,
    /// Rolled files kept as `<log_file>.1` .. `<log_file>.N`; 0 disables rollover
    pub file_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: None,
            max_file_bytes: 1024 * 1024,
            file_backups: 5,
        }
    }
}

impl TomlConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    ///
    /// An unreadable file is [`Error::Io`]; bad content is [`Error::Config`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject values that would make the service unusable
    pub fn validate(&self) -> Result<()> {
        if self.ensembl.base_url.trim().is_empty() {
            return Err(Error::Config("ensembl.base_url must not be empty".to_string()));
        }
        if self.ensembl.timeout_secs == 0 {
            return Err(Error::Config("ensembl.timeout_secs must be at least 1".to_string()));
        }
        if self.ensembl.max_attempts == 0 {
            return Err(Error::Config("ensembl.max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Overlay `GENVAR_*` environment variables onto this config
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("GENVAR_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("GENVAR_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("GENVAR_PORT is not a valid port: {}", port)))?;
        }
        if let Ok(url) = std::env::var("GENVAR_ENSEMBL_URL") {
            self.ensembl.base_url = url;
        }
        if let Ok(level) = std::env::var("GENVAR_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }
}

/// Per-user config file location (`~/.config/genvar/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("genvar").join("config.toml"))
}

/// Locates and loads the configuration in priority order
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    explicit_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// `explicit_path` usually comes from `--config`
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    /// Config file to read: explicit path, then `GENVAR_CONFIG`, then the per-user default
    pub fn config_path(&self) -> Option<PathBuf> {
        self.explicit_path
            .clone()
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(default_config_path)
    }

    /// Defaults, then TOML file (if present), then environment overrides
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match self.config_path() {
            Some(path) if path.exists() => {
                let config = TomlConfig::load(&path)?;
                info!("Loaded config from {}", path.display());
                config
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
                TomlConfig::default()
            }
            None => {
                warn!("No config directory available, using compiled defaults");
                TomlConfig::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }
}
