//! Configuration for the qwire CLI.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config`, or `~/.qwire/config.yaml` when present)
//! 2. Environment variables (with QWIRE_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use qwire_compile::EndpointMode;
use qwire_hal::EngineConfig;
use qwire_hal::engine::{
    DEFAULT_BASE_URL, DEFAULT_CIRCUIT_PATH, DEFAULT_QEC_PATH, DEFAULT_STABILIZER_PATH,
};

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Simulation engine connection
    #[serde(default)]
    pub engine: EngineSection,

    /// Compilation defaults
    #[serde(default)]
    pub compile: CompileSection,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Simulation engine settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct EngineSection {
    /// Engine base URL (e.g., "http://127.0.0.1:3000")
    #[serde(default = "default_base_url")]
    pub url: String,

    /// Path of the circuit simulation endpoint
    #[serde(default = "default_circuit_path")]
    pub circuit_path: String,

    /// Path of the stabilizer evolution endpoint
    #[serde(default = "default_stabilizer_path")]
    pub stabilizer_path: String,

    /// Path of the error correction endpoint
    #[serde(default = "default_qec_path")]
    pub qec_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Optional bearer token (set via QWIRE_ENGINE_TOKEN)
    #[serde(default)]
    pub token: Option<String>,
}

impl fmt::Debug for EngineSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineSection")
            .field("url", &self.url)
            .field("circuit_path", &self.circuit_path)
            .field("stabilizer_path", &self.stabilizer_path)
            .field("qec_path", &self.qec_path)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Default for EngineSection {
    fn default() -> Self {
        EngineSection {
            url: default_base_url(),
            circuit_path: default_circuit_path(),
            stabilizer_path: default_stabilizer_path(),
            qec_path: default_qec_path(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            token: None,
        }
    }
}

/// Compilation defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileSection {
    /// Endpoint mode used when `compile` is not given `--mode`
    #[serde(default)]
    pub mode: EndpointMode,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        LoggingSection {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_circuit_path() -> String {
    DEFAULT_CIRCUIT_PATH.to_string()
}

fn default_stabilizer_path() -> String {
    DEFAULT_STABILIZER_PATH.to_string()
}

fn default_qec_path() -> String {
    DEFAULT_QEC_PATH.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from `config_file` if provided, else the default file if it exists
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(path)?,
                _ => Config::default(),
            },
        };

        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that `lookup` returns override the file-loaded (or
    /// default) values. Unparseable numbers are ignored.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Engine
        if let Some(v) = lookup("QWIRE_ENGINE_URL") {
            self.engine.url = v;
        }
        if let Some(v) = lookup("QWIRE_TIMEOUT") {
            if let Ok(val) = v.parse() {
                self.engine.timeout_seconds = val;
            }
        }
        if let Some(v) = lookup("QWIRE_ENGINE_TOKEN") {
            self.engine.token = Some(v);
        }

        // Compile
        if let Some(v) = lookup("QWIRE_MODE") {
            if let Ok(mode) = v.parse() {
                self.compile.mode = mode;
            }
        }

        // Logging
        if let Some(v) = lookup("QWIRE_LOG_LEVEL") {
            self.logging.level = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.engine.url.starts_with("http://") || self.engine.url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid engine URL: {}",
                self.engine.url
            )));
        }

        for path in [
            &self.engine.circuit_path,
            &self.engine.stabilizer_path,
            &self.engine.qec_path,
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "Endpoint path must start with '/': {path}"
                )));
            }
        }

        if self.engine.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        if let Some(ref token) = self.engine.token {
            if token.is_empty() {
                return Err(ConfigError::ValidationError(
                    "token must not be empty; omit the field to disable authentication"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Build the engine client settings.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::new(&self.engine.url)
            .with_timeout(Duration::from_secs(self.engine.timeout_seconds))
            .with_paths(
                &self.engine.circuit_path,
                &self.engine.stabilizer_path,
                &self.engine.qec_path,
            );
        config.connect_timeout = Duration::from_secs(self.engine.connect_timeout_seconds);
        if let Some(token) = &self.engine.token {
            config = config.with_token(token);
        }
        config
    }
}

/// Default configuration file location (`~/.qwire/config.yaml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".qwire").join("config.yaml"))
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
