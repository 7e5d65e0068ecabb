//! Configuration management

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Paid-plan API host
pub const PRO_API_ENDPOINT: &str = "https://api.deepl.com";

/// Free-plan API host
pub const FREE_API_ENDPOINT: &str = "https://api-free.deepl.com";

/// Free-plan keys carry this suffix
const FREE_KEY_SUFFIX: &str = ":fx";

const CONFIG_FILE_NAME: &str = "config.json";
const ENV_PREFIX: &str = "DEEPL";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for the DeepL client
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// DeepL authentication key
    #[serde(rename = "apikey", default)]
    pub api_key: String,
    /// Base URL override
    #[serde(default)]
    pub api_endpoint: Option<String>,
    /// Whole-request timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Config with the default endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_endpoint: None,
            timeout_ms: None,
        }
    }

    /// Use this base URL instead of the DeepL hosts
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Base URL, picked from the key type unless configured explicitly
    pub fn endpoint(&self) -> &str {
        match &self.api_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/'),
            None if self.api_key.ends_with(FREE_KEY_SUFFIX) => FREE_API_ENDPOINT,
            None => PRO_API_ENDPOINT,
        }
    }

    /// Request timeout, 30s unless configured
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(TranslationError::ConfigError {
                message: format!(
                    "apikey is missing; add it to {} or set {}_APIKEY",
                    CONFIG_FILE_NAME, ENV_PREFIX
                ),
            });
        }

        if self.timeout_ms == Some(0) {
            return Err(TranslationError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Layers config file, environment and command-line overrides
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    api_key: Option<String>,
    read_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            path: None,
            api_key: None,
            read_env: true,
        }
    }
}

impl ConfigLoader {
    /// Loader that searches the default paths and reads the environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this file instead of searching; it must exist
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Key that overrides file and environment
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Skip the `DEEPL_*` environment layer
    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// `./config.json` if present, otherwise the per-user config directory
    pub fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }

        ProjectDirs::from("com", "deepl-cli", "deepl-cli")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Build and validate the layered configuration
    pub fn load(&self) -> Result<ClientConfig> {
        let mut builder = Config::builder();

        match &self.path {
            Some(path) => {
                builder = builder
                    .add_source(File::from(path.as_path()).format(FileFormat::Json).required(true));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    debug!("Looking for config at {}", path.display());
                    builder = builder
                        .add_source(File::from(path).format(FileFormat::Json).required(false));
                }
            }
        }

        if self.read_env {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));
        }

        if let Some(api_key) = &self.api_key {
            builder = builder.set_override("apikey", api_key.as_str())?;
        }

        let config: ClientConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!("Using endpoint {}", config.endpoint());
        Ok(config)
    }
}
