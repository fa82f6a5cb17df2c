//! Harness configuration.
//!
//! Values come from built-in defaults, an optional TOML file, and finally
//! explicit overrides from the command line or environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DeviceIdentity, ECHO_FAMILY};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:8787";
pub const DEFAULT_PROVIDER: &str = "SPOTIFY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
// TODO: replace with the account id from /api/users/me once the proxy serves it
pub const DEFAULT_CUSTOMER_ID: &str = "amzn1.account.placeholder";
pub const DEFAULT_LOCALE: &str = "en-US";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Base address of the local proxy
    pub proxy_url: String,
    /// Provider used when a search does not name one
    pub default_provider: String,
    /// Device family to target for device-scoped commands
    pub device_family: String,
    pub timeout_secs: u64,
    pub customer_id: String,
    pub locale: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            default_provider: DEFAULT_PROVIDER.to_string(),
            device_family: ECHO_FAMILY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            customer_id: DEFAULT_CUSTOMER_ID.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub proxy_url: Option<String>,
    pub default_provider: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Platform config file location, e.g. `~/.config/echo-music/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "echo-music", "echo-music")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl HarnessConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. The default location is optional and
    /// falls back to built-in defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.proxy_url {
            self.proxy_url = url;
        }
        if let Some(provider) = overrides.default_provider {
            self.default_provider = provider;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.proxy_url.starts_with("http://") || self.proxy_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "proxy_url".to_string(),
                message: format!("'{}' is not an http(s) address", self.proxy_url),
            });
        }

        if self.default_provider.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_provider".to_string(),
                message: "cannot be empty".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity {
            customer_id: self.customer_id.clone(),
            locale: self.locale.clone(),
        }
    }

    /// Family filter for device resolution; an empty family means "any".
    pub fn family_filter(&self) -> Option<&str> {
        let family = self.device_family.trim();
        if family.is_empty() {
            None
        } else {
            Some(family)
        }
    }
}
