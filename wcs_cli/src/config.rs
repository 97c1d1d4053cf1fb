//! Layered CLI configuration
//!
//! Priority: CLI arguments > environment variables (`WCS_` prefix) >
//! config file > built-in defaults. The config file lives at an
//! XDG-style path (`~/.config/wcs-deploy/config.toml` on Linux).

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wcs_client_core::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_SERVICE_URL};

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    /// Credentials for the source instance (copy-dialog only)
    #[serde(default)]
    pub source: CredentialsConfig,

    /// Credentials for the target (or only) instance
    #[serde(default)]
    pub target: CredentialsConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceConfig {
    pub url: String,
    pub version: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NetworkConfig {
    pub timeout_seconds: u64,
    pub retry_count: u32,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            retry_count: 3,
        }
    }
}

impl AppConfig {
    /// Build a core client config for one instance, applying CLI overrides
    /// on top of the configured credentials.
    pub fn client_config(
        &self,
        configured: &CredentialsConfig,
        username_override: Option<&str>,
        password_override: Option<&str>,
    ) -> ClientConfig {
        ClientConfig {
            url: self.service.url.clone(),
            version: self.service.version.clone(),
            username: username_override
                .map(str::to_string)
                .or_else(|| configured.username.clone()),
            password: password_override
                .map(str::to_string)
                .or_else(|| configured.password.clone()),
            timeout_seconds: self.network.timeout_seconds,
            retry_count: self.network.retry_count,
        }
    }
}

/// Default XDG-style configuration path.
fn default_config_path() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config).join("wcs-deploy/config.toml");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/wcs-deploy/config.toml")
}

/// Load configuration with layered priority: ENV > file > defaults.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&default_config_path())
}

/// Load configuration from a specific file path (for testing).
pub fn load_config_from(path: &PathBuf) -> Result<AppConfig> {
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("WCS_").split("__"));

    figment.extract().context("Failed to load configuration")
}
