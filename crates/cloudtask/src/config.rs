/*
[INPUT]:  Optional YAML configuration file and CLOUDTASK_* environment variables
[OUTPUT]: Parsed application configuration
[POS]:    Configuration layer - backend, session storage and page behaviour
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use cloudtask_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

/// Environment prefix; nested keys use `__`, e.g. `CLOUDTASK_API__BASE_URL`
pub const ENV_PREFIX: &str = "CLOUDTASK";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
    /// Directory for daily-rolling log files; stderr only when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Where the session token is kept between runs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Page behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause between the registration notice and the jump to login
    pub register_redirect_ms: u64,
    pub redirect_policy: RedirectPolicy,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            register_redirect_ms: 2000,
            redirect_policy: RedirectPolicy::default(),
        }
    }
}

impl UiConfig {
    pub fn register_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.register_redirect_ms)
    }
}

/// Which dashboard failures send the user back to login
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectPolicy {
    /// Missing, expired or rejected credentials only
    #[default]
    UnauthorizedOnly,
    /// Every failed fetch or post
    AnyError,
}

impl AppConfig {
    /// Load configuration: defaults, then the file (if any), then environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            builder = builder.add_source(
                config::File::from(path.to_path_buf()).format(config::FileFormat::Yaml),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    /// Session file location, falling back to the platform data directory
    pub fn session_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.session.path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().context("could not determine data directory")?;
        Ok(data_dir.join("cloudtask").join("session.json"))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize config to YAML")
    }
}
