use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::path::{Path, PathBuf};

/// Directory and autostart entry name
pub const APP_NAME: &str = "vpn-status";

/// Environment override for the status endpoint
pub const STATUS_API_URL_ENV: &str = "VPN_STATUS_API_URL";

const CONFIG_FILE: &str = "config.toml";
const SETTINGS_FILE: &str = "settings.json";

/// Desktop configuration: `AppConfig` plus where things live on disk.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
    config_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            config_dir: default_config_dir(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the user config dir, then apply env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = default_config_dir();
        let app = match &config_dir {
            Some(dir) => AppConfig::load(&dir.join(CONFIG_FILE))?,
            None => AppConfig::default(),
        };
        Self::from_parts(app, config_dir)
    }

    /// Load from an explicit directory (no env lookup for the directory itself)
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let app = AppConfig::load(&dir.join(CONFIG_FILE))?;
        Self::from_parts(app, Some(dir.to_path_buf()))
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self {
            app,
            config_dir: default_config_dir(),
        })
    }

    fn from_parts(app: AppConfig, config_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let app = match std::env::var(STATUS_API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                tracing::info!("[Config] Status endpoint overridden by {}", STATUS_API_URL_ENV);
                AppConfigBuilder::from_config(app)
                    .status_api_url(url.trim())
                    .build()?
            }
            _ => app,
        };
        Ok(Self { app, config_dir })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn status_api_url(&self) -> &str {
        &self.app.status_api_url
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Settings file: explicit `settings_file`, else `settings.json` in the config dir
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.app
            .settings_file
            .clone()
            .or_else(|| self.config_dir.as_ref().map(|dir| dir.join(SETTINGS_FILE)))
    }
}

fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}
