//! Layered configuration
//!
//! Built-in defaults, then an optional user file from the config directory,
//! then `HOAXIFY_*` environment variables. Command-line overrides are applied
//! by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{ConfigError, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;

use crate::{domain::Credentials, model::feed::FeedConfig, utils};

const CONFIG: &str = include_str!("../../.config/config.json5");

const CONFIG_FILES: [(&str, FileFormat); 5] = [
    ("config.json5", FileFormat::Json5),
    ("config.json", FileFormat::Json),
    ("config.yaml", FileFormat::Yaml),
    ("config.toml", FileFormat::Toml),
    ("config.ini", FileFormat::Ini),
];

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, rename = "_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default, rename = "_config_dir")]
    pub config_dir: PathBuf,
    pub base_url: String,
    pub feed_page_size: usize,
    pub directory_page_size: usize,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&utils::get_config_dir(), &utils::get_data_dir())
    }

    pub fn load(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(File::from_str(CONFIG, FileFormat::Json5))
            .set_default("_data_dir", data_dir.to_string_lossy().into_owned())?
            .set_default("_config_dir", config_dir.to_string_lossy().into_owned())?;

        for (file, format) in CONFIG_FILES {
            let path = config_dir.join(file);
            if path.exists() {
                log::info!("loading configuration from {}", path.display());
            }
            builder = builder.add_source(File::from(path).format(format).required(false));
        }
        builder = builder.add_source(Environment::with_prefix("HOAXIFY").try_parsing(true));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::NotFound(String::from("base_url")));
        }
        if self.feed_page_size == 0 {
            return Err(ConfigError::Message(String::from(
                "feed_page_size must be positive",
            )));
        }
        if self.directory_page_size == 0 {
            return Err(ConfigError::Message(String::from(
                "directory_page_size must be positive",
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Message(String::from(
                "poll_interval_ms must be positive",
            )));
        }
        Ok(())
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            page_size: self.feed_page_size,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Credentials to log in with, when both username and password are set
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}
