mod types;

pub use types::*;

use crate::{Error, Result};
use reqwest::Url;
use std::env;
use std::path::Path;
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const ENDPOINT_URL_ENV: &str = "FEEDBACK_API_URL";

pub async fn load() -> Result<Config> {
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.yaml".to_string());

    // The override may fill in a placeholder endpoint, so validate after it.
    let config = read_unvalidated(Path::new(&config_path)).await?;
    config.with_endpoint_override(env::var(ENDPOINT_URL_ENV).ok())
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let config = read_unvalidated(path.as_ref()).await?;
    config.validate()?;
    Ok(config)
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

async fn read_unvalidated(path: &Path) -> Result<Config> {
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&config_str)?)
}

impl Config {
    /// Replaces the endpoint when an override is present and non-blank,
    /// then re-validates.
    pub fn with_endpoint_override(mut self, endpoint_url: Option<String>) -> Result<Self> {
        if let Some(url) = endpoint_url.filter(|u| !u.trim().is_empty()) {
            debug!("Endpoint overridden from {}", ENDPOINT_URL_ENV);
            self.service.endpoint_url = url;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.service.endpoint()?;
        Ok(())
    }
}

impl ServiceConfig {
    pub fn endpoint(&self) -> Result<Url> {
        let raw = self.endpoint_url.trim();
        if raw.is_empty() {
            return Err(Error::config(
                "service.endpoint_url is empty; set it to the sentiment service URL",
            ));
        }

        let url = Url::parse(raw)
            .map_err(|e| Error::config(format!("Invalid endpoint URL '{}': {}", raw, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::config(format!(
                "Unsupported endpoint scheme '{}': expected http or https",
                scheme
            ))),
        }
    }
}
