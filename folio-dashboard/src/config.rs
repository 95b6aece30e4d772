use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cloudinary::{UploadClient, UploadUrl};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the folio-api server, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    #[serde(default = "default_cloud_name")]
    pub cloud_name: String,
    /// Unsigned upload preset configured on the cloud.
    #[serde(default = "default_upload_preset")]
    pub upload_preset: String,
    /// Overrides the upload URL derived from `cloud_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_cloud_name() -> String {
    "dbi3iqa9k".to_string()
}

fn default_upload_preset() -> String {
    "v7bn49sm".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: default_cloud_name(),
            upload_preset: default_upload_preset(),
            endpoint: None,
        }
    }
}

impl CloudinaryConfig {
    pub fn upload_client(&self) -> UploadClient {
        match &self.endpoint {
            Some(endpoint) => {
                UploadClient::with_url(UploadUrl::custom(endpoint), self.upload_preset.clone())
            }
            None => UploadClient::new(&self.cloud_name, self.upload_preset.clone()),
        }
    }
}

impl DashboardConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("folio-dashboard")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Writes the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
