use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "reality-check.toml";
pub const ENV_ENDPOINT: &str = "REALITY_CHECK_ENDPOINT";
pub const ENV_DATA_DIR: &str = "REALITY_CHECK_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "ServiceConfig::default_endpoint")]
    pub endpoint: String,
}

impl ServiceConfig {
    fn default_endpoint() -> String {
        "http://localhost:8787/api/validate".to_string()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_data_dir")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    fn default_data_dir() -> PathBuf {
        PathBuf::from(".reality-check")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Reads `<root>/reality-check.toml` if present, then applies environment
    /// overrides. A missing file is not an error; a broken one is.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let mut cfg = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            Self::from_toml(&text).with_context(|| format!("parsing config file {}", path.display()))?
        } else {
            tracing::info!("No config file found at {}. Using defaults.", path.display());
            AppConfig::default()
        };

        cfg.apply_overrides(|key| std::env::var(key).ok());
        cfg.storage.data_dir = absolutize(root, &cfg.storage.data_dir);
        Ok(cfg)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str::<AppConfig>(text)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.service.endpoint = endpoint;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.storage.data_dir = PathBuf::from(dir);
        }
    }
}

fn absolutize(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}
