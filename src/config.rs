use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub ipfs: IpfsConfig,
    /// Fixed seed for personality and helper selection. `None` seeds from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpfsConfig {
    pub enabled: bool,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: "http://127.0.0.1:5001".to_string(),
            timeout_secs: 5,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("soven")
        });

        std::fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        let mut config = match Self::load_existing(&config_path) {
            Some(mut config) => {
                config.data_dir = data_dir;
                config
            }
            None => {
                let config = Self::default_config(data_dir);
                config.save()?;
                config
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn load_existing(config_path: &Path) -> Option<Self> {
        if !config_path.exists() {
            return None;
        }

        let config_str = match std::fs::read_to_string(config_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", config_path.display(), e);
                return None;
            }
        };

        if config_str.trim().is_empty() {
            tracing::warn!("Config file is empty, recreating defaults");
            return None;
        }

        match serde_json::from_str::<Config>(&config_str) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Failed to parse existing config.json: {}", e);
                None
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_url) = std::env::var("SOVEN_IPFS_API") {
            if !api_url.trim().is_empty() {
                self.ipfs.api_url = api_url;
                self.ipfs.enabled = true;
            }
        }

        if let Ok(seed) = std::env::var("SOVEN_SEED") {
            match seed.parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!("Ignoring SOVEN_SEED={:?}: not an unsigned integer", seed),
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.data_dir.join("config.json");
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            ipfs: IpfsConfig::default(),
            seed: None,
            log_level: default_log_level(),
        }
    }

    pub fn network_file(&self) -> PathBuf {
        self.data_dir.join("network.json")
    }

    pub fn assistants_dir(&self) -> PathBuf {
        self.data_dir.join("assistants")
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join("shell_history.txt")
    }
}
