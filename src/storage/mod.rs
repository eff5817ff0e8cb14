pub mod ipfs;
pub mod local;

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, SovenError};
use crate::network::NetworkDirectory;
use crate::profile::AssistantProfile;

pub use ipfs::IpfsClient;
pub use local::LocalStore;

/// Where a save ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageHandle {
    Remote(String),
    Local(PathBuf),
}

impl fmt::Display for StorageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageHandle::Remote(address) => write!(f, "ipfs:{}", address),
            StorageHandle::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Saves go to IPFS when it is reachable and to the local file otherwise.
/// Loads read local files only; remote addresses are not tracked across runs.
pub struct PersistenceGateway {
    local: LocalStore,
    remote: IpfsClient,
}

impl PersistenceGateway {
    pub async fn new(config: &Config) -> Self {
        let local = LocalStore::new(config.network_file(), config.assistants_dir());
        let remote = IpfsClient::connect(&config.ipfs).await;
        Self { local, remote }
    }

    pub fn local_only(config: &Config) -> Self {
        Self {
            local: LocalStore::new(config.network_file(), config.assistants_dir()),
            remote: IpfsClient::unavailable(&config.ipfs),
        }
    }

    pub fn remote_available(&self) -> bool {
        self.remote.is_available()
    }

    async fn save_record<T: Serialize>(&self, path: PathBuf, record: &T) -> Result<StorageHandle> {
        if self.remote.is_available() {
            match self.remote.put_json(record).await {
                Ok(address) => {
                    tracing::debug!("Saved record to IPFS: {}", address);
                    return Ok(StorageHandle::Remote(address));
                }
                Err(e) => {
                    tracing::warn!("IPFS save failed, writing {} instead: {}", path.display(), e);
                }
            }
        }

        self.local.write(&path, record).map_err(|e| {
            SovenError::Persistence(format!("failed to write {}: {}", path.display(), e))
        })?;
        tracing::debug!("Saved record to {}", path.display());
        Ok(StorageHandle::Local(path))
    }

    pub async fn save_network(&self, network: &NetworkDirectory) -> Result<StorageHandle> {
        let path = self.local.network_file().to_path_buf();
        self.save_record(path, network).await
    }

    /// Empty when the file is missing or unreadable.
    pub fn load_network(&self) -> NetworkDirectory {
        match self.local.read(self.local.network_file()) {
            Ok(Some(network)) => network,
            Ok(None) => NetworkDirectory::new(),
            Err(e) => {
                tracing::warn!("Failed to load network directory: {}", e);
                NetworkDirectory::new()
            }
        }
    }

    pub async fn save_profile(
        &self,
        user: &str,
        assistant: &str,
        profile: &AssistantProfile,
    ) -> Result<StorageHandle> {
        let path = self.local.profile_file(user, assistant);
        self.save_record(path, profile).await
    }

    pub fn load_profile(&self, user: &str, assistant: &str) -> Option<AssistantProfile> {
        let path = self.local.profile_file(user, assistant);
        match self.local.read(&path) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Retrieves a record previously saved to the remote store.
    pub async fn fetch_remote<T: DeserializeOwned>(&self, address: &str) -> Result<T> {
        self.remote.get_json(address).await
    }
}
