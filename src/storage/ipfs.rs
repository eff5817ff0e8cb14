use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::IpfsConfig;
use crate::error::{Result, SovenError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddResponse {
    hash: String,
}

/// Content-addressed remote store backed by an IPFS daemon's RPC API.
pub struct IpfsClient {
    client: Client,
    api_url: String,
    available: bool,
}

impl IpfsClient {
    /// Never fails: an unreachable or disabled daemon gives an unavailable client.
    pub async fn connect(config: &IpfsConfig) -> Self {
        let mut ipfs = Self::unavailable(config);
        if !config.enabled {
            return ipfs;
        }

        match ipfs.daemon_version().await {
            Ok(version) => {
                tracing::info!("Connected to IPFS {} at {}", version, ipfs.api_url);
                ipfs.available = true;
            }
            Err(e) => {
                tracing::warn!("IPFS unavailable at {}: {}", ipfs.api_url, e);
            }
        }
        ipfs
    }

    pub fn unavailable(config: &IpfsConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            available: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/api/v0/{}", self.api_url, method)
    }

    async fn daemon_version(&self) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint("version"))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        Ok(body
            .get("Version")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string())
    }

    /// Stores a JSON record, returning its content address.
    pub async fn put_json<T: Serialize>(&self, record: &T) -> Result<String> {
        if !self.available {
            return Err(SovenError::Persistence("IPFS is not available".to_string()));
        }

        let bytes = serde_json::to_vec(record)?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name("record.json"));

        let response = self
            .client
            .post(self.endpoint("add"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let added: AddResponse = response.json().await?;
        Ok(added.hash)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, address: &str) -> Result<T> {
        if !self.available {
            return Err(SovenError::Persistence("IPFS is not available".to_string()));
        }

        let response = self
            .client
            .post(self.endpoint("cat"))
            .query(&[("arg", address)])
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
