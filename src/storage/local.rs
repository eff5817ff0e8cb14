use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// JSON files under the data directory, one per assistant plus the network file.
#[derive(Debug, Clone)]
pub struct LocalStore {
    network_file: PathBuf,
    assistants_dir: PathBuf,
}

impl LocalStore {
    pub fn new(network_file: PathBuf, assistants_dir: PathBuf) -> Self {
        Self {
            network_file,
            assistants_dir,
        }
    }

    pub fn network_file(&self) -> &Path {
        &self.network_file
    }

    pub fn profile_file(&self, user: &str, assistant: &str) -> PathBuf {
        self.assistants_dir
            .join(format!("{}_{}.json", escape_component(user), escape_component(assistant)))
    }

    /// Reads a JSON record. `Ok(None)` when the file does not exist.
    pub fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Overwrites the whole record.
    pub fn write<T: Serialize>(&self, path: &Path, record: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(record)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Escapes every byte outside `[A-Za-z0-9-]` as `%XX` so that `_` can join
/// the user and assistant parts without ambiguity.
fn escape_component(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for byte in part.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{:02X}", byte));
        }
    }
    escaped
}
