//! TOML settings describing keys and profiles.
//!
//! ```toml
//! probe_length = 8
//!
//! [[keys]]
//! id = "main"
//! key_type = "encryption"
//! value = "<base64>"
//!
//! [[profiles]]
//! id = "default"
//! label = "Default"
//! algorithm = "chacha20_poly1305"
//! key = "main"
//! ```

use crate::error::{ProfileError, ProfileResult};
use crate::keys::{InMemoryKeyRepository, KeyRecord, KeyRepository};
use crate::method::KEY_TYPE_ENCRYPTION;
use crate::profile::EncryptionProfile;
use cipherbind_crypto::{KeyMaterial, PROBE_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Default settings file name.
pub const DEFAULT_SETTINGS_FILE: &str = "cipherbind.toml";

/// A key as written in the settings file. The value is base64.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_key_type")]
    pub key_type: String,
    pub value: String,
}

fn default_key_type() -> String {
    KEY_TYPE_ENCRYPTION.to_string()
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("key_type", &self.key_type)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Parsed settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_probe_length")]
    pub probe_length: usize,
    #[serde(default)]
    pub keys: Vec<KeyEntry>,
    #[serde(default)]
    pub profiles: Vec<EncryptionProfile>,
}

fn default_probe_length() -> usize {
    PROBE_LENGTH
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_length: default_probe_length(),
            keys: Vec::new(),
            profiles: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> ProfileResult<Self> {
        toml::from_str(contents).map_err(|e| ProfileError::Config(e.to_string()))
    }

    /// Reads and parses a settings file.
    pub fn load_from(path: &Path) -> ProfileResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        info!(
            keys = settings.keys.len(),
            profiles = settings.profiles.len(),
            "Loaded settings from {:?}",
            path
        );
        Ok(settings)
    }

    /// Builds a key repository from the configured keys. Key ids must be
    /// unique.
    pub fn key_repository(&self) -> ProfileResult<InMemoryKeyRepository> {
        let mut repository = InMemoryKeyRepository::new();
        for entry in &self.keys {
            if repository.resolve(&entry.id).is_some() {
                return Err(ProfileError::Config(format!(
                    "key '{}' is defined more than once",
                    entry.id
                )));
            }
            let value = KeyMaterial::from_base64(&entry.value)
                .map_err(|e| ProfileError::Config(format!("key '{}': {}", entry.id, e)))?;
            let label = if entry.label.is_empty() {
                entry.id.clone()
            } else {
                entry.label.clone()
            };
            repository.insert(KeyRecord::new(&entry.id, &entry.key_type, value).with_label(label));
        }
        Ok(repository)
    }
}
