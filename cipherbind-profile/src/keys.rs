//! Key records and the repository that owns them.

use cipherbind_crypto::KeyMaterial;
use std::collections::BTreeMap;

/// A resolved key: its type and secret value.
#[derive(Debug, Clone)]
pub struct KeyRecord {
    pub id: String,
    pub label: String,
    pub key_type: String,
    value: KeyMaterial,
}

impl KeyRecord {
    pub fn new(id: impl Into<String>, key_type: impl Into<String>, value: KeyMaterial) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            key_type: key_type.into(),
            value,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The secret key bytes.
    pub fn value(&self) -> &KeyMaterial {
        &self.value
    }
}

/// Resolves keys by id.
pub trait KeyRepository: Send + Sync {
    /// Returns the key stored under `id`, if any.
    fn resolve(&self, id: &str) -> Option<KeyRecord>;

    /// All keys of the given type, sorted by id.
    fn keys_by_type(&self, key_type: &str) -> Vec<KeyRecord>;
}

/// Key repository held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyRepository {
    keys: BTreeMap<String, KeyRecord>,
}

impl InMemoryKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a key, replacing any key with the same id.
    pub fn insert(&mut self, key: KeyRecord) {
        self.keys.insert(key.id.clone(), key);
    }

    pub fn remove(&mut self, id: &str) -> Option<KeyRecord> {
        self.keys.remove(id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyRepository for InMemoryKeyRepository {
    fn resolve(&self, id: &str) -> Option<KeyRecord> {
        self.keys.get(id).cloned()
    }

    fn keys_by_type(&self, key_type: &str) -> Vec<KeyRecord> {
        self.keys
            .values()
            .filter(|k| k.key_type == key_type)
            .cloned()
            .collect()
    }
}
