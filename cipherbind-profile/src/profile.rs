//! Encryption profiles and the dependencies they pull in.

use crate::keys::KeyRepository;
use crate::registry::AlgorithmRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named binding of an encryption method to a key.
///
/// The profile stores identifiers only. The method and key are looked up
/// whenever they are needed, so edits to either are always observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionProfile {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "algorithm", default)]
    pub algorithm_id: String,
    #[serde(rename = "key", default)]
    pub key_id: String,
}

impl EncryptionProfile {
    /// Creates a profile with no method or key selected yet.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            algorithm_id: String::new(),
            key_id: String::new(),
        }
    }

    pub fn with_algorithm(mut self, algorithm_id: impl Into<String>) -> Self {
        self.algorithm_id = algorithm_id.into();
        self
    }

    pub fn with_key(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = key_id.into();
        self
    }

    pub fn set_algorithm(&mut self, algorithm_id: impl Into<String>) {
        self.algorithm_id = algorithm_id.into();
    }

    pub fn set_key(&mut self, key_id: impl Into<String>) {
        self.key_id = key_id.into();
    }

    /// Computes what this profile depends on: the provider of its method and
    /// its key. Identifiers that do not resolve contribute nothing.
    pub fn dependencies(
        &self,
        algorithms: &dyn AlgorithmRegistry,
        keys: &dyn KeyRepository,
    ) -> ProfileDependencies {
        let mut deps = ProfileDependencies::default();
        if let Some(method) = algorithms.resolve(&self.algorithm_id) {
            deps.providers.insert(method.definition().provider.clone());
        }
        if let Some(key) = keys.resolve(&self.key_id) {
            deps.keys.insert(key.id);
        }
        deps
    }
}

/// Components a profile cannot outlive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDependencies {
    pub providers: BTreeSet<String>,
    pub keys: BTreeSet<String>,
}

impl ProfileDependencies {
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.keys.is_empty()
    }
}
