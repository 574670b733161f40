//! Shared collaborators for profile tests.

#![allow(dead_code)]

use cipherbind_crypto::{CryptoResult, KeyMaterial, RandomStringGenerator, generate_random_key};
use cipherbind_profile::{
    AlgorithmDefinition, AlgorithmRegistry, EncryptionMethod, InMemoryKeyRepository, KeyRecord,
    KeyRepository, MethodRegistry,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic sample text: `length` copies of 'x'.
pub struct FixedRandom;

impl RandomStringGenerator for FixedRandom {
    fn generate(&self, length: usize) -> String {
        "x".repeat(length)
    }
}

/// Method double that records every probe call and returns canned errors.
/// Its "cipher" reverses the bytes.
pub struct ProbeSpy {
    definition: AlgorithmDefinition,
    errors: Vec<String>,
    calls: AtomicUsize,
    last_sample_len: AtomicUsize,
}

impl ProbeSpy {
    pub fn new(definition: AlgorithmDefinition) -> Arc<Self> {
        Self::failing(definition, Vec::new())
    }

    pub fn failing(definition: AlgorithmDefinition, errors: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            definition,
            errors: errors.into_iter().map(String::from).collect(),
            calls: AtomicUsize::new(0),
            last_sample_len: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_sample_len(&self) -> usize {
        self.last_sample_len.load(Ordering::SeqCst)
    }
}

impl EncryptionMethod for ProbeSpy {
    fn definition(&self) -> &AlgorithmDefinition {
        &self.definition
    }

    fn check_compatibility(&self, sample: &str, _key: &[u8]) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_sample_len.store(sample.len(), Ordering::SeqCst);
        self.errors.clone()
    }

    fn encrypt(&self, plaintext: &[u8], _key: &[u8]) -> CryptoResult<Vec<u8>> {
        Ok(plaintext.iter().rev().copied().collect())
    }

    fn decrypt(&self, ciphertext: &[u8], _key: &[u8]) -> CryptoResult<Vec<u8>> {
        Ok(ciphertext.iter().rev().copied().collect())
    }
}

/// Key repository wrapper counting lookups.
#[derive(Default)]
pub struct CountingKeys {
    pub inner: InMemoryKeyRepository,
    lookups: AtomicUsize,
}

impl CountingKeys {
    pub fn new(inner: InMemoryKeyRepository) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl KeyRepository for CountingKeys {
    fn resolve(&self, id: &str) -> Option<KeyRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(id)
    }

    fn keys_by_type(&self, key_type: &str) -> Vec<KeyRecord> {
        self.inner.keys_by_type(key_type)
    }
}

/// Method registry wrapper counting lookups.
pub struct CountingRegistry {
    pub inner: MethodRegistry,
    lookups: AtomicUsize,
}

impl CountingRegistry {
    pub fn new(inner: MethodRegistry) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl AlgorithmRegistry for CountingRegistry {
    fn resolve(&self, id: &str) -> Option<Arc<dyn EncryptionMethod>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(id)
    }

    fn definitions(&self, include_deprecated: bool) -> Vec<AlgorithmDefinition> {
        self.inner.definitions(include_deprecated)
    }
}

/// Repository holding a random 32-byte `encryption` key named `main`,
/// a 16-byte `encryption` key named `short` and an `rsa` key named `rsa`.
pub fn standard_keys() -> InMemoryKeyRepository {
    let mut keys = InMemoryKeyRepository::new();
    keys.insert(KeyRecord::new("main", "encryption", generate_random_key()).with_label("Main"));
    keys.insert(KeyRecord::new(
        "short",
        "encryption",
        KeyMaterial::from_bytes(vec![9u8; 16]),
    ));
    keys.insert(KeyRecord::new("rsa", "rsa", KeyMaterial::from_bytes(vec![1u8; 256])));
    keys
}

/// Registry holding `spy` plus the built-in methods.
pub fn registry_with(spy: Arc<ProbeSpy>) -> MethodRegistry {
    let mut registry = MethodRegistry::with_builtin_methods().unwrap();
    registry.register(spy).unwrap();
    registry
}
