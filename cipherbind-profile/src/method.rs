//! Encryption method plugins.
//!
//! A method is described by an [`AlgorithmDefinition`] and implements the
//! actual cipher along with a compatibility probe that a profile runs
//! against its real key before it is saved.

use cipherbind_crypto::{CryptoResult, EncryptedData, KEY_SIZE, decrypt, encrypt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Key type understood by methods that take raw symmetric key bytes.
pub const KEY_TYPE_ENCRYPTION: &str = "encryption";

/// Provider name for methods shipped with this crate.
pub const BUILTIN_PROVIDER: &str = "cipherbind";

/// Registry entry describing an encryption method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmDefinition {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Key types this method accepts. Empty means any key type.
    #[serde(default)]
    pub allowed_key_types: BTreeSet<String>,
    #[serde(default = "default_true")]
    pub can_decrypt: bool,
    #[serde(default)]
    pub deprecated: bool,
    pub provider: String,
}

fn default_true() -> bool {
    true
}

impl AlgorithmDefinition {
    /// A decryptable, non-deprecated method accepting any key type.
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            allowed_key_types: BTreeSet::new(),
            can_decrypt: true,
            deprecated: false,
            provider: BUILTIN_PROVIDER.into(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_key_types<I, S>(mut self, key_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_key_types = key_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_provider(mut self, provider: &str) -> Self {
        self.provider = provider.into();
        self
    }

    /// Marks the method as encrypt-only.
    pub fn one_way(mut self) -> Self {
        self.can_decrypt = false;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Whether a key of `key_type` may be used with this method.
    pub fn accepts_key_type(&self, key_type: &str) -> bool {
        self.allowed_key_types.is_empty() || self.allowed_key_types.contains(key_type)
    }
}

/// An encryption method plugin.
pub trait EncryptionMethod: Send + Sync {
    fn definition(&self) -> &AlgorithmDefinition;

    /// Checks that this method can work with `key` in the current
    /// environment, using `sample` as throwaway plaintext.
    /// Returns one message per problem; empty means compatible.
    fn check_compatibility(&self, sample: &str, key: &[u8]) -> Vec<String>;

    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>>;

    fn decrypt(&self, ciphertext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>>;
}

/// ChaCha20-Poly1305 with a random 96-bit nonce prepended to each ciphertext.
pub struct ChaCha20Poly1305Method {
    definition: AlgorithmDefinition,
}

impl ChaCha20Poly1305Method {
    pub const ID: &'static str = "chacha20_poly1305";

    pub fn new() -> Self {
        Self {
            definition: AlgorithmDefinition::new(Self::ID, "ChaCha20-Poly1305")
                .with_description("Authenticated encryption with a 256-bit key")
                .with_key_types([KEY_TYPE_ENCRYPTION]),
        }
    }
}

impl Default for ChaCha20Poly1305Method {
    fn default() -> Self {
        Self::new()
    }
}

impl EncryptionMethod for ChaCha20Poly1305Method {
    fn definition(&self) -> &AlgorithmDefinition {
        &self.definition
    }

    fn check_compatibility(&self, sample: &str, key: &[u8]) -> Vec<String> {
        if key.len() != KEY_SIZE {
            return vec![format!(
                "key size must be {} bytes ({} bits), got {} bytes",
                KEY_SIZE,
                KEY_SIZE * 8,
                key.len()
            )];
        }

        let roundtrip = self
            .encrypt(sample.as_bytes(), key)
            .and_then(|ciphertext| self.decrypt(&ciphertext, key));
        match roundtrip {
            Ok(plaintext) if plaintext == sample.as_bytes() => Vec::new(),
            Ok(_) => vec![format!("{} round trip returned different text", Self::ID)],
            Err(e) => vec![format!("{} round trip failed: {}", Self::ID, e)],
        }
    }

    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
        Ok(encrypt(key, plaintext)?.to_bytes())
    }

    fn decrypt(&self, ciphertext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
        decrypt(key, &EncryptedData::from_bytes(ciphertext)?)
    }
}
