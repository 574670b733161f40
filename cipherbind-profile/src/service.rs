//! Encrypting and decrypting text through a profile.

use crate::error::{ProfileError, ProfileResult, ValidationError};
use crate::keys::KeyRecord;
use crate::method::{AlgorithmDefinition, EncryptionMethod};
use crate::profile::EncryptionProfile;
use crate::validator::ProfileValidator;
use base64::{Engine, engine::general_purpose::STANDARD};
use cipherbind_crypto::CryptoError;
use std::sync::Arc;
use tracing::debug;

/// Routes text through the method and key a profile names.
///
/// The profile is validated on every call; an invalid profile is never used.
pub struct EncryptService<'a> {
    validator: ProfileValidator<'a>,
}

impl<'a> EncryptService<'a> {
    pub fn new(validator: ProfileValidator<'a>) -> Self {
        Self { validator }
    }

    /// Encrypts `plaintext` and returns the ciphertext as base64.
    pub fn encrypt(&self, profile: &EncryptionProfile, plaintext: &str) -> ProfileResult<String> {
        let (method, key) = self.resolve_valid(profile)?;
        let ciphertext = method.encrypt(plaintext.as_bytes(), key.value().as_bytes())?;
        debug!(profile_id = %profile.id, method_id = %method.definition().id, "Text encrypted");
        Ok(STANDARD.encode(ciphertext))
    }

    /// Decrypts base64 ciphertext produced by [`EncryptService::encrypt`].
    pub fn decrypt(&self, profile: &EncryptionProfile, encoded: &str) -> ProfileResult<String> {
        let (method, key) = self.resolve_valid(profile)?;
        if !method.definition().can_decrypt {
            return Err(ProfileError::CannotDecrypt(method.definition().id.clone()));
        }

        let ciphertext = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::Decryption(format!("invalid base64: {}", e)))?;
        let plaintext = method.decrypt(&ciphertext, key.value().as_bytes())?;
        debug!(profile_id = %profile.id, method_id = %method.definition().id, "Text decrypted");
        String::from_utf8(plaintext)
            .map_err(|e| CryptoError::Decryption(format!("invalid UTF-8: {}", e)).into())
    }

    /// Definitions of the available methods, sorted by id.
    pub fn methods(&self, include_deprecated: bool) -> Vec<AlgorithmDefinition> {
        self.validator.algorithms().definitions(include_deprecated)
    }

    fn resolve_valid(
        &self,
        profile: &EncryptionProfile,
    ) -> ProfileResult<(Arc<dyn EncryptionMethod>, KeyRecord)> {
        let errors = self.validator.validate(profile);
        if !errors.is_empty() {
            return Err(ProfileError::invalid(&profile.id, &errors));
        }

        // Collaborators may change between validation and lookup.
        let method = self
            .validator
            .algorithms()
            .resolve(&profile.algorithm_id)
            .ok_or_else(|| {
                ProfileError::invalid(
                    &profile.id,
                    &[ValidationError::UnknownAlgorithm(profile.algorithm_id.clone())],
                )
            })?;
        let key = self.validator.keys().resolve(&profile.key_id).ok_or_else(|| {
            ProfileError::invalid(
                &profile.id,
                &[ValidationError::UnknownKey(profile.key_id.clone())],
            )
        })?;
        Ok((method, key))
    }
}
