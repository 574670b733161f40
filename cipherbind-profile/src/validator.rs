//! Validation of algorithm/key bindings.
//!
//! Checks run cheapest first and stop at two checkpoints: missing ids are
//! never looked up, and unresolvable ids never reach the compatibility
//! probe. The probe is the only step that sees the key value.

use crate::error::ValidationError;
use crate::keys::KeyRepository;
use crate::profile::EncryptionProfile;
use crate::registry::AlgorithmRegistry;
use cipherbind_crypto::{PROBE_LENGTH, RandomStringGenerator};
use tracing::debug;

/// Validates profiles against a method registry and a key repository.
#[derive(Clone, Copy)]
pub struct ProfileValidator<'a> {
    algorithms: &'a dyn AlgorithmRegistry,
    keys: &'a dyn KeyRepository,
    random: &'a dyn RandomStringGenerator,
    probe_length: usize,
}

impl<'a> ProfileValidator<'a> {
    pub fn new(
        algorithms: &'a dyn AlgorithmRegistry,
        keys: &'a dyn KeyRepository,
        random: &'a dyn RandomStringGenerator,
    ) -> Self {
        Self {
            algorithms,
            keys,
            random,
            probe_length: PROBE_LENGTH,
        }
    }

    /// Overrides the length of the sample text passed to the probe.
    pub fn with_probe_length(mut self, probe_length: usize) -> Self {
        self.probe_length = probe_length;
        self
    }

    pub fn algorithms(&self) -> &'a dyn AlgorithmRegistry {
        self.algorithms
    }

    pub fn keys(&self) -> &'a dyn KeyRepository {
        self.keys
    }

    /// Validates a profile. An empty list means the profile may be saved.
    pub fn validate(&self, profile: &EncryptionProfile) -> Vec<ValidationError> {
        let errors = self.validate_binding(&profile.algorithm_id, &profile.key_id);
        debug!(
            profile_id = %profile.id,
            errors = errors.len(),
            "Encryption profile validated"
        );
        errors
    }

    /// Validates a candidate method/key pair without a profile around it.
    pub fn validate_binding(&self, algorithm_id: &str, key_id: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if algorithm_id.is_empty() {
            errors.push(ValidationError::MissingAlgorithm);
        }
        if key_id.is_empty() {
            errors.push(ValidationError::MissingKey);
        }
        if !errors.is_empty() {
            return errors;
        }

        let method = self.algorithms.resolve(algorithm_id);
        if method.is_none() {
            errors.push(ValidationError::UnknownAlgorithm(algorithm_id.to_string()));
        }
        let key = self.keys.resolve(key_id);
        if key.is_none() {
            errors.push(ValidationError::UnknownKey(key_id.to_string()));
        }
        let (Some(method), Some(key)) = (method, key) else {
            return errors;
        };

        let definition = method.definition();
        if !definition.accepts_key_type(&key.key_type) {
            errors.push(ValidationError::KeyTypeMismatch {
                key_type: key.key_type.clone(),
                allowed: definition.allowed_key_types.iter().cloned().collect(),
            });
        }

        let sample = self.random.generate(self.probe_length);
        errors.extend(
            method
                .check_compatibility(&sample, key.value().as_bytes())
                .into_iter()
                .map(ValidationError::Compatibility),
        );

        debug!(
            algorithm_id,
            key_id,
            errors = errors.len(),
            "Compatibility probe finished"
        );
        errors
    }
}
