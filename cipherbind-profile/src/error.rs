//! Error types for encryption profiles.

use cipherbind_crypto::CryptoError;
use thiserror::Error;

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// A single problem found while validating an algorithm/key binding.
///
/// Validation reports these as data; they only become a [`ProfileError`]
/// when a caller tries to persist or use an invalid profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no encryption method selected")]
    MissingAlgorithm,

    #[error("no encryption key selected")]
    MissingKey,

    #[error("encryption method '{0}' does not exist")]
    UnknownAlgorithm(String),

    #[error("key '{0}' does not exist")]
    UnknownKey(String),

    #[error(
        "key type '{key_type}' cannot be used with this encryption method (allowed: {})",
        .allowed.join(", ")
    )]
    KeyTypeMismatch {
        key_type: String,
        allowed: Vec<String>,
    },

    /// Reported by the encryption method's own compatibility probe.
    #[error("{0}")]
    Compatibility(String),
}

/// Joins validation messages into the single line shown to administrators.
pub fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by profile storage, encryption and configuration.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid encryption profile '{profile_id}': {message}")]
    Invalid { profile_id: String, message: String },

    #[error("encryption profile not found: {0}")]
    NotFound(String),

    #[error("encryption method already registered: {0}")]
    AlgorithmAlreadyRegistered(String),

    #[error("encryption method '{0}' cannot decrypt")]
    CannotDecrypt(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProfileError {
    /// Builds the aggregated rejection for a profile that failed validation.
    pub fn invalid(profile_id: &str, errors: &[ValidationError]) -> Self {
        Self::Invalid {
            profile_id: profile_id.to_string(),
            message: join_messages(errors),
        }
    }
}
