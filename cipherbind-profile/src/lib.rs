//! Encryption profiles for cipherbind.
//!
//! A profile names an encryption method and a key. This crate defines:
//! - [`EncryptionProfile`] — the four-field binding that gets persisted
//! - [`EncryptionMethod`] / [`AlgorithmRegistry`] — method plugins and their lookup
//! - [`KeyRecord`] / [`KeyRepository`] — resolved keys and their lookup
//! - [`ProfileValidator`] — checks a binding before it is saved or used
//! - [`ProfileStore`] — storage that refuses invalid profiles
//! - [`EncryptService`] — encrypts and decrypts text through a profile
//! - [`Settings`] — TOML configuration of keys and profiles
//!
//! Collaborators are passed in explicitly; nothing here reaches for global
//! state.

mod error;
mod keys;
mod method;
mod profile;
mod registry;
mod service;
mod settings;
mod store;
mod validator;

pub use error::{ProfileError, ProfileResult, ValidationError, join_messages};
pub use keys::{InMemoryKeyRepository, KeyRecord, KeyRepository};
pub use method::{
    AlgorithmDefinition, BUILTIN_PROVIDER, ChaCha20Poly1305Method, EncryptionMethod,
    KEY_TYPE_ENCRYPTION,
};
pub use profile::{EncryptionProfile, ProfileDependencies};
pub use registry::{AlgorithmRegistry, MethodRegistry};
pub use service::EncryptService;
pub use settings::{DEFAULT_SETTINGS_FILE, KeyEntry, Settings};
pub use store::ProfileStore;
pub use validator::ProfileValidator;
