//! Cipher layer for cipherbind.
//!
//! Provides the primitives encryption profiles are built on:
//! - ChaCha20-Poly1305 authenticated encryption with random nonces
//! - Opaque key material with zeroization and redacted `Debug`
//! - Random sample strings for algorithm compatibility probes
//!
//! Nothing in this crate knows about profiles or registries; it only
//! encrypts, decrypts and holds bytes.

mod cipher;
mod error;
mod key;
mod random;

pub use cipher::{EncryptedData, NONCE_SIZE, TAG_SIZE, decrypt, encrypt};
pub use error::{CryptoError, CryptoResult};
pub use key::{KEY_SIZE, KeyMaterial, generate_random_key};
pub use random::{OsRandomStrings, PROBE_LENGTH, RandomStringGenerator};
