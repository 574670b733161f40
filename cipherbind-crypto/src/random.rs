//! Random sample strings for algorithm self-checks.

use rand::Rng;

/// Default length of the sample text handed to compatibility probes.
pub const PROBE_LENGTH: usize = 8;

/// Produces random strings used as throwaway plaintext.
///
/// The output is test data, not secret material; implementations only need
/// to be unpredictable enough that a probe cannot special-case it.
pub trait RandomStringGenerator: Send + Sync {
    /// Returns a string of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Printable-ASCII generator backed by the OS RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomStrings;

impl RandomStringGenerator for OsRandomStrings {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rngs::OsRng;
        (0..length)
            .map(|_| char::from(rng.gen_range(0x20u8..=0x7E)))
            .collect()
    }
}
