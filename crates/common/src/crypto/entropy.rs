//! Source of cryptographically secure random bytes
//!
//! Key generation and envelope nonces both draw from an [`EntropySource`].
//! Production code uses [`OsEntropy`]; the trait exists so callers can plug in
//! a different source (hardware RNG, test doubles) without touching the protocol.

/// Errors raised when the entropy source cannot fill a buffer.
///
/// Fatal for the operation that asked for randomness. Nothing in this crate retries.
#[derive(Debug, thiserror::Error)]
#[error("entropy source failed to supply {requested} bytes: {source}")]
pub struct RandomnessError {
    requested: usize,
    #[source]
    source: getrandom::Error,
}

impl RandomnessError {
    pub fn new(requested: usize, source: getrandom::Error) -> Self {
        Self { requested, source }
    }

    /// Number of bytes the failed request asked for
    pub fn requested(&self) -> usize {
        self.requested
    }
}

/// A cryptographically secure random byte generator
pub trait EntropySource: Send + Sync {
    /// Fill `dest` completely or fail. Partial fills are never reported as success.
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomnessError>;
}

/// Entropy drawn from the operating system (`getrandom(2)`, `BCryptGenRandom`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomnessError> {
        getrandom::getrandom(dest).map_err(|e| RandomnessError::new(dest.len(), e))
    }
}
