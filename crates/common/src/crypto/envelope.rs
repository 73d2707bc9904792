//! Authenticated document envelopes using XChaCha20-Poly1305
//!
//! # Wire Format
//!
//! ```text
//! [ nonce: 24 bytes ][ ciphertext: n bytes ][ poly1305 tag: 16 bytes ]
//! ```
//!
//! There is no version byte, key identifier or associated data. The nonce is
//! drawn fresh from the entropy source for every envelope; the 192-bit XChaCha
//! nonce makes random collisions under one key negligible.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::entropy::{EntropySource, OsEntropy, RandomnessError};
use super::shared_secret::SharedSecret;
use crate::document::{self, DeserializationError, SerializationError};

/// Size of XChaCha20-Poly1305 nonce in bytes
pub const NONCE_SIZE: usize = 24;
/// Size of the Poly1305 authentication tag in bytes
pub const TAG_SIZE: usize = 16;
/// Bytes an envelope adds on top of the encoded document
pub const ENVELOPE_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// Errors that can occur while sealing or opening an envelope
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("failed to draw envelope nonce: {0}")]
    Randomness(#[from] RandomnessError),
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] SerializationError),
    #[error("envelope shorter than nonce length ({len} < {} bytes)", NONCE_SIZE)]
    Format { len: usize },
    #[error("envelope failed authentication")]
    Authentication,
    #[error("failed to deserialize document: {0}")]
    Deserialization(#[from] DeserializationError),
    /// Only raised for payloads beyond the cipher's length limit (~256 GiB)
    #[error("payload too large to encrypt")]
    Encryption,
}

fn cipher(shared_secret: &SharedSecret) -> XChaCha20Poly1305 {
    XChaCha20Poly1305::new(Key::from_slice(shared_secret.bytes()))
}

/// Encrypt raw bytes into an envelope, drawing the nonce from `entropy`
pub fn seal_bytes_with(
    entropy: &dyn EntropySource,
    shared_secret: &SharedSecret,
    plaintext: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    entropy.fill(&mut nonce_bytes)?;
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher(shared_secret)
        .encrypt(nonce, plaintext)
        .map_err(|_| EnvelopeError::Encryption)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Encrypt raw bytes into an envelope with a nonce from the OS entropy source
pub fn seal_bytes(shared_secret: &SharedSecret, plaintext: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    seal_bytes_with(&OsEntropy, shared_secret, plaintext)
}

/// Decrypt an envelope back into raw bytes
///
/// # Errors
///
/// - `Format` if the envelope cannot even hold a nonce; no decryption is attempted
/// - `Authentication` if the tag does not verify (tampering, truncation, or the wrong key).
///   No plaintext is returned in that case, not even partially.
pub fn open_bytes(envelope: &[u8], shared_secret: &SharedSecret) -> Result<Vec<u8>, EnvelopeError> {
    if envelope.len() < NONCE_SIZE {
        return Err(EnvelopeError::Format {
            len: envelope.len(),
        });
    }

    let (nonce, body) = envelope.split_at(NONCE_SIZE);
    cipher(shared_secret)
        .decrypt(XNonce::from_slice(nonce), body)
        .map_err(|_| EnvelopeError::Authentication)
}

/// Serialize and seal a document, drawing the nonce from `entropy`
///
/// The document is serialized before any randomness is drawn, so a
/// serialization failure never consumes entropy.
pub fn seal_with<T>(
    entropy: &dyn EntropySource,
    shared_secret: &SharedSecret,
    document: &T,
) -> Result<Vec<u8>, EnvelopeError>
where
    T: Serialize + ?Sized,
{
    let plain = document::to_canonical_bytes(document)?;
    seal_bytes_with(entropy, shared_secret, &plain)
}

/// Serialize and seal a document under a shared secret
///
/// Returns `nonce || ciphertext || tag`. Every call draws an independent nonce.
///
/// # Examples
///
/// ```ignore
/// let envelope = seal(&agent.shared_secret(), &note)?;
/// let note: Note = open(&envelope, &registry.shared_secret("agent-1").unwrap())?;
/// ```
pub fn seal<T>(shared_secret: &SharedSecret, document: &T) -> Result<Vec<u8>, EnvelopeError>
where
    T: Serialize + ?Sized,
{
    seal_with(&OsEntropy, shared_secret, document)
}

/// Open an envelope and deserialize the document inside
pub fn open<T>(envelope: &[u8], shared_secret: &SharedSecret) -> Result<T, EnvelopeError>
where
    T: DeserializeOwned,
{
    let plain = open_bytes(envelope, shared_secret)?;
    Ok(document::from_canonical_bytes(&plain)?)
}
