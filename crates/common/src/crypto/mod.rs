//! Cryptographic primitives for cryptdoc
//!
//! This module provides everything needed to seal a document for a peer:
//!
//! - **Identity**: X25519 keypairs (`SecretKey`/`PublicKey`), generated from the OS entropy source
//! - **Key Agreement**: X25519 Diffie-Hellman reduced through BLAKE3 key derivation
//!   into a 32-byte `SharedSecret`
//! - **Envelopes**: XChaCha20-Poly1305 authenticated encryption with a random
//!   24-byte nonce prepended to the ciphertext
//!
//! # Protocol Overview
//!
//! A sender and a receiver each hold a keypair. Once each side knows the other's
//! public key (how they learn it is out of scope), both derive the same shared secret:
//!
//! 1. `derive(sender.secret, receiver.public) == derive(receiver.secret, sender.public)`
//! 2. The sender seals documents with the shared secret: `nonce || ciphertext || tag`
//! 3. The receiver opens them with its own copy of the shared secret
//!
//! Envelopes carry no key identifier or algorithm tag. The caller must know which
//! shared secret applies before opening one.

mod entropy;
mod envelope;
mod keys;
mod shared_secret;

pub use entropy::{EntropySource, OsEntropy, RandomnessError};
pub use envelope::{
    open, open_bytes, seal, seal_bytes, seal_bytes_with, seal_with, EnvelopeError,
    ENVELOPE_OVERHEAD, NONCE_SIZE, TAG_SIZE,
};
pub use keys::{
    generate_key_pair, KeyError, KeyPair, PublicKey, SecretKey, PRIVATE_KEY_SIZE,
    PUBLIC_KEY_SIZE,
};
pub use shared_secret::{derive_shared_secret, SharedSecret, SHARED_SECRET_SIZE};

#[cfg(test)]
pub(crate) use entropy::test::FailingEntropy;
