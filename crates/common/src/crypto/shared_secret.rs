//! Key agreement: X25519 Diffie-Hellman followed by BLAKE3 key derivation
//!
//! The raw DH output is never used as a key directly. It is passed through
//! `blake3::derive_key` under a fixed context string, which yields a uniformly
//! distributed 32-byte key suitable for XChaCha20-Poly1305.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::keys::{KeyError, PublicKey, SecretKey};

/// Size of a derived shared secret in bytes (256 bits)
pub const SHARED_SECRET_SIZE: usize = 32;

const KDF_CONTEXT: &str = "cryptdoc 2024-01-01 x25519 shared secret for xchacha20poly1305 envelopes";

/// A 256-bit symmetric key agreed between two keypairs
///
/// Both parties compute the same value:
/// `derive(a.secret, b.public) == derive(b.secret, a.public)`.
///
/// Comparisons run in constant time, the bytes are wiped on drop, and
/// `Debug` does not print them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl From<[u8; SHARED_SECRET_SIZE]> for SharedSecret {
    fn from(bytes: [u8; SHARED_SECRET_SIZE]) -> Self {
        SharedSecret(bytes)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

impl SharedSecret {
    /// Parse a shared secret from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut secret = SharedSecret([0; SHARED_SECRET_SIZE]);
        hex::decode_to_slice(hex, &mut secret.0)
            .map_err(|_| anyhow::anyhow!("shared secret hex decode error"))?;
        Ok(secret)
    }

    /// Get a reference to the secret key bytes
    pub fn bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }

    /// Copy the secret key bytes out
    pub fn to_bytes(&self) -> [u8; SHARED_SECRET_SIZE] {
        self.0
    }

    /// Convert the secret to a hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Derive the shared secret between our secret key and a peer's public key
///
/// Pure and deterministic. The scalar multiplication is constant time with
/// respect to `own`, and there is no failure path: both inputs are fixed-size keys.
pub fn derive_shared_secret(own: &SecretKey, peer: &PublicKey) -> SharedSecret {
    let dh = own.as_x25519().diffie_hellman(&peer.to_x25519());
    SharedSecret(blake3::derive_key(KDF_CONTEXT, dh.as_bytes()))
}
