use std::fmt;

use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

use super::entropy::{EntropySource, OsEntropy, RandomnessError};

/// Size of X25519 private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of X25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Errors that can occur when parsing keys from untyped input
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Public half of an X25519 keypair
///
/// Safe to log, print, and hand to peers. This is what a sender transmits to
/// a receiver (and vice versa) out of band before any envelope is exchanged.
///
/// # Examples
///
/// ```ignore
/// let pair = KeyPair::generate()?;
///
/// // Serialize to hex for transmission
/// let hex = pair.public.to_hex();
/// let recovered = PublicKey::from_hex(&hex)?;
/// assert_eq!(pair.public, recovered);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        PublicKey(bytes)
    }
}

impl From<PublicKey> for [u8; PUBLIC_KEY_SIZE] {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(anyhow::anyhow!(
                "invalid public key size, expected {}, got {}",
                PUBLIC_KEY_SIZE,
                bytes.len()
            )
            .into());
        }
        let mut buff = [0; PUBLIC_KEY_SIZE];
        buff.copy_from_slice(bytes);
        Ok(buff.into())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PublicKey {
    /// Parse a public key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = [0; PUBLIC_KEY_SIZE];
        hex::decode_to_slice(hex, &mut buff)
            .map_err(|_| anyhow::anyhow!("public key hex decode error"))?;
        Ok(buff.into())
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }

    /// Convert public key to hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn to_x25519(self) -> X25519PublicKey {
        X25519PublicKey::from(self.0)
    }
}

/// Private half of an X25519 keypair
///
/// The bytes are wiped from memory when the key is dropped. `Debug` never prints
/// key material; use [`SecretKey::to_hex`] when an export is explicitly wanted.
#[derive(Clone)]
pub struct SecretKey(StaticSecret);

impl From<[u8; PRIVATE_KEY_SIZE]> for SecretKey {
    fn from(secret: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(StaticSecret::from(secret))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl SecretKey {
    /// Parse a secret key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = Zeroizing::new([0; PRIVATE_KEY_SIZE]);
        hex::decode_to_slice(hex, &mut buff[..])
            .map_err(|_| anyhow::anyhow!("private key hex decode error"))?;
        Ok(Self::from(*buff))
    }

    /// Generate a new random secret key from the OS entropy source
    pub fn generate() -> Result<Self, RandomnessError> {
        Self::generate_with(&OsEntropy)
    }

    /// Generate a new random secret key from the given entropy source
    pub fn generate_with(entropy: &dyn EntropySource) -> Result<Self, RandomnessError> {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        entropy.fill(&mut bytes[..])?;
        Ok(Self::from(*bytes))
    }

    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(X25519PublicKey::from(&self.0).to_bytes())
    }

    /// Convert secret key to raw bytes
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Convert secret key to hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(Zeroizing::new(self.to_bytes()))
    }

    pub(crate) fn as_x25519(&self) -> &StaticSecret {
        &self.0
    }
}

/// A matched X25519 secret and public key
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public: PublicKey,
    pub secret: SecretKey,
}

impl From<SecretKey> for KeyPair {
    fn from(secret: SecretKey) -> Self {
        Self {
            public: secret.public(),
            secret,
        }
    }
}

impl KeyPair {
    /// Generate a fresh keypair from the OS entropy source
    pub fn generate() -> Result<Self, RandomnessError> {
        Self::generate_with(&OsEntropy)
    }

    /// Generate a fresh keypair from the given entropy source
    pub fn generate_with(entropy: &dyn EntropySource) -> Result<Self, RandomnessError> {
        SecretKey::generate_with(entropy).map(Self::from)
    }
}

/// Generate a fresh keypair from the OS entropy source
pub fn generate_key_pair() -> Result<KeyPair, RandomnessError> {
    KeyPair::generate()
}
