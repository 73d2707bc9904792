use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::crypto::{
    self, derive_shared_secret, EnvelopeError, KeyPair, PublicKey, SecretKey, SharedSecret,
};

/// Errors raised by the registry's envelope helpers
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no sender registered under identifier {0:?}")]
    UnknownSender(String),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Long-lived receiver holding a static keypair and one shared secret per sender
///
/// Senders are registered under an opaque identifier together with their
/// public key; the shared secret is derived once and cached. Re-registering an
/// identifier overwrites its secret (last write wins).
///
/// Cloning is cheap and every clone refers to the same cache.
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug)]
struct RegistryInner {
    public_key: PublicKey,
    secret_key: SecretKey,
    /// identifier -> shared secret with that sender
    shared_secrets: RwLock<HashMap<String, SharedSecret>>,
}

impl Registry {
    /// Wrap an existing static keypair
    ///
    /// The registry never generates or rotates its own keys. A `public_key` that
    /// does not belong to `secret_key` is accepted (senders will then derive a
    /// secret nobody can match) but is reported at warn level.
    pub fn new(secret_key: SecretKey, public_key: PublicKey) -> Self {
        if secret_key.public() != public_key {
            tracing::warn!(
                public_key = %public_key,
                "registry public key does not match its secret key"
            );
        }

        Self {
            inner: Arc::new(RegistryInner {
                public_key,
                secret_key,
                shared_secrets: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn from_key_pair(pair: KeyPair) -> Self {
        Self::new(pair.secret, pair.public)
    }

    /// Our static public key, for senders to build their `Agent` against
    pub fn public_key(&self) -> PublicKey {
        self.inner.public_key
    }

    /// Derive and cache the shared secret for a sender
    ///
    /// Derivation happens before the write lock is taken, so concurrent
    /// registrations only serialize on the map insert itself.
    pub fn register(&self, identifier: impl Into<String>, sender: &PublicKey) {
        let identifier = identifier.into();
        let shared_secret = derive_shared_secret(&self.inner.secret_key, sender);

        let replaced = self
            .inner
            .shared_secrets
            .write()
            .insert(identifier.clone(), shared_secret)
            .is_some();

        tracing::debug!(
            identifier = %identifier,
            sender = %sender,
            replaced,
            "registered sender"
        );
    }

    /// Look up the cached shared secret for a sender
    pub fn shared_secret(&self, identifier: &str) -> Option<SharedSecret> {
        self.inner.shared_secrets.read().get(identifier).cloned()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.shared_secrets.read().contains_key(identifier)
    }

    /// Number of registered senders
    pub fn len(&self) -> usize {
        self.inner.shared_secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seal a document for a registered sender
    pub fn seal_for<T>(&self, identifier: &str, document: &T) -> Result<Vec<u8>, RegistryError>
    where
        T: Serialize + ?Sized,
    {
        let shared_secret = self.lookup(identifier)?;
        Ok(crypto::seal(&shared_secret, document)?)
    }

    /// Open a document sealed by a registered sender
    pub fn open_from<T>(&self, identifier: &str, envelope: &[u8]) -> Result<T, RegistryError>
    where
        T: DeserializeOwned,
    {
        let shared_secret = self.lookup(identifier)?;
        Ok(crypto::open(envelope, &shared_secret)?)
    }

    fn lookup(&self, identifier: &str) -> Result<SharedSecret, RegistryError> {
        self.shared_secret(identifier)
            .ok_or_else(|| RegistryError::UnknownSender(identifier.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::agent::Agent;

    fn registry() -> (Registry, KeyPair) {
        let pair = KeyPair::generate().unwrap();
        (Registry::from_key_pair(pair.clone()), pair)
    }

    #[test]
    fn test_register_and_lookup() {
        let (registry, pair) = registry();
        let sender = KeyPair::generate().unwrap();

        assert!(registry.is_empty());
        assert!(registry.shared_secret("sender").is_none());

        registry.register("sender", &sender.public);

        let cached = registry.shared_secret("sender").unwrap();
        assert_eq!(cached, derive_shared_secret(&pair.secret, &sender.public));
        assert_eq!(cached, derive_shared_secret(&sender.secret, &pair.public));
        assert!(registry.contains("sender"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reregistration_last_write_wins() {
        let (registry, pair) = registry();
        let first = KeyPair::generate().unwrap();
        let second = KeyPair::generate().unwrap();

        registry.register("id", &first.public);
        registry.register("id", &second.public);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.shared_secret("id").unwrap(),
            derive_shared_secret(&pair.secret, &second.public)
        );
    }

    #[test]
    fn test_public_key_is_stable() {
        let (registry, pair) = registry();
        assert_eq!(registry.public_key(), pair.public);
        registry.register("x", &KeyPair::generate().unwrap().public);
        assert_eq!(registry.public_key(), pair.public);
    }

    #[test]
    fn test_clones_share_cache() {
        let (registry, _) = registry();
        let handle = registry.clone();
        handle.register("shared", &KeyPair::generate().unwrap().public);
        assert!(registry.contains("shared"));
    }

    #[test]
    fn test_mismatched_pair_is_accepted() {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();
        let registry = Registry::new(a.secret, b.public);
        assert_eq!(registry.public_key(), b.public);
    }

    #[test]
    fn test_envelope_helpers() {
        let (registry, _) = registry();
        let agent = Agent::new(&registry.public_key()).unwrap();
        registry.register("agent", &agent.public_key());

        let envelope = agent.seal(&("hello", 42u32)).unwrap();
        let opened: (String, u32) = registry.open_from("agent", &envelope).unwrap();
        assert_eq!(opened, ("hello".to_string(), 42));

        let reply = registry.seal_for("agent", "ack").unwrap();
        let ack: String = agent.open(&reply).unwrap();
        assert_eq!(ack, "ack");
    }

    #[test]
    fn test_unknown_sender() {
        let (registry, _) = registry();
        let result: Result<String, _> = registry.open_from("ghost", &[0u8; 64]);
        match result {
            Err(RegistryError::UnknownSender(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected unknown sender, got {:?}", other),
        }
        assert!(matches!(
            registry.seal_for("ghost", "x"),
            Err(RegistryError::UnknownSender(_))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_keys() {
        let (registry, pair) = registry();
        let sender = KeyPair::generate().unwrap();
        registry.register("sender", &sender.public);

        let debug = format!("{:?}", registry);
        assert!(!debug.contains(&pair.secret.to_hex()));
        assert!(!debug.contains(&registry.shared_secret("sender").unwrap().to_hex()));
    }
}
