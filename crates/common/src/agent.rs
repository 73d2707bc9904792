use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::crypto::{
    self, derive_shared_secret, EntropySource, EnvelopeError, OsEntropy, PublicKey,
    RandomnessError, SecretKey, SharedSecret,
};

/// Short-lived sender identity bound to a single receiver
///
/// On construction an ephemeral keypair is generated, the shared secret toward
/// the receiver is derived, and the ephemeral secret key is dropped (and wiped).
/// What remains is the public key to hand to the receiver and the cached
/// shared secret to seal documents with.
///
/// Immutable after construction, so it can be shared freely across threads.
///
/// # Examples
///
/// ```ignore
/// let agent = Agent::new(&registry.public_key())?;
/// registry.register("agent-1", &agent.public_key());
///
/// let envelope = agent.seal(&note)?;
/// ```
#[derive(Debug, Clone)]
pub struct Agent {
    public_key: PublicKey,
    shared_secret: SharedSecret,
}

impl Agent {
    /// Create a sender identity toward `peer`, using the OS entropy source
    pub fn new(peer: &PublicKey) -> Result<Self, RandomnessError> {
        Self::with_entropy(peer, &OsEntropy)
    }

    /// Create a sender identity toward `peer`, drawing the ephemeral key from `entropy`
    pub fn with_entropy(
        peer: &PublicKey,
        entropy: &dyn EntropySource,
    ) -> Result<Self, RandomnessError> {
        let ephemeral = SecretKey::generate_with(entropy)?;
        let agent = Self {
            public_key: ephemeral.public(),
            shared_secret: derive_shared_secret(&ephemeral, peer),
        };

        tracing::debug!(
            agent = %agent.public_key,
            peer = %peer,
            "created sender identity"
        );
        Ok(agent)
    }

    /// Our ephemeral public key, to be sent to the receiver out of band
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// A copy of the cached shared secret toward the receiver
    pub fn shared_secret(&self) -> SharedSecret {
        self.shared_secret.clone()
    }

    /// Seal a document for the receiver
    pub fn seal<T>(&self, document: &T) -> Result<Vec<u8>, EnvelopeError>
    where
        T: Serialize + ?Sized,
    {
        crypto::seal(&self.shared_secret, document)
    }

    /// Open a document the receiver sealed for us
    pub fn open<T>(&self, envelope: &[u8]) -> Result<T, EnvelopeError>
    where
        T: DeserializeOwned,
    {
        crypto::open(envelope, &self.shared_secret)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::FailingEntropy;
    use crate::crypto::KeyPair;

    #[test]
    fn test_agent_derives_receiver_secret() {
        let receiver = KeyPair::generate().unwrap();
        let agent = Agent::new(&receiver.public).unwrap();

        let expected = derive_shared_secret(&receiver.secret, &agent.public_key());
        assert_eq!(agent.shared_secret(), expected);
    }

    #[test]
    fn test_each_agent_is_ephemeral() {
        let receiver = KeyPair::generate().unwrap();
        let a = Agent::new(&receiver.public).unwrap();
        let b = Agent::new(&receiver.public).unwrap();
        assert_ne!(a.public_key(), b.public_key());
        assert_ne!(a.shared_secret(), b.shared_secret());
    }

    #[test]
    fn test_accessors_are_stable() {
        let receiver = KeyPair::generate().unwrap();
        let agent = Agent::new(&receiver.public).unwrap();
        assert_eq!(agent.public_key(), agent.public_key());
        assert_eq!(agent.shared_secret(), agent.shared_secret());
    }

    #[test]
    fn test_agent_is_shareable_across_threads() {
        let receiver = KeyPair::generate().unwrap();
        let agent = Agent::new(&receiver.public).unwrap();
        let expected = agent.public_key();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    assert_eq!(agent.public_key(), expected);
                    let envelope = agent.seal("ping").unwrap();
                    let echoed: String = agent.open(&envelope).unwrap();
                    assert_eq!(echoed, "ping");
                });
            }
        });
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let receiver = KeyPair::generate().unwrap();
        let agent = Agent::new(&receiver.public).unwrap();
        let debug = format!("{:?}", agent);
        assert!(debug.contains(&agent.public_key().to_hex()));
        assert!(!debug.contains(&agent.shared_secret().to_hex()));
    }

    #[test]
    fn test_entropy_failure_yields_no_agent() {
        let receiver = KeyPair::generate().unwrap();
        assert!(Agent::with_entropy(&receiver.public, &FailingEntropy).is_err());
    }
}
