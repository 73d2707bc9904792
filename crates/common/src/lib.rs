/**
 * Cryptographic types and operations.
 *  - X25519 keypairs and entropy
 *  - Shared secret derivation
 *  - Nonce-prefixed authenticated envelopes
 */
pub mod crypto;
/**
 * Canonical (DAG-CBOR) encoding for the documents
 *  we seal, plus a schemaless container type.
 */
pub mod document;
/**
 * Sender side: an ephemeral identity with one
 *  cached secret toward a fixed receiver.
 */
pub mod agent;
/**
 * Receiver side: a static identity caching
 *  one shared secret per registered sender.
 */
pub mod registry;

pub mod prelude {
    pub use crate::agent::Agent;
    pub use crate::crypto::{
        derive_shared_secret, generate_key_pair, open, seal, EnvelopeError, KeyPair, PublicKey,
        RandomnessError, SecretKey, SharedSecret,
    };
    pub use crate::document::Document;
    pub use crate::registry::{Registry, RegistryError};
}
