//! Canonical document encoding
//!
//! Anything that implements serde's `Serialize` can be sealed. Documents are
//! encoded as DAG-CBOR before encryption, so both ends agree on the exact bytes
//! regardless of which concrete Rust type they (de)serialize through.
//!
//! Callers without a schema of their own can use [`Document`], the generic
//! IPLD container, on either side.

use std::collections::TryReserveError;
use std::convert::Infallible;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_ipld_dagcbor::error::{DecodeError, EncodeError};

/// A schemaless document: maps, lists, strings, bytes, integers, floats, booleans and null
pub type Document = ipld_core::ipld::Ipld;

/// Raised when a value cannot be encoded as DAG-CBOR
pub type SerializationError = EncodeError<TryReserveError>;

/// Raised when bytes are not valid DAG-CBOR for the requested type
pub type DeserializationError = DecodeError<Infallible>;

/// Encode a document to its canonical DAG-CBOR bytes
pub fn to_canonical_bytes<T>(document: &T) -> Result<Vec<u8>, SerializationError>
where
    T: Serialize + ?Sized,
{
    serde_ipld_dagcbor::to_vec(document)
}

/// Decode a document from DAG-CBOR bytes
pub fn from_canonical_bytes<T>(bytes: &[u8]) -> Result<T, DeserializationError>
where
    T: DeserializeOwned,
{
    serde_ipld_dagcbor::from_slice(bytes)
}
