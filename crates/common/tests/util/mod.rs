//! Shared test utilities for agent/registry integration tests
#![allow(dead_code)]

use common::prelude::*;
use serde::{Deserialize, Serialize};

/// The document shape used across the integration tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub title: String,
    pub message: String,
}

impl Message {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Route test logs through the test harness; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A receiver registry over a freshly generated keypair
pub fn setup_registry() -> (Registry, KeyPair) {
    init_tracing();
    let pair = generate_key_pair().unwrap();
    let registry = Registry::new(pair.secret.clone(), pair.public);
    (registry, pair)
}
