use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use common::agent::Agent;
use common::crypto::{EnvelopeError, KeyError, PublicKey, RandomnessError};

use crate::cli::input::read_input;
use crate::state::EnvelopeEncoding;

/// Seal a JSON document for a receiver under a fresh sender identity
#[derive(Args, Debug, Clone)]
pub struct Seal {
    /// Receiver public key (hex)
    #[arg(long)]
    pub peer: String,

    /// JSON document to seal (reads stdin if omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Envelope text encoding (overrides the config file)
    #[arg(long, value_enum)]
    pub encoding: Option<EnvelopeEncoding>,
}

#[derive(Debug, Serialize)]
struct SealOutput {
    /// Sender public key the receiver needs to open the envelope
    sender: String,
    envelope: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("invalid peer key: {0}")]
    Key(#[from] KeyError),
    #[error("failed to create sender identity: {0}")]
    Randomness(#[from] RandomnessError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("seal failed: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Seal {
    type Error = SealError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let peer = PublicKey::from_hex(&self.peer)?;
        let text = read_input(self.input.as_deref()).await?;
        let document: serde_json::Value = serde_json::from_str(&text).map_err(SealError::Json)?;

        let agent = Agent::new(&peer)?;
        let envelope = agent.seal(&document)?;
        tracing::debug!(sender = %agent.public_key(), bytes = envelope.len(), "sealed document");

        let output = SealOutput {
            sender: agent.public_key().to_hex(),
            envelope: ctx.encoding(self.encoding).encode(&envelope),
        };
        serde_json::to_string_pretty(&output).map_err(SealError::Render)
    }
}
