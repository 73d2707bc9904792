use std::path::PathBuf;

use clap::Args;

use common::crypto::{KeyError, PublicKey};
use common::registry::{Registry, RegistryError};

use crate::cli::input::read_input;
use crate::cli::key_file::{read_secret_key, KeyFileError};
use crate::state::{EncodingError, EnvelopeEncoding};

/// Open an envelope as the receiver and print the JSON document inside
#[derive(Args, Debug, Clone)]
pub struct Open {
    /// File holding the receiver secret key (hex), as written by `keygen`
    #[arg(long)]
    pub secret_key_file: PathBuf,

    /// Sender public key printed by `seal` (hex)
    #[arg(long)]
    pub sender: String,

    /// Encoded envelope (reads stdin if omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Envelope text encoding (overrides the config file)
    #[arg(long, value_enum)]
    pub encoding: Option<EnvelopeEncoding>,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),
    #[error("invalid sender key: {0}")]
    Key(#[from] KeyError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("open failed: {0}")]
    Registry(#[from] RegistryError),
    #[error("failed to render document: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Open {
    type Error = OpenError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let secret_key = read_secret_key(&self.secret_key_file).await?;
        let sender = PublicKey::from_hex(&self.sender)?;
        let text = read_input(self.input.as_deref()).await?;
        let envelope = ctx.encoding(self.encoding).decode(&text)?;

        let public_key = secret_key.public();
        let registry = Registry::new(secret_key, public_key);
        let identifier = sender.to_hex();
        registry.register(identifier.as_str(), &sender);

        let document: serde_json::Value = registry.open_from(&identifier, &envelope)?;
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
