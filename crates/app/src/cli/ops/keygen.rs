use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use common::crypto::{generate_key_pair, RandomnessError};

use crate::cli::key_file::{write_secret_key, KeyFileError};

/// Generate a static receiver keypair
///
/// The secret key goes to a new file; only the public key is printed.
#[derive(Args, Debug, Clone)]
pub struct Keygen {
    /// Where to store the secret key (must not exist yet)
    #[arg(long)]
    pub secret_key_file: PathBuf,
}

#[derive(Debug, Serialize)]
struct KeygenOutput {
    public_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("keygen failed: {0}")]
    Randomness(#[from] RandomnessError),
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Keygen {
    type Error = KeygenError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pair = generate_key_pair()?;
        write_secret_key(&self.secret_key_file, &pair.secret).await?;
        tracing::info!(
            public_key = %pair.public,
            path = %self.secret_key_file.display(),
            "generated keypair"
        );

        let output = KeygenOutput {
            public_key: pair.public.to_hex(),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}
