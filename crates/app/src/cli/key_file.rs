use std::path::Path;

use tokio::io::AsyncWriteExt;
use zeroize::Zeroizing;

use common::crypto::{KeyError, SecretKey};

#[derive(Debug, thiserror::Error)]
pub enum KeyFileError {
    #[error("failed to access key file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid key file: {0}")]
    Key(#[from] KeyError),
}

/// Load a hex-encoded secret key from a file
pub async fn read_secret_key(path: &Path) -> Result<SecretKey, KeyFileError> {
    let contents = Zeroizing::new(tokio::fs::read_to_string(path).await?);
    Ok(SecretKey::from_hex(contents.trim())?)
}

/// Store a secret key as hex in a new file, readable only by the owner on unix
///
/// Fails if the file already exists.
pub async fn write_secret_key(path: &Path, secret_key: &SecretKey) -> Result<(), KeyFileError> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    let contents = Zeroizing::new(secret_key.to_hex());
    file.write_all(contents.as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;
    Ok(())
}
