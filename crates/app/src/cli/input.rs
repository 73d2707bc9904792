use std::path::Path;

use tokio::io::AsyncReadExt;

/// Read command input from a file, or from stdin when no path is given
pub async fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            Ok(buf)
        }
    }
}
