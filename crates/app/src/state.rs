use std::fs;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "cryptdoc";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Text encoding used to print and read envelopes on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeEncoding {
    #[default]
    Hex,
    Base64,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid hex envelope: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid base64 envelope: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl EnvelopeEncoding {
    pub fn encode(&self, envelope: &[u8]) -> String {
        match self {
            EnvelopeEncoding::Hex => hex::encode(envelope),
            EnvelopeEncoding::Base64 => STANDARD.encode(envelope),
        }
    }

    /// Decode an envelope, ignoring surrounding whitespace
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
        let text = text.trim();
        Ok(match self {
            EnvelopeEncoding::Hex => hex::decode(text)?,
            EnvelopeEncoding::Base64 => STANDARD.decode(text)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log level (error, warn, info, debug, trace); RUST_LOG still applies on top
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// How envelopes are written to and read from text
    #[serde(default)]
    pub envelope_encoding: EnvelopeEncoding,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            envelope_encoding: EnvelopeEncoding::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path the config was (or would have been) loaded from
    pub config_path: Option<PathBuf>,
    /// Loaded configuration
    pub config: AppConfig,
    /// `config.log_level`, validated
    pub log_level: tracing::Level,
}

impl AppState {
    /// Default config location (~/.cryptdoc/config.toml)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(format!(".{}", APP_NAME)).join(CONFIG_FILE_NAME))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one the default location is tried,
    /// and a missing file there just means defaults.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let (config_path, required) = match custom_path {
            Some(path) => (Some(path), true),
            None => (Self::default_config_path(), false),
        };

        let config = match &config_path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            Some(path) if required => return Err(StateError::NotFound(path.clone())),
            _ => AppConfig::default(),
        };

        let log_level: tracing::Level = config
            .log_level
            .parse()
            .map_err(|_| StateError::InvalidLogLevel(config.log_level.clone()))?;

        Ok(Self {
            config_path,
            config,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid log level {0:?} (expected error, warn, info, debug or trace)")]
    InvalidLogLevel(String),
}
