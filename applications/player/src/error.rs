/// Player error types
use lumen_discovery::DiscoveryError;
use lumen_playback::BackendError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Playback backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for PlayerError {
    fn from(err: config::ConfigError) -> Self {
        PlayerError::Config(err.to_string())
    }
}
