//! Error types for media discovery

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scan root not found: {0}")]
    RootNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),
}
