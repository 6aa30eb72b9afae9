//! Library error types. Gesture handlers never return these; malformed
//! gesture input is absorbed as a no-op.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid tunables: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("viewer needs at least one image")]
    NoImages,
    #[error("viewport dimensions must be positive")]
    BadViewport,
    #[error("image index {0} out of range")]
    BadIndex(usize),
}
