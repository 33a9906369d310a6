//! Error types for Porch.

use porch_core::{ConfigError, CoreError};
use porch_invite::{DecodeError, EncodeError};
use porch_vouch::VouchError;
use thiserror::Error;

/// Errors from any Porch component.
///
/// Admission verdicts are not errors; see
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, Error)]
pub enum PorchError {
    /// Key or signature handling error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Invalid network properties.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An invite string could not be parsed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// An invite could not be rendered.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// A vouch or anchor designation was refused.
    #[error("vouch error: {0}")]
    Vouch(#[from] VouchError),
}

/// Result type for Porch operations.
pub type Result<T> = std::result::Result<T, PorchError>;
