//! Error types for Porch Core.

use thiserror::Error;

/// Errors from key handling and signature checks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Errors loading or checking a [`TrustConfig`](crate::TrustConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed network properties: {0}")]
    Json(#[from] serde_json::Error),

    #[error("network identifier must not be empty")]
    EmptyNetworkId,

    #[error("validity window must be positive, got {0} microseconds")]
    InvalidValidityWindow(i64),

    #[error("vouch thresholds must be at least 1")]
    ZeroThreshold,
}
