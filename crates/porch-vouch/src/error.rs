//! Error types for the vouch ledger.

use porch_core::Ed25519PublicKey;
use thiserror::Error;

/// Why a vouch or anchor designation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VouchError {
    /// An agent tried to vouch for itself.
    #[error("agent {0} cannot vouch for itself")]
    SelfVouch(Ed25519PublicKey),

    /// The voucher has already vouched for this vouchee.
    #[error("{voucher} has already vouched for {vouchee}")]
    Duplicate {
        voucher: Ed25519PublicKey,
        vouchee: Ed25519PublicKey,
    },

    /// The designator is neither an anchor nor the bootstrap agent.
    #[error("{0} is not allowed to designate trusted anchors")]
    Unauthorized(Ed25519PublicKey),

    /// The agent is already a trusted anchor.
    #[error("{0} is already a trusted anchor")]
    AlreadyAnchor(Ed25519PublicKey),

    /// The note exceeds the length limit.
    #[error("vouch note is {len} bytes, limit is {max}")]
    NoteTooLong { len: usize, max: usize },
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, VouchError>;
