//! The membership check every validating peer runs on a join attempt.
//!
//! Validation is a single pass that ends at the first failing step:
//!
//! 1. The bootstrap agent is admitted outright.
//! 2. Everyone else must present an invite.
//! 3. The invite must name this network.
//! 4. It must not have outlived the validity window.
//! 5. Its signature must verify against the network's issuer key.
//! 6. It must not have been revoked.
//! 7. If the network requires vouching, it must carry a voucher.
//!
//! Every input, including the current time, is an argument, so all peers
//! given the same inputs reach the same verdict.

use std::fmt;

use porch_core::{verify_fields, Ed25519PublicKey, Timestamp, TrustConfig};
use porch_invite::{decode, InviteCode};

use crate::bootstrap;

/// Why a join attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// No invite was presented.
    ProofRequired,
    /// The invite names another network.
    WrongNetwork,
    /// The invite is older than the validity window.
    Expired,
    /// The signature does not verify against the issuer key.
    BadSignature,
    /// The hub has withdrawn the invite.
    Revoked,
    /// The network requires a voucher and the invite carries none.
    VoucherRequired,
    /// The invite string does not decode.
    MalformedProof,
}

impl InvalidReason {
    /// Stable reason code, as reported to the joining peer.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::ProofRequired => "proof_required",
            InvalidReason::WrongNetwork => "wrong_network",
            InvalidReason::Expired => "expired",
            InvalidReason::BadSignature => "bad_signature",
            InvalidReason::Revoked => "revoked",
            InvalidReason::VoucherRequired => "voucher_required",
            InvalidReason::MalformedProof => "malformed_proof",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict on a join attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The refusal reason, if any.
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(reason) => Some(*reason),
        }
    }
}

impl From<InvalidReason> for ValidationResult {
    fn from(reason: InvalidReason) -> Self {
        ValidationResult::Invalid(reason)
    }
}

/// Decide whether `candidate` may join with `proof`.
pub fn validate(
    candidate: &Ed25519PublicKey,
    proof: Option<&InviteCode>,
    config: &TrustConfig,
    now: Timestamp,
) -> ValidationResult {
    if bootstrap::exempts(candidate, config) {
        return ValidationResult::Valid;
    }

    match check_invite(proof, config, now) {
        Ok(()) => ValidationResult::Valid,
        Err(reason) => ValidationResult::Invalid(reason),
    }
}

/// Like [`validate`], for a proof still in string form.
///
/// A proof that fails to decode is `malformed_proof`.
pub fn validate_code(
    candidate: &Ed25519PublicKey,
    code: Option<&str>,
    config: &TrustConfig,
    now: Timestamp,
) -> ValidationResult {
    if bootstrap::exempts(candidate, config) {
        return ValidationResult::Valid;
    }

    match code.map(decode).transpose() {
        Ok(invite) => validate(candidate, invite.as_ref(), config, now),
        Err(_) => ValidationResult::Invalid(InvalidReason::MalformedProof),
    }
}

fn check_invite(
    proof: Option<&InviteCode>,
    config: &TrustConfig,
    now: Timestamp,
) -> Result<(), InvalidReason> {
    let invite = proof.ok_or(InvalidReason::ProofRequired)?;

    if invite.network_id() != config.network_id {
        return Err(InvalidReason::WrongNetwork);
    }

    let expires_at = invite
        .timestamp()
        .saturating_add_micros(config.validity_window_micros);
    if now > expires_at {
        return Err(InvalidReason::Expired);
    }

    if !verify_fields(
        &invite.signing_fields(),
        invite.signature(),
        &config.issuer_public_key,
    ) {
        return Err(InvalidReason::BadSignature);
    }

    if config.is_revoked(&invite.id()) {
        return Err(InvalidReason::Revoked);
    }

    if config.require_vouching && invite.voucher().is_none() {
        return Err(InvalidReason::VoucherRequired);
    }

    Ok(())
}
