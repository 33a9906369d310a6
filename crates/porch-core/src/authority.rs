//! Signing and verification of invite payloads.
//!
//! The hub signs [`canonicalize`]d fields with its identity key; validators
//! recompute the same bytes from the fields an invite claims and check the
//! signature against the network's configured issuer key.

use crate::canonical::{canonicalize, SigningFields};
use crate::crypto::{Ed25519PublicKey, Ed25519Signature, Keypair};

/// Sign canonical bytes with the issuer's keypair.
pub fn sign(message: &[u8], keypair: &Keypair) -> Ed25519Signature {
    keypair.sign(message)
}

/// Verify a signature given as raw bytes.
///
/// Returns `false` for a malformed key, a signature of the wrong length, or
/// a mismatch; it never panics. Verification is strict and the underlying
/// implementation does not branch on secret material.
pub fn verify(message: &[u8], signature: &[u8], public_key: &Ed25519PublicKey) -> bool {
    public_key.verify(message, signature).is_ok()
}

/// Canonicalize and sign in one step.
pub fn sign_fields(fields: &SigningFields<'_>, keypair: &Keypair) -> Ed25519Signature {
    sign(&canonicalize(fields), keypair)
}

/// Canonicalize and verify in one step.
pub fn verify_fields(
    fields: &SigningFields<'_>,
    signature: &[u8],
    public_key: &Ed25519PublicKey,
) -> bool {
    verify(&canonicalize(fields), signature, public_key)
}
