//! Golden vectors driven through the wire codec and the validator.
//!
//! Every implementation must sign the same canonical bytes, so a code built
//! from a vector's recorded signature must be accepted here unchanged.

use porch::core::{Ed25519PublicKey, Timestamp, TrustConfig};
use porch::invite::{
    decode, encode, InviteCode, LegacyInvite, StructuredInvite, DEFAULT_BOOTSTRAP_URL,
};
use porch::{validate, validate_code, InvalidReason, ValidationResult};
use porch_testkit::vectors::{all_vectors, GoldenVector, VectorKind};

fn invite_from(vector: &GoldenVector) -> InviteCode {
    let signature = hex::decode(vector.expected_signature).unwrap();
    let timestamp = Timestamp::from_micros(vector.timestamp);
    match vector.kind {
        VectorKind::Legacy { hub_address } => InviteCode::Legacy(LegacyInvite {
            hub_address: hub_address.to_string(),
            network_id: vector.network_id.to_string(),
            timestamp,
            signature,
        }),
        VectorKind::Structured { signal_url } => InviteCode::Structured(StructuredInvite {
            network_id: vector.network_id.to_string(),
            issuer: Ed25519PublicKey::from_hex(vector.expected_public_key).unwrap(),
            signal_url: signal_url.to_string(),
            bootstrap_url: DEFAULT_BOOTSTRAP_URL.to_string(),
            timestamp,
            signature,
            voucher: None,
        }),
    }
}

fn config_for(vector: &GoldenVector) -> TrustConfig {
    TrustConfig::new(
        vector.network_id,
        Ed25519PublicKey::from_hex(vector.expected_public_key).unwrap(),
    )
}

#[test]
fn test_vectors_match_implementation() {
    for vector in all_vectors() {
        if let Err(error) = vector.verify() {
            panic!("{error}");
        }
    }
}

#[test]
fn test_vectors_validate() {
    let stranger = Ed25519PublicKey::from_bytes([0xee; 32]);
    for vector in all_vectors() {
        let invite = invite_from(&vector);
        let now = Timestamp::from_micros(vector.timestamp);
        assert_eq!(
            validate(&stranger, Some(&invite), &config_for(&vector), now),
            ValidationResult::Valid,
            "{}",
            vector.name
        );
    }
}

#[test]
fn test_vectors_survive_the_wire() {
    let stranger = Ed25519PublicKey::from_bytes([0xee; 32]);
    // Colons cannot appear in legacy fields on the wire.
    for vector in all_vectors()
        .into_iter()
        .filter(|v| !v.network_id.contains(':'))
        .filter(|v| !matches!(v.kind, VectorKind::Legacy { hub_address } if hub_address.contains(':')))
    {
        let invite = invite_from(&vector);
        let code = encode(&invite).unwrap();
        assert_eq!(decode(&code).unwrap(), invite, "{}", vector.name);

        let now = Timestamp::from_micros(vector.timestamp);
        assert!(
            validate_code(&stranger, Some(&code), &config_for(&vector), now).is_valid(),
            "{}",
            vector.name
        );
    }
}

#[test]
fn test_colon_vectors_are_not_interchangeable() {
    let vectors = all_vectors();
    let left = vectors
        .iter()
        .find(|v| v.name == "legacy colon in hub address")
        .unwrap();
    let right = vectors
        .iter()
        .find(|v| v.name == "legacy colon in network id")
        .unwrap();

    // Right's signature presented over left's fields.
    let mut forged = invite_from(left);
    if let InviteCode::Legacy(ref mut legacy) = forged {
        legacy.signature = hex::decode(right.expected_signature).unwrap();
    }
    assert_eq!(
        validate(
            &Ed25519PublicKey::from_bytes([0xee; 32]),
            Some(&forged),
            &config_for(left),
            Timestamp::from_micros(0),
        )
        .reason(),
        Some(InvalidReason::BadSignature)
    );
}
