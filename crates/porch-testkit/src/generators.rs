//! Proptest generators for property-based testing.

use proptest::prelude::*;

use porch_core::{sign_fields, Ed25519PublicKey, Keypair, Timestamp};
use porch_invite::{InviteCode, LegacyInvite, StructuredInvite, DEFAULT_BOOTSTRAP_URL};
use porch_vouch::{AnchorDesignation, LedgerEntry, Vouch, VouchType};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a reasonable timestamp, including the pre-epoch range.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    (-(1i64 << 40)..=i64::MAX / 2).prop_map(Timestamp::from_micros)
}

/// Generate a network seed usable in either wire format.
pub fn network_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,23}".prop_map(String::from)
}

/// Generate a rendezvous URL.
pub fn signal_url() -> impl Strategy<Value = String> {
    "wss://[a-z]{1,12}\\.[a-z]{2,6}(/[a-z]{1,8})?".prop_map(String::from)
}

/// Generate a hub address with no delimiter in it.
pub fn hub_address() -> impl Strategy<Value = String> {
    "[a-z0-9.-]{1,32}".prop_map(String::from)
}

pub fn vouch_type() -> impl Strategy<Value = VouchType> {
    prop_oneof![
        Just(VouchType::PhysicalHandshake),
        Just(VouchType::ExistingRelationship),
        Just(VouchType::TrustedIntroduction),
    ]
}

/// A legacy invite with arbitrary signature bytes.
pub fn legacy_invite() -> impl Strategy<Value = LegacyInvite> {
    (
        hub_address(),
        network_id(),
        timestamp(),
        prop::collection::vec(any::<u8>(), 1..=64),
    )
        .prop_map(|(hub_address, network_id, timestamp, signature)| LegacyInvite {
            hub_address,
            network_id,
            timestamp,
            signature,
        })
}

/// A structured invite with arbitrary signature bytes.
pub fn structured_invite() -> impl Strategy<Value = StructuredInvite> {
    (
        network_id(),
        public_key(),
        signal_url(),
        timestamp(),
        prop::collection::vec(any::<u8>(), 64),
        proptest::option::of(public_key()),
    )
        .prop_map(
            |(network_id, issuer, signal_url, timestamp, signature, voucher)| StructuredInvite {
                network_id,
                issuer,
                signal_url,
                bootstrap_url: DEFAULT_BOOTSTRAP_URL.to_string(),
                timestamp,
                signature,
                voucher,
            },
        )
}

/// Either format, unsigned.
pub fn invite_code() -> impl Strategy<Value = InviteCode> {
    prop_oneof![
        legacy_invite().prop_map(InviteCode::Legacy),
        structured_invite().prop_map(InviteCode::Structured),
    ]
}

/// An invite correctly signed by the returned keypair.
pub fn signed_invite() -> impl Strategy<Value = (Keypair, InviteCode)> {
    (keypair(), invite_code()).prop_map(|(keypair, mut invite)| {
        if let InviteCode::Structured(ref mut structured) = invite {
            structured.issuer = keypair.public_key();
        }
        let signature = sign_fields(&invite.signing_fields(), &keypair);
        match invite {
            InviteCode::Legacy(ref mut legacy) => legacy.signature = signature.as_bytes().to_vec(),
            InviteCode::Structured(ref mut structured) => {
                structured.signature = signature.as_bytes().to_vec()
            }
        }
        (keypair, invite)
    })
}

/// `count` distinct agents from fixed seeds.
pub fn agents(count: u8) -> Vec<Ed25519PublicKey> {
    (0..count)
        .map(|n| {
            let mut seed = [0u8; 32];
            seed[0] = 0x7a;
            seed[1] = n;
            Keypair::from_seed(&seed).public_key()
        })
        .collect()
}

/// A committed history over `agents(count)`.
///
/// Agent 0 founds the network. Every other entry is a vouch between two
/// distinct agents or an anchor designation by an earlier anchor; entries
/// the ledger would refuse may appear and are expected to be skipped.
pub fn history(count: u8, max_entries: usize) -> impl Strategy<Value = Vec<LedgerEntry>> {
    let keys = agents(count);
    let founder = keys[0];
    let entry = (0..count, 0..count, vouch_type(), any::<bool>()).prop_map(
        move |(from, to, vouch_type, designate)| {
            let (from, to) = (keys[from as usize], keys[to as usize]);
            if designate {
                LedgerEntry::Anchor(AnchorDesignation::new(to, from, Timestamp::from_micros(1)))
            } else {
                LedgerEntry::Vouch(Vouch {
                    voucher: from,
                    vouchee: to,
                    vouch_type,
                    note: None,
                    timestamp: Timestamp::from_micros(2),
                })
            }
        },
    );
    prop::collection::vec(entry, 0..=max_entries).prop_map(move |mut entries| {
        entries.insert(
            0,
            LedgerEntry::Anchor(AnchorDesignation::new(
                founder,
                founder,
                Timestamp::from_micros(0),
            )),
        );
        entries
    })
}
