//! Vouch records.
//!
//! A vouch is one agent's attestation that another is a legitimate
//! neighbor. Records are immutable once created; there is no update or
//! retraction.

use serde::{Deserialize, Serialize};

use porch_core::{canonical_encode, Blake3Hash, CanonicalValue, Ed25519PublicKey, Timestamp, VouchId};

use crate::error::{Result, VouchError};

/// Longest note a vouch may carry, in bytes.
pub const MAX_NOTE_LENGTH: usize = 200;

/// Domain separation prefix for vouch ids.
const VOUCH_ID_DOMAIN: &str = "porch/vouch-id/v1";

/// How the voucher came to trust the vouchee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VouchType {
    /// Met in person and checked identity.
    #[default]
    PhysicalHandshake,
    /// Already knew them as a neighbor, friend or family.
    ExistingRelationship,
    /// Introduced by someone the voucher trusts.
    TrustedIntroduction,
}

impl VouchType {
    fn tag(&self) -> u64 {
        match self {
            VouchType::PhysicalHandshake => 0,
            VouchType::ExistingRelationship => 1,
            VouchType::TrustedIntroduction => 2,
        }
    }
}

/// One agent vouching for another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vouch {
    pub voucher: Ed25519PublicKey,
    pub vouchee: Ed25519PublicKey,
    pub vouch_type: VouchType,
    pub note: Option<String>,
    pub timestamp: Timestamp,
}

impl Vouch {
    /// Build a vouch, rejecting self-vouches and oversized notes.
    pub fn new(
        voucher: Ed25519PublicKey,
        vouchee: Ed25519PublicKey,
        vouch_type: VouchType,
        note: Option<String>,
        timestamp: Timestamp,
    ) -> Result<Self> {
        let vouch = Self {
            voucher,
            vouchee,
            vouch_type,
            note,
            timestamp,
        };
        vouch.check()?;
        Ok(vouch)
    }

    /// Check the rules a single record must satisfy on its own.
    pub fn check(&self) -> Result<()> {
        if self.voucher == self.vouchee {
            return Err(VouchError::SelfVouch(self.voucher));
        }
        if let Some(note) = &self.note {
            if note.len() > MAX_NOTE_LENGTH {
                return Err(VouchError::NoteTooLong {
                    len: note.len(),
                    max: MAX_NOTE_LENGTH,
                });
            }
        }
        Ok(())
    }

    /// Content id over the canonical encoding of every field.
    pub fn id(&self) -> VouchId {
        // Integer keys; the encoder sorts them.
        let value = CanonicalValue::Map(vec![
            (CanonicalValue::Uint(0), CanonicalValue::Text(VOUCH_ID_DOMAIN)),
            (CanonicalValue::Uint(1), CanonicalValue::Bytes(self.voucher.as_bytes())),
            (CanonicalValue::Uint(2), CanonicalValue::Bytes(self.vouchee.as_bytes())),
            (CanonicalValue::Uint(3), CanonicalValue::Uint(self.vouch_type.tag())),
            (
                CanonicalValue::Uint(4),
                match &self.note {
                    Some(note) => CanonicalValue::Text(note),
                    None => CanonicalValue::Null,
                },
            ),
            (CanonicalValue::Uint(5), CanonicalValue::Int(self.timestamp.as_micros())),
        ]);
        VouchId::from_bytes(Blake3Hash::hash(&canonical_encode(&value)).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porch_core::Keypair;

    fn keys() -> (Ed25519PublicKey, Ed25519PublicKey) {
        (
            Keypair::from_seed(&[1; 32]).public_key(),
            Keypair::from_seed(&[2; 32]).public_key(),
        )
    }

    #[test]
    fn test_self_vouch_rejected() {
        let (a, _) = keys();
        let err = Vouch::new(a, a, VouchType::default(), None, Timestamp::from_micros(0));
        assert_eq!(err, Err(VouchError::SelfVouch(a)));
    }

    #[test]
    fn test_note_limit_is_inclusive() {
        let (a, b) = keys();
        let at_limit = "x".repeat(MAX_NOTE_LENGTH);
        assert!(Vouch::new(a, b, VouchType::default(), Some(at_limit), Timestamp::from_micros(0)).is_ok());

        let over = "x".repeat(MAX_NOTE_LENGTH + 1);
        assert_eq!(
            Vouch::new(a, b, VouchType::default(), Some(over), Timestamp::from_micros(0)),
            Err(VouchError::NoteTooLong {
                len: MAX_NOTE_LENGTH + 1,
                max: MAX_NOTE_LENGTH
            })
        );
    }

    #[test]
    fn test_note_limit_counts_bytes() {
        let (a, b) = keys();
        // 101 two-byte characters.
        let note = "é".repeat(101);
        assert!(matches!(
            Vouch::new(a, b, VouchType::default(), Some(note), Timestamp::from_micros(0)),
            Err(VouchError::NoteTooLong { len: 202, .. })
        ));
    }

    #[test]
    fn test_id_covers_every_field() {
        let (a, b) = keys();
        let base = Vouch::new(a, b, VouchType::PhysicalHandshake, None, Timestamp::from_micros(5)).unwrap();

        let mut other_type = base.clone();
        other_type.vouch_type = VouchType::TrustedIntroduction;
        let mut with_note = base.clone();
        with_note.note = Some(String::new());
        let mut later = base.clone();
        later.timestamp = Timestamp::from_micros(6);
        let mut reversed = base.clone();
        std::mem::swap(&mut reversed.voucher, &mut reversed.vouchee);

        let ids = [base.id(), other_type.id(), with_note.id(), later.id(), reversed.id()];
        for (i, x) in ids.iter().enumerate() {
            for y in &ids[i + 1..] {
                assert_ne!(x, y);
            }
        }
        assert_eq!(base.id(), base.clone().id());
    }

    #[test]
    fn test_default_type() {
        assert_eq!(VouchType::default(), VouchType::PhysicalHandshake);
    }
}
