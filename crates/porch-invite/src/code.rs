//! The decoded form of an invite.

use porch_core::{canonicalize, Blake3Hash, Ed25519PublicKey, InviteId, SigningFields, Timestamp};

/// Signal server used when a hub does not configure its own.
pub const DEFAULT_SIGNAL_URL: &str = "wss://signal.holochain.org";

/// Bootstrap service assumed when a structured invite omits one.
pub const DEFAULT_BOOTSTRAP_URL: &str = "https://bootstrap.holochain.org";

/// Domain separation prefix for invite ids.
const INVITE_ID_DOMAIN: &[u8] = b"porch/invite-id/v1";

/// Wire format version, named by the code's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InviteVersion {
    Legacy,
    Structured,
}

impl InviteVersion {
    /// The prefix before the first `:`.
    pub const fn prefix(&self) -> &'static str {
        match self {
            InviteVersion::Legacy => "OURBLOCK_V1",
            InviteVersion::Structured => "OURBLOCK_V2",
        }
    }

    /// Look up a version by prefix. Unknown prefixes are `None`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "OURBLOCK_V1" => Some(InviteVersion::Legacy),
            "OURBLOCK_V2" => Some(InviteVersion::Structured),
            _ => None,
        }
    }
}

/// A legacy delimited invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyInvite {
    /// Address the hub was reachable at when it issued the invite.
    pub hub_address: String,
    pub network_id: String,
    pub timestamp: Timestamp,
    /// Raw signature bytes; length is checked at verification time.
    pub signature: Vec<u8>,
}

/// A structured invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredInvite {
    pub network_id: String,
    /// The issuing hub's identity key.
    pub issuer: Ed25519PublicKey,
    /// Rendezvous address for the joining peer.
    pub signal_url: String,
    pub bootstrap_url: String,
    pub timestamp: Timestamp,
    pub signature: Vec<u8>,
    /// An existing member vouching for the invitee. Not signed by the hub.
    pub voucher: Option<Ed25519PublicKey>,
}

impl StructuredInvite {
    /// Attach a voucher reference.
    pub fn with_voucher(mut self, voucher: Ed25519PublicKey) -> Self {
        self.voucher = Some(voucher);
        self
    }
}

/// An invite code, decoded.
///
/// Exactly one variant per code. Call sites match on the variant instead of
/// inspecting string prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteCode {
    Legacy(LegacyInvite),
    Structured(StructuredInvite),
}

impl InviteCode {
    /// The wire format this invite uses.
    pub fn version(&self) -> InviteVersion {
        match self {
            InviteCode::Legacy(_) => InviteVersion::Legacy,
            InviteCode::Structured(_) => InviteVersion::Structured,
        }
    }

    pub fn network_id(&self) -> &str {
        match self {
            InviteCode::Legacy(l) => &l.network_id,
            InviteCode::Structured(s) => &s.network_id,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            InviteCode::Legacy(l) => l.timestamp,
            InviteCode::Structured(s) => s.timestamp,
        }
    }

    pub fn signature(&self) -> &[u8] {
        match self {
            InviteCode::Legacy(l) => &l.signature,
            InviteCode::Structured(s) => &s.signature,
        }
    }

    /// The voucher reference, if the invite carries one.
    ///
    /// Legacy invites never do.
    pub fn voucher(&self) -> Option<&Ed25519PublicKey> {
        match self {
            InviteCode::Legacy(_) => None,
            InviteCode::Structured(s) => s.voucher.as_ref(),
        }
    }

    /// Attach a voucher reference to an already-signed invite.
    ///
    /// The signature does not cover the voucher, so this never invalidates
    /// it. Legacy codes have nowhere to carry a voucher and are returned
    /// unchanged.
    pub fn with_voucher(self, voucher: Ed25519PublicKey) -> Self {
        match self {
            InviteCode::Legacy(l) => InviteCode::Legacy(l),
            InviteCode::Structured(s) => InviteCode::Structured(s.with_voucher(voucher)),
        }
    }

    /// The fields the hub's signature covers, as claimed by this invite.
    pub fn signing_fields(&self) -> SigningFields<'_> {
        match self {
            InviteCode::Legacy(l) => SigningFields::Legacy {
                hub_address: &l.hub_address,
                network_id: &l.network_id,
                timestamp: l.timestamp,
            },
            InviteCode::Structured(s) => SigningFields::Structured {
                issuer: &s.issuer,
                network_id: &s.network_id,
                timestamp: s.timestamp,
                signal_url: &s.signal_url,
            },
        }
    }

    /// Content id: Blake3(domain || canonical signing bytes || signature).
    ///
    /// Attaching a voucher does not change the id, so revoking an invite
    /// covers every copy of it.
    pub fn id(&self) -> InviteId {
        let canonical = canonicalize(&self.signing_fields());
        let hash = Blake3Hash::hash_parts(&[INVITE_ID_DOMAIN, &canonical, self.signature()]);
        InviteId::from_bytes(hash.into_bytes())
    }
}

impl From<LegacyInvite> for InviteCode {
    fn from(invite: LegacyInvite) -> Self {
        InviteCode::Legacy(invite)
    }
}

impl From<StructuredInvite> for InviteCode {
    fn from(invite: StructuredInvite) -> Self {
        InviteCode::Structured(invite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porch_core::Keypair;

    fn structured() -> StructuredInvite {
        StructuredInvite {
            network_id: "elm-2025".into(),
            issuer: Keypair::from_seed(&[1; 32]).public_key(),
            signal_url: DEFAULT_SIGNAL_URL.into(),
            bootstrap_url: DEFAULT_BOOTSTRAP_URL.into(),
            timestamp: Timestamp::from_micros(1_000),
            signature: vec![7; 64],
            voucher: None,
        }
    }

    #[test]
    fn test_prefix_lookup() {
        for version in [InviteVersion::Legacy, InviteVersion::Structured] {
            assert_eq!(InviteVersion::from_prefix(version.prefix()), Some(version));
        }
        assert_eq!(InviteVersion::from_prefix("OURBLOCK_V3"), None);
        assert_eq!(InviteVersion::from_prefix("ourblock_v1"), None);
    }

    #[test]
    fn test_voucher_does_not_change_id() {
        let plain = InviteCode::from(structured());
        let vouched = InviteCode::from(
            structured().with_voucher(Keypair::from_seed(&[2; 32]).public_key()),
        );
        assert_eq!(plain.id(), vouched.id());
        assert!(vouched.voucher().is_some());
    }

    #[test]
    fn test_signature_changes_id() {
        let a = InviteCode::from(structured());
        let mut other = structured();
        other.signature[0] ^= 1;
        assert_ne!(a.id(), InviteCode::from(other).id());
    }

    #[test]
    fn test_legacy_has_no_voucher() {
        let legacy = InviteCode::Legacy(LegacyInvite {
            hub_address: "hub.local".into(),
            network_id: "elm-2025".into(),
            timestamp: Timestamp::from_micros(1),
            signature: vec![1; 64],
        });
        assert!(legacy.voucher().is_none());
        assert_eq!(legacy.version(), InviteVersion::Legacy);

        let voucher = Keypair::from_seed(&[2; 32]).public_key();
        assert_eq!(legacy.clone().with_voucher(voucher), legacy);
    }

    #[test]
    fn test_attach_voucher_to_decoded_code() {
        let voucher = Keypair::from_seed(&[2; 32]).public_key();
        let vouched = InviteCode::from(structured()).with_voucher(voucher);
        assert_eq!(vouched.voucher(), Some(&voucher));
        assert_eq!(vouched.id(), InviteCode::from(structured()).id());
        assert_eq!(vouched.signing_fields(), InviteCode::from(structured()).signing_fields());
    }
}
