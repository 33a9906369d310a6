//! Hub-side invite issuance.

use porch_core::{
    sign_fields, Ed25519PublicKey, InviteId, Keypair, SigningFields, Timestamp, TrustConfig,
    DEFAULT_VALIDITY_WINDOW_MICROS,
};
use tracing::debug;

use crate::code::{
    InviteCode, LegacyInvite, StructuredInvite, DEFAULT_BOOTSTRAP_URL, DEFAULT_SIGNAL_URL,
};
use crate::codec::encode;
use crate::error::EncodeError;

/// Who an invite is for, and who vouches for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationRequest {
    /// Display name for the hub's records. Not part of the code.
    pub neighbor_name: String,
    pub voucher: Option<Ed25519PublicKey>,
}

impl InvitationRequest {
    pub fn new(neighbor_name: impl Into<String>) -> Self {
        Self {
            neighbor_name: neighbor_name.into(),
            voucher: None,
        }
    }

    /// Name an existing member who vouches for the invitee.
    pub fn with_voucher(mut self, voucher: Ed25519PublicKey) -> Self {
        self.voucher = Some(voucher);
        self
    }
}

/// An invite as the hub records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedInvitation {
    /// The shareable string.
    pub code: String,
    pub invite: InviteCode,
    /// Listed in `TrustConfig::revoked_invites` to withdraw the invite.
    pub id: InviteId,
    pub neighbor_name: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Signs and encodes invites on behalf of a hub.
#[derive(Debug, Clone)]
pub struct InviteIssuer {
    keypair: Keypair,
    network_id: String,
    signal_url: String,
    bootstrap_url: String,
    validity_window_micros: i64,
}

impl InviteIssuer {
    /// An issuer using the default signal and bootstrap services.
    pub fn new(keypair: Keypair, network_id: impl Into<String>) -> Self {
        Self {
            keypair,
            network_id: network_id.into(),
            signal_url: DEFAULT_SIGNAL_URL.to_string(),
            bootstrap_url: DEFAULT_BOOTSTRAP_URL.to_string(),
            validity_window_micros: DEFAULT_VALIDITY_WINDOW_MICROS,
        }
    }

    /// An issuer whose network and validity window follow `config`.
    ///
    /// `keypair` should match `config.issuer_public_key`; invites signed
    /// with any other key fail validation.
    pub fn from_config(keypair: Keypair, config: &TrustConfig) -> Self {
        Self::new(keypair, config.network_id.clone())
            .with_validity_window(config.validity_window_micros)
    }

    pub fn with_signal_url(mut self, url: impl Into<String>) -> Self {
        self.signal_url = url.into();
        self
    }

    pub fn with_bootstrap_url(mut self, url: impl Into<String>) -> Self {
        self.bootstrap_url = url.into();
        self
    }

    pub fn with_validity_window(mut self, micros: i64) -> Self {
        self.validity_window_micros = micros;
        self
    }

    /// The hub's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Issue a structured invite dated `now`.
    pub fn issue(
        &self,
        request: InvitationRequest,
        now: Timestamp,
    ) -> Result<IssuedInvitation, EncodeError> {
        let issuer = self.keypair.public_key();
        let fields = SigningFields::Structured {
            issuer: &issuer,
            network_id: &self.network_id,
            timestamp: now,
            signal_url: &self.signal_url,
        };
        let signature = sign_fields(&fields, &self.keypair);

        let invite = StructuredInvite {
            network_id: self.network_id.clone(),
            issuer,
            signal_url: self.signal_url.clone(),
            bootstrap_url: self.bootstrap_url.clone(),
            timestamp: now,
            signature: signature.as_bytes().to_vec(),
            voucher: request.voucher,
        };

        self.finish(InviteCode::Structured(invite), request.neighbor_name, now)
    }

    /// Issue a legacy invite for clients that predate the structured format.
    ///
    /// Legacy codes carry no voucher.
    pub fn issue_legacy(
        &self,
        hub_address: impl Into<String>,
        neighbor_name: impl Into<String>,
        now: Timestamp,
    ) -> Result<IssuedInvitation, EncodeError> {
        let hub_address = hub_address.into();
        let fields = SigningFields::Legacy {
            hub_address: &hub_address,
            network_id: &self.network_id,
            timestamp: now,
        };
        let signature = sign_fields(&fields, &self.keypair);

        let invite = LegacyInvite {
            hub_address,
            network_id: self.network_id.clone(),
            timestamp: now,
            signature: signature.as_bytes().to_vec(),
        };

        self.finish(InviteCode::Legacy(invite), neighbor_name.into(), now)
    }

    fn finish(
        &self,
        invite: InviteCode,
        neighbor_name: String,
        now: Timestamp,
    ) -> Result<IssuedInvitation, EncodeError> {
        let code = encode(&invite)?;
        let id = invite.id();
        debug!(
            invite = %id,
            network = %self.network_id,
            version = invite.version().prefix(),
            "issued invite"
        );

        Ok(IssuedInvitation {
            code,
            invite,
            id,
            neighbor_name,
            created_at: now,
            expires_at: now.saturating_add_micros(self.validity_window_micros),
        })
    }
}
