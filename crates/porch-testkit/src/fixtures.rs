//! Test fixtures and helpers.
//!
//! Every key is derived from a fixed seed, so fixtures are identical across
//! runs and machines.

use porch_core::{Ed25519PublicKey, Keypair, Timestamp, TrustConfig};
use porch_invite::{InvitationRequest, InviteIssuer, IssuedInvitation};

/// Network seed used by every fixture.
pub const NETWORK_ID: &str = "elm-2025";

/// 2025-01-14T16:00:00Z, in microseconds.
pub const NOW: Timestamp = Timestamp::from_micros(1_736_870_400_000_000);

const HUB_SEED: [u8; 32] = [0xa0; 32];
const FOUNDER_SEED: [u8; 32] = [0xa1; 32];

/// A hub, its network configuration and a founding member.
pub struct NetworkFixture {
    pub hub: Keypair,
    pub founder: Keypair,
    pub config: TrustConfig,
    pub issuer: InviteIssuer,
}

impl NetworkFixture {
    /// A network with a bootstrap agent and no vouching requirement.
    pub fn new() -> Self {
        let hub = Keypair::from_seed(&HUB_SEED);
        let founder = Keypair::from_seed(&FOUNDER_SEED);
        let config =
            TrustConfig::new(NETWORK_ID, hub.public_key()).with_bootstrap_agent(founder.public_key());
        let issuer = InviteIssuer::from_config(hub.clone(), &config);
        Self {
            hub,
            founder,
            config,
            issuer,
        }
    }

    /// Require a voucher on every invite.
    pub fn with_vouching(mut self) -> Self {
        self.config = self.config.require_vouching(true);
        self
    }

    /// The founder's public key.
    pub fn founder_key(&self) -> Ed25519PublicKey {
        self.founder.public_key()
    }

    /// The `n`th neighbor's keypair. Distinct from the hub and founder.
    pub fn neighbor(&self, n: u8) -> Keypair {
        let mut seed = [0u8; 32];
        seed[0] = 0x4e;
        seed[1] = n;
        Keypair::from_seed(&seed)
    }

    /// Public keys of neighbors `0..count`.
    pub fn neighbors(&self, count: u8) -> Vec<Ed25519PublicKey> {
        (0..count).map(|n| self.neighbor(n).public_key()).collect()
    }

    /// An invite issued at [`NOW`].
    pub fn invite(&self, name: &str) -> IssuedInvitation {
        self.invite_at(name, NOW)
    }

    /// An invite issued at `at`.
    pub fn invite_at(&self, name: &str, at: Timestamp) -> IssuedInvitation {
        self.issuer
            .issue(InvitationRequest::new(name), at)
            .expect("fixture invite encodes")
    }

    /// An invite issued at [`NOW`] naming `voucher`.
    pub fn vouched_invite(&self, name: &str, voucher: Ed25519PublicKey) -> IssuedInvitation {
        self.issuer
            .issue(InvitationRequest::new(name).with_voucher(voucher), NOW)
            .expect("fixture invite encodes")
    }

    /// A legacy-format invite issued at [`NOW`].
    pub fn legacy_invite(&self, name: &str) -> IssuedInvitation {
        self.issuer
            .issue_legacy("hub.elm.local", name, NOW)
            .expect("fixture invite encodes")
    }
}

impl Default for NetworkFixture {
    fn default() -> Self {
        Self::new()
    }
}
