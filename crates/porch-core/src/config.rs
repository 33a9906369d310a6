//! Per-network trust configuration.
//!
//! A [`TrustConfig`] is a snapshot of the network's properties. It is owned
//! and replicated by the surrounding peer runtime; Porch only reads it, and
//! every decision function takes it as an explicit argument.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::crypto::Ed25519PublicKey;
use crate::error::ConfigError;
use crate::types::InviteId;

/// Seven days, in microseconds.
pub const DEFAULT_VALIDITY_WINDOW_MICROS: i64 = 7 * 24 * 60 * 60 * 1_000_000;

/// Vouches from verified members required for full membership.
pub const REQUIRED_VOUCHES_FROM_MEMBERS: usize = 2;

/// Vouches from trusted anchors required for full membership.
pub const REQUIRED_VOUCHES_FROM_ANCHOR: usize = 1;

/// How many vouches promote an agent to Verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VouchThresholds {
    /// Vouches needed when every voucher is a verified member.
    pub from_members: usize,
    /// Vouches needed when the vouchers are trusted anchors.
    pub from_anchors: usize,
}

impl VouchThresholds {
    /// Whether either threshold is met.
    pub fn met(&self, from_members: usize, from_anchors: usize) -> bool {
        from_anchors >= self.from_anchors || from_members >= self.from_members
    }
}

impl Default for VouchThresholds {
    fn default() -> Self {
        Self {
            from_members: REQUIRED_VOUCHES_FROM_MEMBERS,
            from_anchors: REQUIRED_VOUCHES_FROM_ANCHOR,
        }
    }
}

fn default_validity_window() -> i64 {
    DEFAULT_VALIDITY_WINDOW_MICROS
}

/// Trust configuration for one network.
///
/// Loaded from network properties, where public keys and invite ids are hex
/// strings:
///
/// ```
/// use porch_core::TrustConfig;
///
/// let config = TrustConfig::from_json(r#"{
///     "network_id": "elm-2025",
///     "issuer_public_key": "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
///     "require_vouching": true
/// }"#).unwrap();
/// assert!(config.require_vouching);
/// assert!(config.bootstrap_agent.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustConfig {
    /// The network seed every invite must name.
    pub network_id: String,

    /// The hub key invites must be signed with.
    pub issuer_public_key: Ed25519PublicKey,

    /// The founding agent, admitted without an invite.
    #[serde(default)]
    pub bootstrap_agent: Option<Ed25519PublicKey>,

    /// Whether a join proof must carry a voucher reference.
    #[serde(default)]
    pub require_vouching: bool,

    /// Vouch counts required for Verified status.
    #[serde(default)]
    pub thresholds: VouchThresholds,

    /// How long an invite stays usable after issuance.
    #[serde(default = "default_validity_window")]
    pub validity_window_micros: i64,

    /// Invites the hub has withdrawn.
    #[serde(default)]
    pub revoked_invites: BTreeSet<InviteId>,
}

impl TrustConfig {
    /// Create a configuration with default tunables.
    pub fn new(network_id: impl Into<String>, issuer_public_key: Ed25519PublicKey) -> Self {
        Self {
            network_id: network_id.into(),
            issuer_public_key,
            bootstrap_agent: None,
            require_vouching: false,
            thresholds: VouchThresholds::default(),
            validity_window_micros: DEFAULT_VALIDITY_WINDOW_MICROS,
            revoked_invites: BTreeSet::new(),
        }
    }

    /// Load and check network properties.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to network-properties JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations no validator could apply consistently.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.network_id.is_empty() {
            return Err(ConfigError::EmptyNetworkId);
        }
        if self.validity_window_micros <= 0 {
            return Err(ConfigError::InvalidValidityWindow(self.validity_window_micros));
        }
        if self.thresholds.from_members == 0 || self.thresholds.from_anchors == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }

    /// Set the founding agent.
    pub fn with_bootstrap_agent(mut self, agent: Ed25519PublicKey) -> Self {
        self.bootstrap_agent = Some(agent);
        self
    }

    /// Clear the founding agent once it has joined.
    pub fn without_bootstrap_agent(mut self) -> Self {
        self.bootstrap_agent = None;
        self
    }

    /// Require a voucher on every join proof.
    pub fn require_vouching(mut self, required: bool) -> Self {
        self.require_vouching = required;
        self
    }

    /// Override the vouch thresholds.
    pub fn with_thresholds(mut self, thresholds: VouchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Override the invite validity window.
    pub fn with_validity_window(mut self, micros: i64) -> Self {
        self.validity_window_micros = micros;
        self
    }

    /// Withdraw an issued invite.
    pub fn revoke_invite(mut self, id: InviteId) -> Self {
        self.revoked_invites.insert(id);
        self
    }

    /// Whether an invite has been withdrawn.
    pub fn is_revoked(&self, id: &InviteId) -> bool {
        self.revoked_invites.contains(id)
    }
}
