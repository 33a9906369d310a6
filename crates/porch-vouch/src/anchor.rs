//! Trusted anchor designations.

use serde::{Deserialize, Serialize};

use porch_core::{Ed25519PublicKey, Timestamp};

/// An agent designated as a trusted anchor.
///
/// Designations are permanent. The founding anchor designates itself;
/// every later anchor is designated by an existing one or by the network's
/// bootstrap agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorDesignation {
    pub agent: Ed25519PublicKey,
    pub designated_by: Ed25519PublicKey,
    pub designated_at: Timestamp,
}

impl AnchorDesignation {
    pub fn new(
        agent: Ed25519PublicKey,
        designated_by: Ed25519PublicKey,
        designated_at: Timestamp,
    ) -> Self {
        Self {
            agent,
            designated_by,
            designated_at,
        }
    }

    /// Whether this is a self-designation, which only the founder makes.
    pub fn is_founding(&self) -> bool {
        self.agent == self.designated_by
    }
}
