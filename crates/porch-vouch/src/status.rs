//! Membership status derivation.
//!
//! Status is a pure function of the vouches targeting an agent and the
//! already-resolved status of each voucher. Voucher status is looked up in
//! a snapshot, never derived recursively here; the ledger iterates the
//! snapshot to a fixed point.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use porch_core::{Ed25519PublicKey, VouchThresholds};

use crate::vouch::Vouch;

/// Resolved status per agent. Agents absent from the map are Pending.
pub type StatusSnapshot = BTreeMap<Ed25519PublicKey, MembershipStatus>;

/// Where an agent stands in the web of trust.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipStatus {
    /// Joined, no qualifying vouches yet.
    #[default]
    Pending,
    /// Some qualifying vouches, not enough to verify.
    PartiallyVouched(usize),
    /// Threshold met; a full member.
    Verified,
    /// Explicitly designated root of trust.
    TrustedAnchor,
}

impl MembershipStatus {
    /// Full members and anchors may participate.
    pub fn can_participate(&self) -> bool {
        matches!(self, MembershipStatus::Verified | MembershipStatus::TrustedAnchor)
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, MembershipStatus::TrustedAnchor)
    }
}

/// Qualifying vouches received, by voucher standing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VouchCounts {
    /// From vouchers resolved as Verified.
    pub from_members: usize,
    /// From vouchers resolved as TrustedAnchor.
    pub from_anchors: usize,
}

impl VouchCounts {
    pub fn total(&self) -> usize {
        self.from_members + self.from_anchors
    }
}

/// Count the qualifying vouches for `agent`.
///
/// Each voucher counts once no matter how many records it has for the
/// agent. Vouches from Pending or PartiallyVouched agents do not count.
pub fn count_vouches<'a>(
    agent: &Ed25519PublicKey,
    known_vouches: impl IntoIterator<Item = &'a Vouch>,
    resolved: &StatusSnapshot,
) -> VouchCounts {
    let vouchers: BTreeSet<&Ed25519PublicKey> = known_vouches
        .into_iter()
        .filter(|v| v.vouchee == *agent && v.voucher != *agent)
        .map(|v| &v.voucher)
        .collect();

    let mut counts = VouchCounts::default();
    for voucher in vouchers {
        match resolved.get(voucher) {
            Some(MembershipStatus::Verified) => counts.from_members += 1,
            Some(MembershipStatus::TrustedAnchor) => counts.from_anchors += 1,
            _ => {}
        }
    }
    counts
}

/// Derive `agent`'s status from the vouches it has received.
///
/// An agent the snapshot already records as a TrustedAnchor stays one.
/// Otherwise it is Verified when either threshold is met, PartiallyVouched
/// with at least one qualifying vouch, and Pending with none.
pub fn status_of<'a>(
    agent: &Ed25519PublicKey,
    known_vouches: impl IntoIterator<Item = &'a Vouch>,
    resolved: &StatusSnapshot,
    thresholds: &VouchThresholds,
) -> MembershipStatus {
    if resolved.get(agent).is_some_and(MembershipStatus::is_anchor) {
        return MembershipStatus::TrustedAnchor;
    }

    let counts = count_vouches(agent, known_vouches, resolved);
    if thresholds.met(counts.from_members, counts.from_anchors) {
        MembershipStatus::Verified
    } else if counts.total() > 0 {
        MembershipStatus::PartiallyVouched(counts.total())
    } else {
        MembershipStatus::Pending
    }
}
