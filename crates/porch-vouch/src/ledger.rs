//! The vouch ledger.
//!
//! Holds the committed vouches and anchor designations of one network and
//! derives every known agent's [`MembershipStatus`] from them.
//!
//! Status is resolved in passes. Each pass recomputes all agents against the
//! snapshot left by the previous pass, so a pass never sees its own output.
//! Statuses only rise from one pass to the next, which makes the fixed point
//! independent of the order in which vouches were recorded.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use porch_core::{Ed25519PublicKey, Timestamp, TrustConfig, VouchThresholds};

use crate::anchor::AnchorDesignation;
use crate::error::{Result, VouchError};
use crate::status::{self, MembershipStatus, StatusSnapshot};
use crate::vouch::{Vouch, VouchType};

/// One committed record, as replayed from network history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntry {
    Vouch(Vouch),
    Anchor(AnchorDesignation),
}

/// A vouch received, annotated with the voucher's standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VouchInfo {
    pub vouch: Vouch,
    pub is_from_anchor: bool,
}

/// Everything the ledger knows about one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipInfo {
    pub agent: Ed25519PublicKey,
    pub status: MembershipStatus,
    pub vouches_received: Vec<VouchInfo>,
    pub vouches_given: Vec<Vouch>,
    pub is_anchor: bool,
}

/// Append-only record of vouches and anchor designations.
#[derive(Debug, Clone, Default)]
pub struct VouchLedger {
    /// All vouches, in the order they were recorded.
    vouches: Vec<Vouch>,

    /// Index: vouchee -> positions in `vouches`.
    received: BTreeMap<Ed25519PublicKey, Vec<usize>>,

    /// Index: voucher -> positions in `vouches`.
    given: BTreeMap<Ed25519PublicKey, Vec<usize>>,

    /// (voucher, vouchee) pairs already recorded.
    pairs: BTreeSet<(Ed25519PublicKey, Ed25519PublicKey)>,

    anchors: BTreeMap<Ed25519PublicKey, AnchorDesignation>,

    /// Status of every known agent as of the last pass.
    resolved: StatusSnapshot,

    bootstrap_agent: Option<Ed25519PublicKey>,
    thresholds: VouchThresholds,
}

impl VouchLedger {
    /// An empty ledger with no bootstrap agent.
    pub fn new(thresholds: VouchThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// An empty ledger following a network's thresholds and bootstrap agent.
    pub fn for_network(config: &TrustConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            bootstrap_agent: config.bootstrap_agent,
            ..Self::default()
        }
    }

    /// Rebuild a ledger by replaying committed history.
    ///
    /// Entries the rules reject are skipped with a warning. The founding
    /// designation roots the anchor set: the configured bootstrap agent's
    /// own when history holds one, otherwise the earliest by
    /// `(designated_at, agent)`. It is accepted whatever the current
    /// bootstrap agent is, so anchors rooted in it survive a change of
    /// bootstrap key. Other designations are retried until no more can be
    /// applied, so a designation recorded before its designator became an
    /// anchor still lands. The result is resolved to a fixed point.
    pub fn from_history(config: &TrustConfig, entries: impl IntoIterator<Item = LedgerEntry>) -> Self {
        let mut ledger = Self::for_network(config);
        let mut designations = Vec::new();

        for entry in entries {
            match entry {
                LedgerEntry::Vouch(vouch) => {
                    if let Err(error) = ledger.insert(vouch) {
                        warn!(%error, "skipping vouch in history");
                    }
                }
                LedgerEntry::Anchor(designation) => designations.push(designation),
            }
        }

        if let Some(root) = founding_root(&designations, config.bootstrap_agent.as_ref()) {
            let root = designations.swap_remove(root);
            ledger.record_anchor(root);
        }

        loop {
            let before = designations.len();
            designations.retain(|d| {
                match ledger.designate_anchor(d.agent, d.designated_by, d.designated_at) {
                    Ok(_) => false,
                    Err(VouchError::Unauthorized(_)) => true,
                    Err(error) => {
                        warn!(%error, agent = %d.agent, "skipping anchor designation in history");
                        false
                    }
                }
            });
            if designations.is_empty() || designations.len() == before {
                break;
            }
        }
        for d in &designations {
            warn!(
                agent = %d.agent,
                designated_by = %d.designated_by,
                "skipping unauthorized anchor designation in history"
            );
        }

        let passes = ledger.resolve();
        debug!(
            vouches = ledger.vouches.len(),
            anchors = ledger.anchors.len(),
            passes,
            "replayed vouch history"
        );
        ledger
    }

    /// Follow new network properties without touching committed records.
    ///
    /// Anchors stay anchors whoever the new bootstrap agent is. Every other
    /// status is recomputed from Pending under the new thresholds. Returns
    /// the number of passes run.
    pub fn reconfigure(&mut self, config: &TrustConfig) -> usize {
        self.bootstrap_agent = config.bootstrap_agent;
        self.thresholds = config.thresholds;
        for (agent, status) in self.resolved.iter_mut() {
            *status = if self.anchors.contains_key(agent) {
                MembershipStatus::TrustedAnchor
            } else {
                MembershipStatus::Pending
            };
        }
        self.resolve()
    }

    /// Record a new vouch.
    ///
    /// Fails with `SelfVouch`, `NoteTooLong`, or `Duplicate` if the voucher
    /// has already vouched for this vouchee. Statuses are not recomputed;
    /// call [`resolve`](Self::resolve) once the batch is recorded.
    pub fn add_vouch(
        &mut self,
        voucher: Ed25519PublicKey,
        vouchee: Ed25519PublicKey,
        vouch_type: VouchType,
        note: Option<String>,
        timestamp: Timestamp,
    ) -> Result<Vouch> {
        let vouch = Vouch::new(voucher, vouchee, vouch_type, note, timestamp)?;
        self.insert(vouch.clone())?;
        Ok(vouch)
    }

    /// Record an already-built vouch.
    pub fn insert(&mut self, vouch: Vouch) -> Result<()> {
        vouch.check()?;
        if !self.pairs.insert((vouch.voucher, vouch.vouchee)) {
            return Err(VouchError::Duplicate {
                voucher: vouch.voucher,
                vouchee: vouch.vouchee,
            });
        }

        let index = self.vouches.len();
        self.received.entry(vouch.vouchee).or_default().push(index);
        self.given.entry(vouch.voucher).or_default().push(index);
        self.resolved.entry(vouch.voucher).or_default();
        self.resolved.entry(vouch.vouchee).or_default();
        self.vouches.push(vouch);
        Ok(())
    }

    /// Note an agent that has joined. It starts Pending.
    pub fn observe(&mut self, agent: Ed25519PublicKey) {
        self.resolved.entry(agent).or_default();
    }

    /// Designate `agent` as a trusted anchor.
    ///
    /// `designated_by` must be an anchor or the network's bootstrap agent.
    pub fn designate_anchor(
        &mut self,
        agent: Ed25519PublicKey,
        designated_by: Ed25519PublicKey,
        designated_at: Timestamp,
    ) -> Result<AnchorDesignation> {
        let authorized = self.anchors.contains_key(&designated_by)
            || self.bootstrap_agent == Some(designated_by);
        if !authorized {
            return Err(VouchError::Unauthorized(designated_by));
        }
        if self.anchors.contains_key(&agent) {
            return Err(VouchError::AlreadyAnchor(agent));
        }

        let designation = AnchorDesignation::new(agent, designated_by, designated_at);
        self.record_anchor(designation.clone());
        debug!(%agent, %designated_by, "designated trusted anchor");
        Ok(designation)
    }

    /// Make the founding member the network's first anchor.
    ///
    /// Allowed once, before any other anchor exists. When the network names
    /// a bootstrap agent, only that agent may found it.
    pub fn initialize_founding_anchor(
        &mut self,
        agent: Ed25519PublicKey,
        designated_at: Timestamp,
    ) -> Result<AnchorDesignation> {
        if self.anchors.contains_key(&agent) {
            return Err(VouchError::AlreadyAnchor(agent));
        }
        if !self.anchors.is_empty() || self.bootstrap_agent.is_some_and(|b| b != agent) {
            return Err(VouchError::Unauthorized(agent));
        }

        let designation = AnchorDesignation::new(agent, agent, designated_at);
        self.record_anchor(designation.clone());
        debug!(%agent, "initialized founding anchor");
        Ok(designation)
    }

    fn record_anchor(&mut self, designation: AnchorDesignation) {
        self.resolved
            .insert(designation.agent, MembershipStatus::TrustedAnchor);
        self.anchors.insert(designation.agent, designation);
    }

    /// Status of `agent` computed from its received vouches against the
    /// current snapshot.
    pub fn status_of(&self, agent: &Ed25519PublicKey) -> MembershipStatus {
        status::status_of(agent, self.vouches_for(agent), &self.resolved, &self.thresholds)
    }

    /// Status of `agent` as recorded by the last pass.
    pub fn resolved_status(&self, agent: &Ed25519PublicKey) -> MembershipStatus {
        self.resolved.get(agent).copied().unwrap_or_default()
    }

    /// One pass over every known agent. Returns whether anything changed.
    pub fn recompute(&mut self) -> bool {
        let next: StatusSnapshot = self
            .resolved
            .keys()
            .map(|agent| (*agent, self.status_of(agent)))
            .collect();
        let changed = next != self.resolved;
        self.resolved = next;
        changed
    }

    /// Recompute until nothing changes. Returns the number of passes run.
    ///
    /// Bounded by the number of known agents plus one.
    pub fn resolve(&mut self) -> usize {
        let bound = self.resolved.len() + 1;
        let mut passes = 0;
        while passes < bound {
            passes += 1;
            if !self.recompute() {
                break;
            }
        }
        passes
    }

    /// Whether `agent` may take part as a full member.
    pub fn can_participate(&self, agent: &Ed25519PublicKey) -> bool {
        self.status_of(agent).can_participate()
    }

    pub fn is_anchor(&self, agent: &Ed25519PublicKey) -> bool {
        self.anchors.contains_key(agent)
    }

    /// All anchor designations, ordered by agent key.
    pub fn anchors(&self) -> impl Iterator<Item = &AnchorDesignation> {
        self.anchors.values()
    }

    pub fn bootstrap_agent(&self) -> Option<&Ed25519PublicKey> {
        self.bootstrap_agent.as_ref()
    }

    /// Every vouch, in recording order.
    pub fn vouches(&self) -> &[Vouch] {
        &self.vouches
    }

    /// Vouches naming `agent` as vouchee.
    pub fn vouches_for<'a>(&'a self, agent: &Ed25519PublicKey) -> impl Iterator<Item = &'a Vouch> {
        self.indexed(self.received.get(agent))
    }

    /// Vouches `agent` has given.
    pub fn vouches_by<'a>(&'a self, agent: &Ed25519PublicKey) -> impl Iterator<Item = &'a Vouch> {
        self.indexed(self.given.get(agent))
    }

    fn indexed<'a>(&'a self, positions: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a Vouch> {
        positions
            .into_iter()
            .flatten()
            .filter_map(|&i| self.vouches.get(i))
    }

    /// Every committed record, anchors first, in a form
    /// [`from_history`](Self::from_history) accepts.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.anchors
            .values()
            .cloned()
            .map(LedgerEntry::Anchor)
            .chain(self.vouches.iter().cloned().map(LedgerEntry::Vouch))
            .collect()
    }

    /// The resolved status of every known agent.
    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.resolved
    }

    /// Full membership record for `agent`.
    pub fn membership_info(&self, agent: &Ed25519PublicKey) -> MembershipInfo {
        let vouches_received = self
            .vouches_for(agent)
            .map(|vouch| VouchInfo {
                vouch: vouch.clone(),
                is_from_anchor: self.is_anchor(&vouch.voucher),
            })
            .collect();

        MembershipInfo {
            agent: *agent,
            status: self.status_of(agent),
            vouches_received,
            vouches_given: self.vouches_by(agent).cloned().collect(),
            is_anchor: self.is_anchor(agent),
        }
    }
}

/// Position of the designation that founds the network, if any.
fn founding_root(
    designations: &[AnchorDesignation],
    bootstrap_agent: Option<&Ed25519PublicKey>,
) -> Option<usize> {
    let founding = || designations.iter().enumerate().filter(|(_, d)| d.is_founding());
    founding()
        .filter(|(_, d)| Some(&d.agent) == bootstrap_agent)
        .min_by_key(|(_, d)| (d.designated_at, d.agent))
        .or_else(|| founding().min_by_key(|(_, d)| (d.designated_at, d.agent)))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use porch_core::Keypair;
    use proptest::prelude::*;

    const T0: Timestamp = Timestamp::from_micros(1_736_870_400_000_000);

    fn agent(n: u8) -> Ed25519PublicKey {
        Keypair::from_seed(&[n; 32]).public_key()
    }

    fn founded() -> VouchLedger {
        let mut ledger = VouchLedger::new(VouchThresholds::default());
        ledger.initialize_founding_anchor(agent(0), T0).unwrap();
        ledger
    }

    fn vouch(ledger: &mut VouchLedger, from: u8, to: u8) {
        ledger
            .add_vouch(agent(from), agent(to), VouchType::default(), None, T0)
            .unwrap();
    }

    #[test]
    fn test_self_vouch_rejected() {
        let mut ledger = founded();
        assert_eq!(
            ledger.add_vouch(agent(1), agent(1), VouchType::default(), None, T0),
            Err(VouchError::SelfVouch(agent(1)))
        );
        assert!(ledger.vouches().is_empty());
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let mut ledger = founded();
        vouch(&mut ledger, 1, 2);
        assert_eq!(
            ledger.add_vouch(agent(1), agent(2), VouchType::ExistingRelationship, None, T0),
            Err(VouchError::Duplicate {
                voucher: agent(1),
                vouchee: agent(2)
            })
        );
        // The reverse direction is a different pair.
        vouch(&mut ledger, 2, 1);
        assert_eq!(ledger.vouches().len(), 2);
    }

    #[test]
    fn test_anchor_vouch_verifies() {
        let mut ledger = founded();
        vouch(&mut ledger, 0, 1);
        ledger.resolve();
        assert_eq!(ledger.status_of(&agent(1)), MembershipStatus::Verified);
        assert!(ledger.can_participate(&agent(1)));
    }

    #[test]
    fn test_member_thresholds() {
        let mut ledger = founded();
        vouch(&mut ledger, 0, 1);
        vouch(&mut ledger, 0, 2);
        vouch(&mut ledger, 1, 3);
        ledger.resolve();
        assert_eq!(ledger.status_of(&agent(3)), MembershipStatus::PartiallyVouched(1));
        assert!(!ledger.can_participate(&agent(3)));

        vouch(&mut ledger, 2, 3);
        ledger.resolve();
        assert_eq!(ledger.status_of(&agent(3)), MembershipStatus::Verified);
    }

    #[test]
    fn test_recompute_advances_one_level() {
        let mut ledger = founded();
        vouch(&mut ledger, 0, 1);
        vouch(&mut ledger, 0, 2);
        vouch(&mut ledger, 1, 3);
        vouch(&mut ledger, 2, 3);

        assert!(ledger.recompute());
        assert_eq!(ledger.resolved_status(&agent(1)), MembershipStatus::Verified);
        assert_eq!(ledger.resolved_status(&agent(3)), MembershipStatus::Pending);

        assert!(ledger.recompute());
        assert_eq!(ledger.resolved_status(&agent(3)), MembershipStatus::Verified);

        assert!(!ledger.recompute());
    }

    #[test]
    fn test_resolve_reports_passes() {
        let mut ledger = founded();
        vouch(&mut ledger, 0, 1);
        vouch(&mut ledger, 0, 2);
        vouch(&mut ledger, 1, 3);
        vouch(&mut ledger, 2, 3);
        assert_eq!(ledger.resolve(), 3);
        assert_eq!(ledger.resolve(), 1);
    }

    #[test]
    fn test_pending_vouchers_never_verify() {
        let mut ledger = VouchLedger::new(VouchThresholds::default());
        vouch(&mut ledger, 1, 2);
        vouch(&mut ledger, 2, 1);
        vouch(&mut ledger, 3, 1);
        ledger.resolve();
        for n in 1..=3 {
            assert_eq!(ledger.status_of(&agent(n)), MembershipStatus::Pending);
        }
    }

    #[test]
    fn test_designation_rules() {
        let mut ledger = founded();
        assert_eq!(
            ledger.designate_anchor(agent(2), agent(1), T0),
            Err(VouchError::Unauthorized(agent(1)))
        );

        let d = ledger.designate_anchor(agent(1), agent(0), T0).unwrap();
        assert_eq!(d.designated_by, agent(0));
        assert!(!d.is_founding());

        // New anchors may designate in turn.
        ledger.designate_anchor(agent(2), agent(1), T0).unwrap();
        assert_eq!(
            ledger.designate_anchor(agent(2), agent(0), T0),
            Err(VouchError::AlreadyAnchor(agent(2)))
        );
        assert_eq!(ledger.anchors().count(), 3);
        assert_eq!(ledger.status_of(&agent(2)), MembershipStatus::TrustedAnchor);
    }

    #[test]
    fn test_bootstrap_agent_may_designate() {
        let issuer = agent(50);
        let config = TrustConfig::new("elm-2025", issuer).with_bootstrap_agent(agent(9));
        let mut ledger = VouchLedger::for_network(&config);
        ledger.designate_anchor(agent(1), agent(9), T0).unwrap();
        assert!(ledger.is_anchor(&agent(1)));
        assert!(!ledger.is_anchor(&agent(9)));
    }

    #[test]
    fn test_founding_anchor_once() {
        let mut ledger = founded();
        assert_eq!(
            ledger.initialize_founding_anchor(agent(0), T0),
            Err(VouchError::AlreadyAnchor(agent(0)))
        );
        assert_eq!(
            ledger.initialize_founding_anchor(agent(1), T0),
            Err(VouchError::Unauthorized(agent(1)))
        );
    }

    #[test]
    fn test_founding_anchor_must_be_bootstrap_agent() {
        let config = TrustConfig::new("elm-2025", agent(50)).with_bootstrap_agent(agent(9));
        let mut ledger = VouchLedger::for_network(&config);
        assert_eq!(
            ledger.initialize_founding_anchor(agent(1), T0),
            Err(VouchError::Unauthorized(agent(1)))
        );
        let d = ledger.initialize_founding_anchor(agent(9), T0).unwrap();
        assert!(d.is_founding());
    }

    #[test]
    fn test_membership_info() {
        let mut ledger = founded();
        vouch(&mut ledger, 0, 1);
        vouch(&mut ledger, 1, 2);
        ledger.resolve();

        let info = ledger.membership_info(&agent(1));
        assert_eq!(info.status, MembershipStatus::Verified);
        assert!(!info.is_anchor);
        assert_eq!(info.vouches_received.len(), 1);
        assert!(info.vouches_received[0].is_from_anchor);
        assert_eq!(info.vouches_given.len(), 1);
        assert_eq!(info.vouches_given[0].vouchee, agent(2));

        let founder = ledger.membership_info(&agent(0));
        assert!(founder.is_anchor);
        assert_eq!(founder.status, MembershipStatus::TrustedAnchor);
    }

    #[test]
    fn test_history_skips_rejected_entries() {
        let config = TrustConfig::new("elm-2025", agent(50));
        let v = |from: u8, to: u8| {
            LedgerEntry::Vouch(Vouch {
                voucher: agent(from),
                vouchee: agent(to),
                vouch_type: VouchType::default(),
                note: None,
                timestamp: T0,
            })
        };
        let history = vec![
            // Designated before its designator was founded.
            LedgerEntry::Anchor(AnchorDesignation::new(agent(1), agent(0), T0)),
            v(0, 2),
            v(0, 2),
            v(3, 3),
            LedgerEntry::Anchor(AnchorDesignation::new(agent(0), agent(0), T0)),
            LedgerEntry::Anchor(AnchorDesignation::new(agent(4), agent(7), T0)),
        ];

        let ledger = VouchLedger::from_history(&config, history);
        assert_eq!(ledger.vouches().len(), 1);
        assert!(ledger.is_anchor(&agent(1)));
        assert!(!ledger.is_anchor(&agent(4)));
        assert_eq!(ledger.status_of(&agent(2)), MembershipStatus::Verified);
    }

    #[test]
    fn test_entries_replay_to_same_state() {
        let mut ledger = founded();
        ledger.designate_anchor(agent(1), agent(0), T0).unwrap();
        vouch(&mut ledger, 1, 2);
        vouch(&mut ledger, 2, 3);
        ledger.observe(agent(4));
        ledger.resolve();

        let config = TrustConfig::new("elm-2025", agent(50));
        let replayed = VouchLedger::from_history(&config, ledger.entries());
        assert_eq!(replayed.vouches(), ledger.vouches());
        assert_eq!(replayed.anchors().count(), 2);
        for n in 0..4 {
            assert_eq!(replayed.status_of(&agent(n)), ledger.status_of(&agent(n)));
        }
    }

    #[test]
    fn test_reconfigure_keeps_bootstrap_designations() {
        let config = TrustConfig::new("elm-2025", agent(50)).with_bootstrap_agent(agent(9));
        let mut ledger = VouchLedger::for_network(&config);
        ledger.designate_anchor(agent(1), agent(9), T0).unwrap();
        vouch(&mut ledger, 1, 2);
        ledger.resolve();

        ledger.reconfigure(&config.clone().without_bootstrap_agent());
        assert_eq!(ledger.status_of(&agent(1)), MembershipStatus::TrustedAnchor);
        assert_eq!(ledger.status_of(&agent(2)), MembershipStatus::Verified);
        assert!(ledger.bootstrap_agent().is_none());
    }

    #[test]
    fn test_reconfigure_applies_new_thresholds() {
        let mut ledger = founded();
        vouch(&mut ledger, 0, 1);
        ledger.resolve();
        assert_eq!(ledger.status_of(&agent(1)), MembershipStatus::Verified);

        let strict = VouchThresholds {
            from_members: 2,
            from_anchors: 2,
        };
        ledger.reconfigure(&TrustConfig::new("elm-2025", agent(50)).with_thresholds(strict));
        assert_eq!(ledger.resolved_status(&agent(1)), MembershipStatus::PartiallyVouched(1));
        assert_eq!(ledger.resolved_status(&agent(0)), MembershipStatus::TrustedAnchor);
    }

    #[test]
    fn test_founder_survives_bootstrap_rotation_on_replay() {
        let founded = TrustConfig::new("elm-2025", agent(50)).with_bootstrap_agent(agent(0));
        let mut ledger = VouchLedger::for_network(&founded);
        ledger.initialize_founding_anchor(agent(0), T0).unwrap();
        ledger.designate_anchor(agent(1), agent(0), T0).unwrap();

        let rotated = founded.with_bootstrap_agent(agent(3));
        let replayed = VouchLedger::from_history(&rotated, ledger.entries());
        assert!(replayed.is_anchor(&agent(0)));
        assert!(replayed.is_anchor(&agent(1)));
        assert!(!replayed.is_anchor(&agent(3)));
    }

    #[test]
    fn test_earliest_founding_roots_replay() {
        let config = TrustConfig::new("elm-2025", agent(50));
        let later = Timestamp::from_micros(T0.as_micros() + 5);
        let history = vec![
            LedgerEntry::Anchor(AnchorDesignation::new(agent(2), agent(2), later)),
            LedgerEntry::Anchor(AnchorDesignation::new(agent(4), agent(4), T0)),
        ];
        let replayed = VouchLedger::from_history(&config, history);
        assert_eq!(anchor_keys(&replayed), vec![agent(4)]);
    }

    #[test]
    fn test_observed_agent_is_pending() {
        let mut ledger = founded();
        ledger.observe(agent(4));
        assert_eq!(ledger.snapshot().get(&agent(4)), Some(&MembershipStatus::Pending));
    }

    fn arb_history() -> impl Strategy<Value = Vec<LedgerEntry>> {
        let later = Timestamp::from_micros(T0.as_micros() + 1);
        prop::collection::vec((0u8..8, 0u8..8, prop::bool::weighted(0.2)), 0..40).prop_map(
            move |records| {
                let mut entries = vec![
                    LedgerEntry::Anchor(AnchorDesignation::new(agent(0), agent(0), T0)),
                    LedgerEntry::Anchor(AnchorDesignation::new(agent(1), agent(0), T0)),
                ];
                entries.extend(records.into_iter().map(|(from, to, designate)| {
                    if designate {
                        LedgerEntry::Anchor(AnchorDesignation::new(agent(to), agent(from), later))
                    } else {
                        LedgerEntry::Vouch(Vouch {
                            voucher: agent(from),
                            vouchee: agent(to),
                            vouch_type: VouchType::default(),
                            note: None,
                            timestamp: T0,
                        })
                    }
                }));
                entries
            },
        )
    }

    fn anchor_keys(ledger: &VouchLedger) -> Vec<Ed25519PublicKey> {
        ledger.anchors().map(|d| d.agent).collect()
    }

    proptest! {
        #[test]
        fn test_replay_order_does_not_matter(
            (history, shuffled) in arb_history()
                .prop_flat_map(|h| (Just(h.clone()), Just(h).prop_shuffle()))
        ) {
            let config = TrustConfig::new("elm-2025", agent(50));
            let a = VouchLedger::from_history(&config, history);
            let b = VouchLedger::from_history(&config, shuffled);
            prop_assert_eq!(a.snapshot(), b.snapshot());
            prop_assert_eq!(a.vouches().len(), b.vouches().len());
        }

        #[test]
        fn test_resolved_snapshot_is_a_fixed_point(history in arb_history()) {
            let config = TrustConfig::new("elm-2025", agent(50));
            let mut ledger = VouchLedger::from_history(&config, history);
            prop_assert!(!ledger.recompute());
        }

        #[test]
        fn test_anchors_survive_bootstrap_change(
            history in arb_history(),
            next in prop::option::of(100u8..110),
        ) {
            let founded = TrustConfig::new("elm-2025", agent(50)).with_bootstrap_agent(agent(0));
            let changed = match next {
                Some(n) => founded.clone().with_bootstrap_agent(agent(n)),
                None => founded.clone().without_bootstrap_agent(),
            };

            let live = VouchLedger::from_history(&founded, history.clone());
            let mut reconfigured = live.clone();
            reconfigured.reconfigure(&changed);
            let replayed = VouchLedger::from_history(&changed, history);

            prop_assert_eq!(anchor_keys(&reconfigured), anchor_keys(&live));
            prop_assert_eq!(anchor_keys(&replayed), anchor_keys(&live));
            prop_assert_eq!(reconfigured.snapshot(), live.snapshot());
            prop_assert_eq!(replayed.snapshot(), live.snapshot());
        }
    }
}
