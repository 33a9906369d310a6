//! The Membrane: one network's admission and membership state.
//!
//! Bundles the trust configuration, the bootstrap gate and the vouch
//! ledger behind a single API, and logs what the pure components decide.

use tracing::{debug, info, warn};

use porch_core::{Ed25519PublicKey, Timestamp, TrustConfig};
use porch_invite::InviteCode;
use porch_vouch::{
    AnchorDesignation, LedgerEntry, MembershipInfo, MembershipStatus, Vouch, VouchLedger,
    VouchType,
};

use crate::bootstrap::BootstrapGate;
use crate::error::Result;
use crate::validator::{validate, validate_code, ValidationResult};

/// Admission control and membership for one network.
#[derive(Debug, Clone)]
pub struct Membrane {
    config: TrustConfig,
    gate: BootstrapGate,
    ledger: VouchLedger,
}

impl Membrane {
    /// A membrane for a new network with no vouch history.
    pub fn new(config: TrustConfig) -> Result<Self> {
        Self::with_history(config, Vec::<LedgerEntry>::new())
    }

    /// A membrane over an existing network's committed history.
    pub fn with_history(
        config: TrustConfig,
        history: impl IntoIterator<Item = LedgerEntry>,
    ) -> Result<Self> {
        config.check()?;
        let ledger = VouchLedger::from_history(&config, history);
        Ok(Self {
            gate: BootstrapGate::new(&config),
            ledger,
            config,
        })
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    pub fn ledger(&self) -> &VouchLedger {
        &self.ledger
    }

    pub fn gate(&self) -> &BootstrapGate {
        &self.gate
    }

    /// Apply new network properties.
    ///
    /// Statuses are recomputed under the new thresholds. Trusted anchors
    /// keep their standing even when the bootstrap agent that designated
    /// them is cleared or replaced.
    pub fn reconfigure(&mut self, config: TrustConfig) -> Result<()> {
        config.check()?;
        self.gate.reconfigure(&config);
        self.ledger.reconfigure(&config);
        self.config = config;
        info!(network = %self.config.network_id, "trust configuration updated");
        Ok(())
    }

    /// Decide a join attempt with a decoded proof.
    pub fn admit(
        &mut self,
        candidate: &Ed25519PublicKey,
        proof: Option<&InviteCode>,
        now: Timestamp,
    ) -> ValidationResult {
        if self.gate.admit(candidate) {
            self.ledger.observe(*candidate);
            return ValidationResult::Valid;
        }
        let verdict = validate(candidate, proof, &self.config, now);
        self.record(candidate, verdict)
    }

    /// Decide a join attempt with a proof in string form.
    pub fn admit_code(
        &mut self,
        candidate: &Ed25519PublicKey,
        code: Option<&str>,
        now: Timestamp,
    ) -> ValidationResult {
        if self.gate.admit(candidate) {
            self.ledger.observe(*candidate);
            return ValidationResult::Valid;
        }
        let verdict = validate_code(candidate, code, &self.config, now);
        self.record(candidate, verdict)
    }

    fn record(&mut self, candidate: &Ed25519PublicKey, verdict: ValidationResult) -> ValidationResult {
        match verdict {
            ValidationResult::Valid => {
                self.ledger.observe(*candidate);
                debug!(%candidate, network = %self.config.network_id, "admitted");
            }
            ValidationResult::Invalid(reason) => {
                warn!(
                    %candidate,
                    network = %self.config.network_id,
                    reason = reason.as_str(),
                    "rejected join attempt"
                );
            }
        }
        verdict
    }

    /// Record a vouch and bring every status up to date.
    pub fn vouch(
        &mut self,
        voucher: Ed25519PublicKey,
        vouchee: Ed25519PublicKey,
        vouch_type: VouchType,
        note: Option<String>,
        now: Timestamp,
    ) -> Result<Vouch> {
        let vouch = match self.ledger.add_vouch(voucher, vouchee, vouch_type, note, now) {
            Ok(vouch) => vouch,
            Err(error) => {
                debug!(%voucher, %vouchee, %error, "vouch refused");
                return Err(error.into());
            }
        };
        self.ledger.resolve();
        debug!(
            %voucher,
            %vouchee,
            status = ?self.ledger.status_of(&vouchee),
            "vouch recorded"
        );
        Ok(vouch)
    }

    /// Make `founder` the network's first trusted anchor.
    pub fn found(&mut self, founder: Ed25519PublicKey, now: Timestamp) -> Result<AnchorDesignation> {
        let designation = self.ledger.initialize_founding_anchor(founder, now)?;
        self.ledger.resolve();
        info!(%founder, network = %self.config.network_id, "network founded");
        Ok(designation)
    }

    /// Designate a new trusted anchor.
    pub fn designate_anchor(
        &mut self,
        agent: Ed25519PublicKey,
        designated_by: Ed25519PublicKey,
        now: Timestamp,
    ) -> Result<AnchorDesignation> {
        let designation = self.ledger.designate_anchor(agent, designated_by, now)?;
        self.ledger.resolve();
        info!(%agent, %designated_by, "trusted anchor designated");
        Ok(designation)
    }

    pub fn status_of(&self, agent: &Ed25519PublicKey) -> MembershipStatus {
        self.ledger.status_of(agent)
    }

    pub fn can_participate(&self, agent: &Ed25519PublicKey) -> bool {
        self.ledger.can_participate(agent)
    }

    pub fn membership_info(&self, agent: &Ed25519PublicKey) -> MembershipInfo {
        self.ledger.membership_info(agent)
    }
}
