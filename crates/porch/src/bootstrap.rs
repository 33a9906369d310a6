//! The founding-member exemption.
//!
//! A new network has no one to issue its first invite, so the agent named
//! as `bootstrap_agent` in the trust configuration is admitted without
//! one. The exemption is not single-use: it holds for as long as the key
//! stays configured. The gate records whether the founder has already come
//! through so operators know when to clear the key, and every use is logged.

use tracing::warn;

use porch_core::{Ed25519PublicKey, TrustConfig};

/// Whether `candidate` is the configured bootstrap agent.
pub fn exempts(candidate: &Ed25519PublicKey, config: &TrustConfig) -> bool {
    config.bootstrap_agent.as_ref() == Some(candidate)
}

/// Tracks uses of the bootstrap exemption.
#[derive(Debug, Clone, Default)]
pub struct BootstrapGate {
    agent: Option<Ed25519PublicKey>,
    founder_joined: bool,
}

impl BootstrapGate {
    pub fn new(config: &TrustConfig) -> Self {
        Self {
            agent: config.bootstrap_agent,
            founder_joined: false,
        }
    }

    /// The exempt key, if any.
    pub fn agent(&self) -> Option<&Ed25519PublicKey> {
        self.agent.as_ref()
    }

    /// Whether the founder has already been admitted through the gate.
    pub fn founder_joined(&self) -> bool {
        self.founder_joined
    }

    /// Admit `candidate` if it is the bootstrap agent.
    ///
    /// Returns `false` for everyone else, who must present an invite.
    pub fn admit(&mut self, candidate: &Ed25519PublicKey) -> bool {
        if self.agent.as_ref() != Some(candidate) {
            return false;
        }

        if self.founder_joined {
            warn!(
                agent = %candidate,
                "bootstrap exemption used again; clear bootstrap_agent once the network is founded"
            );
        } else {
            warn!(agent = %candidate, "admitting bootstrap agent without an invite");
        }
        self.founder_joined = true;
        true
    }

    /// Follow a configuration change.
    ///
    /// The founder's join history survives only if the key is unchanged.
    pub fn reconfigure(&mut self, config: &TrustConfig) {
        if self.agent != config.bootstrap_agent {
            self.agent = config.bootstrap_agent;
            self.founder_joined = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porch_core::Keypair;

    fn config() -> (TrustConfig, Ed25519PublicKey) {
        let founder = Keypair::from_seed(&[1; 32]).public_key();
        let issuer = Keypair::from_seed(&[2; 32]).public_key();
        (TrustConfig::new("elm-2025", issuer).with_bootstrap_agent(founder), founder)
    }

    #[test]
    fn test_exempts_only_bootstrap_agent() {
        let (config, founder) = config();
        assert!(exempts(&founder, &config));
        assert!(!exempts(&config.issuer_public_key, &config));
        assert!(!exempts(&founder, &config.clone().without_bootstrap_agent()));
    }

    #[test]
    fn test_gate_records_founder() {
        let (config, founder) = config();
        let mut gate = BootstrapGate::new(&config);
        assert!(!gate.founder_joined());

        assert!(!gate.admit(&config.issuer_public_key));
        assert!(!gate.founder_joined());

        assert!(gate.admit(&founder));
        assert!(gate.founder_joined());

        // Not single-use.
        assert!(gate.admit(&founder));
    }

    #[test]
    fn test_clearing_key_closes_gate() {
        let (config, founder) = config();
        let mut gate = BootstrapGate::new(&config);
        gate.admit(&founder);

        gate.reconfigure(&config.clone().without_bootstrap_agent());
        assert!(!gate.admit(&founder));
        assert!(!gate.founder_joined());
        assert!(gate.agent().is_none());
    }
}
