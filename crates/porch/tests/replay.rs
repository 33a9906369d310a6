//! Replaying committed history through the membrane.

use porch::core::{Ed25519PublicKey, TrustConfig};
use porch::vouch::LedgerEntry;
use porch::Membrane;
use porch_testkit::fixtures::NETWORK_ID;
use porch_testkit::generators::{agents, history};
use proptest::prelude::*;

const AGENTS: u8 = 6;

fn issuer() -> Ed25519PublicKey {
    Ed25519PublicKey::from_bytes([0x99; 32])
}

fn anchors(membrane: &Membrane) -> Vec<Ed25519PublicKey> {
    membrane.ledger().anchors().map(|d| d.agent).collect()
}

fn replay(config: &TrustConfig, entries: Vec<LedgerEntry>) -> Membrane {
    Membrane::with_history(config.clone(), entries).unwrap()
}

proptest! {
    #[test]
    fn test_replay_order_does_not_matter(
        (entries, shuffled) in history(AGENTS, 30)
            .prop_flat_map(|h| (Just(h.clone()), Just(h).prop_shuffle()))
    ) {
        let config = TrustConfig::new(NETWORK_ID, issuer()).with_bootstrap_agent(agents(AGENTS)[0]);
        let a = replay(&config, entries);
        let b = replay(&config, shuffled);
        prop_assert_eq!(a.ledger().snapshot(), b.ledger().snapshot());
        prop_assert_eq!(anchors(&a), anchors(&b));
    }

    #[test]
    fn test_anchors_survive_reconfigure(
        entries in history(AGENTS, 30),
        replacement in prop::option::of(any::<[u8; 32]>()),
    ) {
        let keys = agents(AGENTS);
        let founded = TrustConfig::new(NETWORK_ID, issuer()).with_bootstrap_agent(keys[0]);
        let changed = match replacement {
            Some(bytes) => founded.clone().with_bootstrap_agent(Ed25519PublicKey::from_bytes(bytes)),
            None => founded.clone().without_bootstrap_agent(),
        };
        // Random bytes colliding with a generated agent is not a rotation.
        prop_assume!(changed.bootstrap_agent.map_or(true, |b| !keys.contains(&b)));

        let mut membrane = replay(&founded, entries.clone());
        let before = anchors(&membrane);
        let statuses = membrane.ledger().snapshot().clone();

        membrane.reconfigure(changed.clone()).unwrap();
        prop_assert_eq!(&anchors(&membrane), &before);
        prop_assert_eq!(membrane.ledger().snapshot(), &statuses);

        let replayed = replay(&changed, entries);
        prop_assert_eq!(&anchors(&replayed), &before);
        prop_assert_eq!(replayed.ledger().snapshot(), &statuses);
    }
}
