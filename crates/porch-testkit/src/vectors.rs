//! Golden test vectors for invite signing.
//!
//! Each vector fixes a seed and a set of invite fields, and records the
//! canonical signing bytes and the Ed25519 signature over them. Any
//! implementation that reproduces these bytes interoperates with this one.

use porch_core::{canonicalize, verify, Ed25519PublicKey, Keypair, SigningFields, Timestamp};

/// The format-specific part of a vector.
#[derive(Debug, Clone, Copy)]
pub enum VectorKind {
    /// Legacy invite naming the hub by address.
    Legacy { hub_address: &'static str },
    /// Structured invite; the issuer is the vector's own key.
    Structured { signal_url: &'static str },
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    pub kind: VectorKind,
    pub network_id: &'static str,
    /// Microseconds since the Unix epoch.
    pub timestamp: i64,
    /// Expected public key derived from `seed` (hex).
    pub expected_public_key: &'static str,
    /// Expected canonical signing bytes (hex).
    pub expected_canonical: &'static str,
    /// Expected signature over the canonical bytes (hex).
    pub expected_signature: &'static str,
}

impl GoldenVector {
    pub fn keypair(&self) -> Keypair {
        Keypair::from_seed(&self.seed)
    }

    /// Canonical bytes computed by this implementation.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let issuer = self.keypair().public_key();
        canonicalize(&self.fields(&issuer))
    }

    /// The signing fields this vector describes.
    pub fn fields<'a>(&'a self, issuer: &'a Ed25519PublicKey) -> SigningFields<'a> {
        let timestamp = Timestamp::from_micros(self.timestamp);
        match self.kind {
            VectorKind::Legacy { hub_address } => SigningFields::Legacy {
                hub_address,
                network_id: self.network_id,
                timestamp,
            },
            VectorKind::Structured { signal_url } => SigningFields::Structured {
                issuer,
                network_id: self.network_id,
                timestamp,
                signal_url,
            },
        }
    }

    /// Check this vector against the implementation.
    pub fn verify(&self) -> Result<(), String> {
        let keypair = self.keypair();
        let public_key = keypair.public_key();
        if public_key.to_hex() != self.expected_public_key {
            return Err(format!(
                "{}: public key {} != expected {}",
                self.name,
                public_key.to_hex(),
                self.expected_public_key
            ));
        }

        let canonical = self.canonical_bytes();
        if hex::encode(&canonical) != self.expected_canonical {
            return Err(format!(
                "{}: canonical bytes {} != expected {}",
                self.name,
                hex::encode(&canonical),
                self.expected_canonical
            ));
        }

        let signature = keypair.sign(&canonical);
        if signature.to_hex() != self.expected_signature {
            return Err(format!(
                "{}: signature {} != expected {}",
                self.name,
                signature.to_hex(),
                self.expected_signature
            ));
        }

        let expected = hex::decode(self.expected_signature)
            .map_err(|e| format!("{}: bad signature hex: {e}", self.name))?;
        if !verify(&canonical, &expected, &public_key) {
            return Err(format!("{}: expected signature does not verify", self.name));
        }
        Ok(())
    }
}

const MID_JANUARY_2025: i64 = 1_736_870_400_000_000;

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "legacy basic",
            seed: [0x01; 32],
            kind: VectorKind::Legacy {
                hub_address: "hub.elm.local",
            },
            network_id: "elm-2025",
            timestamp: MID_JANUARY_2025,
            expected_public_key: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            expected_canonical: "8673706f7263682f696e766974652d7369672f7631016d6875622e656c6d2e6c6f63616c68656c6d2d323032351b00062baca7368000f6",
            expected_signature: "8bb06a2050bf3ce46da45c1dad3d852018847ac473580a46ecfb3508152ebedd114d75a48f15dc57550242abfc15a415ec01efd76b0dc77f594b104518d57a0f",
        },
        GoldenVector {
            name: "structured basic",
            seed: [0x02; 32],
            kind: VectorKind::Structured {
                signal_url: "wss://signal.holochain.org",
            },
            network_id: "elm-2025",
            timestamp: MID_JANUARY_2025,
            expected_public_key: "8139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b394",
            expected_canonical: "8673706f7263682f696e766974652d7369672f76310258208139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b39468656c6d2d323032351b00062baca7368000781a7773733a2f2f7369676e616c2e686f6c6f636861696e2e6f7267",
            expected_signature: "495080bfa0202ae20332196adc14c13d32554be8392c3930096ac6ff90962c16e8250cb15889950a4115cd928bb92f3e2ef062803b73a2d1c65a78509a1ac70c",
        },
        GoldenVector {
            name: "structured negative timestamp",
            seed: [0x03; 32],
            kind: VectorKind::Structured {
                signal_url: "wss://s.local",
            },
            network_id: "oak",
            timestamp: -1,
            expected_public_key: "ed4928c628d1c2c6eae90338905995612959273a5c63f93636c14614ac8737d1",
            expected_canonical: "8673706f7263682f696e766974652d7369672f7631025820ed4928c628d1c2c6eae90338905995612959273a5c63f93636c14614ac8737d1636f616b206d7773733a2f2f732e6c6f63616c",
            expected_signature: "ecc83dd8cd934dd0dafc88c0044cd95b2be844e5b3488b2f93b3299c7e03e141e3b6924b749825dde67b3cd07454c517b0a1c2fc2e2bcdbf9b6d01182f5bde05",
        },
        // The next two differ only in where the colon sits.
        GoldenVector {
            name: "legacy colon in hub address",
            seed: [0x04; 32],
            kind: VectorKind::Legacy { hub_address: "a:b" },
            network_id: "c",
            timestamp: 0,
            expected_public_key: "ca93ac1705187071d67b83c7ff0efe8108e8ec4530575d7726879333dbdabe7c",
            expected_canonical: "8673706f7263682f696e766974652d7369672f76310163613a62616300f6",
            expected_signature: "644ec9c162c3bbd80512dafa42f840d532c5893df113a9be8bbaeacc145c4a808d30553fab0397fd6796df07385b3a6ddf8cd9fc1280f7ad7fe3f2b915000f09",
        },
        GoldenVector {
            name: "legacy colon in network id",
            seed: [0x04; 32],
            kind: VectorKind::Legacy { hub_address: "a" },
            network_id: "b:c",
            timestamp: 0,
            expected_public_key: "ca93ac1705187071d67b83c7ff0efe8108e8ec4530575d7726879333dbdabe7c",
            expected_canonical: "8673706f7263682f696e766974652d7369672f763101616163623a6300f6",
            expected_signature: "4bddfdb87a49dd36f972528109aa041b4b3c20a84ffdd823609386e712297dc9e48407b52bbe486759cf6652f2b69a374da484791a8ae681dae0d2c1c996c30b",
        },
        GoldenVector {
            name: "structured unicode network id",
            seed: [0x06; 32],
            kind: VectorKind::Structured {
                signal_url: "wss://signal.holochain.org",
            },
            network_id: "ñandú-2025",
            timestamp: MID_JANUARY_2025,
            expected_public_key: "8a875fff1eb38451577acd5afee405456568dd7c89e090863a0557bc7af49f17",
            expected_canonical: "8673706f7263682f696e766974652d7369672f76310258208a875fff1eb38451577acd5afee405456568dd7c89e090863a0557bc7af49f176cc3b1616e64c3ba2d323032351b00062baca7368000781a7773733a2f2f7369676e616c2e686f6c6f636861696e2e6f7267",
            expected_signature: "e3cb092719b732d877701484aae36c1f710fc4eaefe2c38d5446b4ed68777be82322f7ce1d1472257657f934fd5828b56728e33d4ea15aaf41af1eec82f9630c",
        },
    ]
}

/// Verify every golden vector, collecting all failures.
pub fn verify_all_vectors() -> Result<(), Vec<String>> {
    let errors: Vec<String> = all_vectors()
        .iter()
        .filter_map(|v| v.verify().err())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
