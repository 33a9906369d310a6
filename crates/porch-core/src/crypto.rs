//! Cryptographic primitives for Porch.
//!
//! Agents and hubs are identified by Ed25519 keys, the same algorithm the
//! peer network uses for identities, so invites introduce no separate PKI.
//! Content ids are Blake3 hashes.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::error::CoreError;

/// Hex digits shown when a key or signature is printed.
const SHORT_HEX: usize = 16;

fn short_hex(bytes: &[u8]) -> String {
    let mut s = hex::encode(bytes);
    s.truncate(SHORT_HEX);
    s
}

/// A 32-byte Blake3 digest, used for content ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blake3Hash(pub [u8; 32]);

impl Blake3Hash {
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Hash several parts as one contiguous input.
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = blake3::Hasher::new();
        parts.iter().for_each(|part| {
            hasher.update(part);
        });
        Self(*hasher.finalize().as_bytes())
    }

    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }
}

/// A 32-byte Ed25519 public key.
///
/// An agent is identified solely by this key. Printing it shows a short
/// hex prefix, which is what log lines carry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl_hex_serde!(Ed25519PublicKey, 32, "an Ed25519 public key");

impl Ed25519PublicKey {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a full 64-digit hex key, as network properties carry them.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        Self::try_from(hex::decode(s)?.as_slice())
    }

    /// Check `signature` over `message` against this key.
    ///
    /// The signature is raw bytes as carried on the wire; anything other
    /// than 64 bytes is `InvalidSignature`. Small-order keys and
    /// non-canonical signatures are rejected.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CoreError> {
        let key = VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;
        let signature = Signature::from_slice(signature).map_err(|_| CoreError::InvalidSignature)?;
        key.verify_strict(message, &signature)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ed25519PublicKey")
            .field(&short_hex(&self.0))
            .finish()
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&short_hex(&self.0))
    }
}

impl TryFrom<&[u8]> for Ed25519PublicKey {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 32]>::try_from(slice)
            .map(Self)
            .map_err(|_| CoreError::InvalidPublicKey)
    }
}

/// A 64-byte Ed25519 signature, as produced by [`Keypair::sign`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Ed25519Signature {
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature({}..)", short_hex(&self.0))
    }
}

/// A hub or agent identity keypair.
///
/// Porch never stores keys; the hub's keypair is supplied out of band.
#[derive(Clone)]
pub struct Keypair(SigningKey);

impl Keypair {
    /// A fresh keypair from the thread RNG.
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut rand::thread_rng()))
    }

    /// A keypair derived from a 32-byte secret seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self(SigningKey::from_bytes(seed))
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.0.sign(message).to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
