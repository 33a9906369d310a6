//! # Porch Core
//!
//! Pure primitives for the Porch membership protocol: Ed25519 keys,
//! canonical signing payloads, and the per-network trust configuration.
//!
//! This crate contains no I/O, no storage, no networking. Every function is
//! deterministic so that all validating peers reach the same verdict.
//!
//! ## Key Types
//!
//! - [`Ed25519PublicKey`] - Agent identity (and hub issuer key)
//! - [`SigningFields`] - The authenticated fields of an invite
//! - [`TrustConfig`] - Network identifier, issuer key, vouching rules
//! - [`Timestamp`] - Microseconds since the Unix epoch
//!
//! ## Canonicalization
//!
//! Signing payloads are deterministic CBOR arrays where every field carries
//! its own length header. See [`canonical`].

#[macro_use]
mod serde_hex;

pub mod authority;
pub mod canonical;
pub mod config;
pub mod crypto;
pub mod error;
pub mod types;

pub use authority::{sign, sign_fields, verify, verify_fields};
pub use canonical::{canonical_encode, canonicalize, CanonicalValue, SigningFields};
pub use config::{
    TrustConfig, VouchThresholds, DEFAULT_VALIDITY_WINDOW_MICROS, REQUIRED_VOUCHES_FROM_ANCHOR,
    REQUIRED_VOUCHES_FROM_MEMBERS,
};
pub use crypto::{Blake3Hash, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::{ConfigError, CoreError};
pub use types::{InviteId, Timestamp, VouchId};
