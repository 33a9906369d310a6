//! Canonical CBOR encoding for signing payloads.
//!
//! Follows RFC 8949 Core Deterministic Encoding:
//! - Integers use the smallest valid encoding
//! - Definite lengths only
//! - Map keys sorted by encoded byte comparison
//! - No floats (timestamps are i64 microseconds)
//!
//! Every text and byte string carries its own length header, so no choice of
//! field contents can shift a boundary between fields. A delimiter-joined
//! payload would let `"a:b" + "c"` and `"a" + "b:c"` sign identically.
//!
//! **This encoding is frozen.** Changing it invalidates every issued invite.

use crate::crypto::Ed25519PublicKey;
use crate::types::Timestamp;

/// Domain separation tag for invite signatures.
pub const SIGN_DOMAIN: &str = "porch/invite-sig/v1";

/// Variant tags inside the signing payload.
mod tags {
    pub const LEGACY: u64 = 1;
    pub const STRUCTURED: u64 = 2;
}

/// A value in the canonical encoding.
///
/// Deliberately smaller than a general CBOR value: only what signing
/// payloads and content ids need, so encoding cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalValue<'a> {
    Uint(u64),
    Int(i64),
    Bytes(&'a [u8]),
    Text(&'a str),
    Array(Vec<CanonicalValue<'a>>),
    Map(Vec<(CanonicalValue<'a>, CanonicalValue<'a>)>),
    Null,
}

/// The authenticated fields of an invite.
///
/// The bootstrap address and any voucher reference are not authenticated;
/// a voucher may be attached to an already-signed invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningFields<'a> {
    /// Legacy delimited invites name the hub by address.
    Legacy {
        hub_address: &'a str,
        network_id: &'a str,
        timestamp: Timestamp,
    },
    /// Structured invites name the hub by public key and bind the
    /// rendezvous address.
    Structured {
        issuer: &'a Ed25519PublicKey,
        network_id: &'a str,
        timestamp: Timestamp,
        signal_url: &'a str,
    },
}

impl<'a> SigningFields<'a> {
    /// The network identifier being authenticated.
    pub fn network_id(&self) -> &'a str {
        match self {
            SigningFields::Legacy { network_id, .. } => *network_id,
            SigningFields::Structured { network_id, .. } => *network_id,
        }
    }

    /// The issuance timestamp being authenticated.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            SigningFields::Legacy { timestamp, .. } => *timestamp,
            SigningFields::Structured { timestamp, .. } => *timestamp,
        }
    }
}

/// Encode the authenticated fields to canonical bytes.
///
/// Layout: `[domain, variant, issuer, network_id, timestamp, signal_url | null]`.
pub fn canonicalize(fields: &SigningFields<'_>) -> Vec<u8> {
    let value = match fields {
        SigningFields::Legacy {
            hub_address,
            network_id,
            timestamp,
        } => CanonicalValue::Array(vec![
            CanonicalValue::Text(SIGN_DOMAIN),
            CanonicalValue::Uint(tags::LEGACY),
            CanonicalValue::Text(hub_address),
            CanonicalValue::Text(network_id),
            CanonicalValue::Int(timestamp.as_micros()),
            CanonicalValue::Null,
        ]),
        SigningFields::Structured {
            issuer,
            network_id,
            timestamp,
            signal_url,
        } => CanonicalValue::Array(vec![
            CanonicalValue::Text(SIGN_DOMAIN),
            CanonicalValue::Uint(tags::STRUCTURED),
            CanonicalValue::Bytes(issuer.as_bytes()),
            CanonicalValue::Text(network_id),
            CanonicalValue::Int(timestamp.as_micros()),
            CanonicalValue::Text(signal_url),
        ]),
    };
    canonical_encode(&value)
}

/// Encode a value to canonical bytes.
pub fn canonical_encode(value: &CanonicalValue<'_>) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Recursively encode a value.
fn encode_value_to(buf: &mut Vec<u8>, value: &CanonicalValue<'_>) {
    match value {
        CanonicalValue::Uint(n) => encode_uint(buf, 0, *n),
        CanonicalValue::Int(n) => encode_int(buf, *n),
        CanonicalValue::Bytes(b) => {
            encode_uint(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        CanonicalValue::Text(s) => {
            encode_uint(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        CanonicalValue::Array(items) => {
            encode_uint(buf, 4, items.len() as u64);
            for item in items {
                encode_value_to(buf, item);
            }
        }
        CanonicalValue::Map(entries) => encode_map_canonical(buf, entries),
        CanonicalValue::Null => buf.push(0xf6),
    }
}

/// Encode a signed integer (major types 0 and 1).
fn encode_int(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a map with keys sorted by their encoded bytes (major type 5).
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(CanonicalValue<'_>, CanonicalValue<'_>)]) {
    let mut pairs: Vec<(Vec<u8>, &CanonicalValue<'_>)> = entries
        .iter()
        .map(|(k, v)| (canonical_encode(k), v))
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}
