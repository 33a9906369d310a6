//! String encoding and decoding of invite codes.
//!
//! Decoding dispatches on the version prefix. It only parses; no signature
//! or expiry is checked here.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use porch_core::{Ed25519PublicKey, Timestamp};

use crate::code::{
    InviteCode, InviteVersion, LegacyInvite, StructuredInvite, DEFAULT_BOOTSTRAP_URL,
};
use crate::error::{DecodeError, EncodeError};

/// Shortest code accepted, in characters.
pub const MIN_CODE_LEN: usize = 10;

/// Longest code accepted, in characters.
pub const MAX_CODE_LEN: usize = 2000;

const LEGACY_PARTS: usize = 5;

mod field {
    pub const NETWORK_SEED: &str = "network_seed";
    pub const HUB_KEY: &str = "hub_agent_pub_key";
    pub const SIGNAL_URL: &str = "signal_url";
    pub const BOOTSTRAP_URL: &str = "bootstrap_url";
    pub const TIMESTAMP: &str = "timestamp";
    pub const SIGNATURE: &str = "signature";
    pub const VOUCHER: &str = "voucher";
}

/// Parse an invite code string.
pub fn decode(code: &str) -> Result<InviteCode, DecodeError> {
    let len = code.chars().count();
    if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
        return Err(DecodeError::Malformed(format!(
            "length {len} outside {MIN_CODE_LEN}..={MAX_CODE_LEN}"
        )));
    }

    let (prefix, rest) = code.split_once(':').unwrap_or((code, ""));
    match InviteVersion::from_prefix(prefix) {
        Some(InviteVersion::Legacy) => decode_legacy(code).map(InviteCode::Legacy),
        Some(InviteVersion::Structured) => decode_structured(rest).map(InviteCode::Structured),
        None => Err(DecodeError::UnknownVersion(prefix.to_string())),
    }
}

/// Render an invite as a shareable string.
pub fn encode(invite: &InviteCode) -> Result<String, EncodeError> {
    let code = match invite {
        InviteCode::Legacy(legacy) => encode_legacy(legacy)?,
        InviteCode::Structured(structured) => encode_structured(structured),
    };

    let len = code.chars().count();
    if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
        return Err(EncodeError::Length(len));
    }
    Ok(code)
}

fn decode_legacy(code: &str) -> Result<LegacyInvite, DecodeError> {
    let parts: Vec<&str> = code.split(':').collect();
    if parts.len() != LEGACY_PARTS {
        return Err(DecodeError::Malformed(format!(
            "expected {LEGACY_PARTS} parts, found {}",
            parts.len()
        )));
    }
    if let Some(index) = parts.iter().position(|p| p.is_empty()) {
        return Err(DecodeError::Malformed(format!("part {index} is empty")));
    }

    let timestamp: i64 = parts[3]
        .parse()
        .map_err(|_| DecodeError::Malformed(format!("timestamp `{}` is not an integer", parts[3])))?;
    let signature = BASE64_STANDARD
        .decode(parts[4])
        .map_err(|e| DecodeError::Malformed(format!("signature: {e}")))?;

    Ok(LegacyInvite {
        hub_address: parts[1].to_string(),
        network_id: parts[2].to_string(),
        timestamp: Timestamp::from_micros(timestamp),
        signature,
    })
}

fn encode_legacy(invite: &LegacyInvite) -> Result<String, EncodeError> {
    for (name, value) in [
        ("hub_address", invite.hub_address.as_str()),
        ("network_id", invite.network_id.as_str()),
    ] {
        if value.is_empty() || value.contains(':') {
            return Err(EncodeError::InvalidField(name));
        }
    }
    if invite.signature.is_empty() {
        return Err(EncodeError::InvalidField("signature"));
    }

    Ok(format!(
        "{}:{}:{}:{}:{}",
        InviteVersion::Legacy.prefix(),
        invite.hub_address,
        invite.network_id,
        invite.timestamp.as_micros(),
        BASE64_STANDARD.encode(&invite.signature),
    ))
}

fn decode_structured(payload: &str) -> Result<StructuredInvite, DecodeError> {
    let json = BASE64_STANDARD
        .decode(payload)
        .map_err(|e| DecodeError::Encoding(format!("payload: {e}")))?;
    let value: Value =
        serde_json::from_slice(&json).map_err(|e| DecodeError::Encoding(format!("payload: {e}")))?;
    let Value::Object(map) = value else {
        return Err(DecodeError::Encoding("payload is not an object".into()));
    };

    let network_id = string_field(&map, field::NETWORK_SEED)?;
    let issuer = key_field(&map, field::HUB_KEY)?;
    let signal_url = string_field(&map, field::SIGNAL_URL)?;
    let timestamp = required(&map, field::TIMESTAMP)?
        .as_i64()
        .ok_or_else(|| wrong_type(field::TIMESTAMP))?;
    let signature = bytes_field(&map, field::SIGNATURE)?;

    let bootstrap_url = match optional(&map, field::BOOTSTRAP_URL) {
        Some(v) => v
            .as_str()
            .ok_or_else(|| wrong_type(field::BOOTSTRAP_URL))?
            .to_string(),
        None => DEFAULT_BOOTSTRAP_URL.to_string(),
    };
    let voucher = match optional(&map, field::VOUCHER) {
        Some(_) => Some(key_field(&map, field::VOUCHER)?),
        None => None,
    };

    Ok(StructuredInvite {
        network_id,
        issuer,
        signal_url,
        bootstrap_url,
        timestamp: Timestamp::from_micros(timestamp),
        signature,
        voucher,
    })
}

fn encode_structured(invite: &StructuredInvite) -> String {
    let mut map = Map::new();
    map.insert(field::NETWORK_SEED.into(), invite.network_id.clone().into());
    map.insert(
        field::HUB_KEY.into(),
        BASE64_STANDARD.encode(invite.issuer.as_bytes()).into(),
    );
    map.insert(field::SIGNAL_URL.into(), invite.signal_url.clone().into());
    map.insert(field::BOOTSTRAP_URL.into(), invite.bootstrap_url.clone().into());
    map.insert(field::TIMESTAMP.into(), invite.timestamp.as_micros().into());
    map.insert(
        field::SIGNATURE.into(),
        BASE64_STANDARD.encode(&invite.signature).into(),
    );
    if let Some(voucher) = &invite.voucher {
        map.insert(
            field::VOUCHER.into(),
            BASE64_STANDARD.encode(voucher.as_bytes()).into(),
        );
    }

    // Map keys are ordered, so the same invite always renders the same way.
    let json = Value::Object(map).to_string();
    format!(
        "{}:{}",
        InviteVersion::Structured.prefix(),
        BASE64_STANDARD.encode(json)
    )
}

/// A present, non-null field.
fn optional<'a>(map: &'a Map<String, Value>, name: &'static str) -> Option<&'a Value> {
    map.get(name).filter(|v| !v.is_null())
}

fn required<'a>(map: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, DecodeError> {
    optional(map, name).ok_or(DecodeError::MissingField(name))
}

fn wrong_type(name: &'static str) -> DecodeError {
    DecodeError::Encoding(format!("field `{name}` has the wrong type"))
}

fn string_field(map: &Map<String, Value>, name: &'static str) -> Result<String, DecodeError> {
    required(map, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_type(name))
}

fn bytes_field(map: &Map<String, Value>, name: &'static str) -> Result<Vec<u8>, DecodeError> {
    let text = required(map, name)?.as_str().ok_or_else(|| wrong_type(name))?;
    BASE64_STANDARD
        .decode(text)
        .map_err(|e| DecodeError::Encoding(format!("field `{name}`: {e}")))
}

fn key_field(map: &Map<String, Value>, name: &'static str) -> Result<Ed25519PublicKey, DecodeError> {
    let bytes = bytes_field(map, name)?;
    Ed25519PublicKey::try_from(bytes.as_slice()).map_err(|_| {
        DecodeError::Encoding(format!(
            "field `{name}` is {} bytes, expected 32",
            bytes.len()
        ))
    })
}
