//! # Porch Invites
//!
//! Invite codes: the signed, shareable tokens a hub hands to a new neighbor.
//!
//! ## Wire Formats
//!
//! Two versions are in circulation and both decode to one [`InviteCode`]
//! sum type:
//!
//! - **Legacy** (`OURBLOCK_V1`): five colon-delimited parts,
//!   `OURBLOCK_V1:hubAddress:networkSeed:timestamp:signature`.
//! - **Structured** (`OURBLOCK_V2`): `OURBLOCK_V2:` followed by base64 of a
//!   JSON field map carrying the hub key, signal and bootstrap addresses, and
//!   an optional voucher.
//!
//! Decoding is pure parsing. Whether an invite admits anyone is decided by
//! the membership validator in the `porch` crate.
//!
//! ## Usage
//!
//! ```rust
//! use porch_core::{Keypair, Timestamp};
//! use porch_invite::{decode, InvitationRequest, InviteIssuer};
//!
//! let hub = InviteIssuer::new(Keypair::generate(), "elm-2025");
//! let issued = hub
//!     .issue(InvitationRequest::new("Ada"), Timestamp::from_micros(1_736_870_400_000_000))
//!     .unwrap();
//!
//! let invite = decode(&issued.code).unwrap();
//! assert_eq!(invite.network_id(), "elm-2025");
//! ```

pub mod code;
pub mod codec;
pub mod error;
pub mod issuer;

pub use code::{
    InviteCode, InviteVersion, LegacyInvite, StructuredInvite, DEFAULT_BOOTSTRAP_URL,
    DEFAULT_SIGNAL_URL,
};
pub use codec::{decode, encode, MAX_CODE_LEN, MIN_CODE_LEN};
pub use error::{DecodeError, EncodeError};
pub use issuer::{InvitationRequest, InviteIssuer, IssuedInvitation};
