//! # Porch
//!
//! Invite-gated membership for peer-to-peer neighborhood networks.
//!
//! ## Overview
//!
//! A hub issues signed invite codes. A new peer presents one when joining,
//! and every validating peer independently decides whether to admit it.
//! Admitted peers start Pending and become full members once existing
//! members vouch for them.
//!
//! - **Invites**: two wire formats, one decoded sum type ([`invite`])
//! - **Validation**: a pure, single-pass genesis check ([`validate`])
//! - **Vouching**: a web of trust rooted in designated anchors ([`vouch`])
//! - **Bootstrap**: the founding peer joins without an invite
//!
//! ## Usage
//!
//! ```rust
//! use porch::{Membrane, MembershipStatus, TrustConfig, VouchType};
//! use porch::core::{Keypair, Timestamp};
//! use porch::invite::{encode, InvitationRequest, InviteIssuer};
//!
//! let now = Timestamp::from_micros(1_736_870_400_000_000);
//! let hub = Keypair::generate();
//! let founder = Keypair::generate().public_key();
//! let neighbor = Keypair::generate().public_key();
//!
//! let config = TrustConfig::new("elm-2025", hub.public_key()).with_bootstrap_agent(founder);
//! let issuer = InviteIssuer::from_config(hub, &config);
//! let mut membrane = Membrane::new(config).unwrap();
//!
//! // The founder needs no invite.
//! assert!(membrane.admit(&founder, None, now).is_valid());
//! membrane.found(founder, now).unwrap();
//!
//! // Everyone else does.
//! let issued = issuer.issue(InvitationRequest::new("Ada"), now).unwrap();
//! assert!(membrane.admit_code(&neighbor, Some(&issued.code), now).is_valid());
//! assert_eq!(membrane.status_of(&neighbor), MembershipStatus::Pending);
//!
//! membrane
//!     .vouch(founder, neighbor, VouchType::PhysicalHandshake, None, now)
//!     .unwrap();
//! assert!(membrane.can_participate(&neighbor));
//! ```
//!
//! ## Re-exports
//!
//! - `porch::core` - Keys, canonical signing payloads, trust configuration
//! - `porch::invite` - Invite codes and issuance
//! - `porch::vouch` - Vouch ledger and membership status

pub mod bootstrap;
pub mod error;
pub mod membrane;
pub mod validator;

pub use porch_core as core;
pub use porch_invite as invite;
pub use porch_vouch as vouch;

pub use bootstrap::BootstrapGate;
pub use error::{PorchError, Result};
pub use membrane::Membrane;
pub use validator::{validate, validate_code, InvalidReason, ValidationResult};

pub use porch_core::{Ed25519PublicKey, Keypair, Timestamp, TrustConfig, VouchThresholds};
pub use porch_invite::{decode, encode, DecodeError, InviteCode};
pub use porch_vouch::{MembershipStatus, VouchError, VouchLedger, VouchType};
