//! # Porch Vouch
//!
//! The web of trust behind full membership.
//!
//! Joining with a valid invite makes an agent a member, but a Pending one.
//! Full participation requires vouches: one from a trusted anchor, or two
//! from verified members (configurable per network).
//!
//! ## Key Types
//!
//! - [`Vouch`] - One agent attesting to another
//! - [`AnchorDesignation`] - A permanent root of trust
//! - [`MembershipStatus`] - Pending, PartiallyVouched, Verified, TrustedAnchor
//! - [`VouchLedger`] - Records vouches and resolves every agent's status
//!
//! ## Example
//!
//! ```rust
//! use porch_core::{Keypair, Timestamp, VouchThresholds};
//! use porch_vouch::{MembershipStatus, VouchLedger, VouchType};
//!
//! let founder = Keypair::generate().public_key();
//! let neighbor = Keypair::generate().public_key();
//! let now = Timestamp::from_micros(1_736_870_400_000_000);
//!
//! let mut ledger = VouchLedger::new(VouchThresholds::default());
//! ledger.initialize_founding_anchor(founder, now).unwrap();
//! ledger
//!     .add_vouch(founder, neighbor, VouchType::PhysicalHandshake, None, now)
//!     .unwrap();
//! ledger.resolve();
//!
//! assert_eq!(ledger.status_of(&neighbor), MembershipStatus::Verified);
//! ```

pub mod anchor;
pub mod error;
pub mod ledger;
pub mod status;
pub mod vouch;

pub use anchor::AnchorDesignation;
pub use error::{Result, VouchError};
pub use ledger::{LedgerEntry, MembershipInfo, VouchInfo, VouchLedger};
pub use status::{count_vouches, status_of, MembershipStatus, StatusSnapshot, VouchCounts};
pub use vouch::{Vouch, VouchType, MAX_NOTE_LENGTH};
