//! # Porch Testkit
//!
//! Testing utilities for Porch.
//!
//! ## Overview
//!
//! - **Golden vectors**: canonical signing bytes and signatures with known
//!   values, for checking other implementations byte for byte
//! - **Generators**: proptest strategies for keys, invites and vouch histories
//! - **Fixtures**: a deterministic hub, network and set of neighbors
//!
//! ## Golden Vectors
//!
//! ```rust
//! use porch_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! assert!(verify_all_vectors().is_ok());
//! for vector in all_vectors() {
//!     println!("{}: {}", vector.name, hex::encode(vector.canonical_bytes()));
//! }
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use porch_testkit::fixtures::{NetworkFixture, NOW};
//!
//! let network = NetworkFixture::new();
//! let issued = network.invite("Ada");
//! assert_eq!(issued.created_at, NOW);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{NetworkFixture, NETWORK_ID, NOW};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
