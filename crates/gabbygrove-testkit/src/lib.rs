//! # Gabby Grove Testkit
//!
//! Testing utilities for Gabby Grove references and the codec.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known references and events with their expected wire bytes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for building feeds in tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use gabbygrove_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, produced) in verify_all_vectors() {
//!     assert!(matches, "{name}: {produced}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use gabbygrove_testkit::generators::binary_ref;
//!
//! proptest! {
//!     #[test]
//!     fn binary_roundtrip(br in binary_ref()) {
//!         let bytes = br.marshal_binary().unwrap();
//!         prop_assert_eq!(gabbygrove_refs::BinaryRef::from_binary(&bytes).unwrap(), br);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use gabbygrove_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let event = fixture.make_first_event(b"initial data");
//! assert_eq!(event.sequence, 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{event_from_params, EventParams};
pub use vectors::{
    event_from_vector, event_vectors, ref_vectors, verify_all_vectors, EventVector, RefVector,
};
