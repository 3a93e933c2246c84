//! # Gabby Grove References
//!
//! Feed, message and content references for the Gabby Grove log format, and
//! their compact binary form.
//!
//! This crate contains no I/O. It is pure computation over 32-byte keys and
//! hashes.
//!
//! ## Key Types
//!
//! - [`BinaryRef`] - A feed, message or content reference with a fixed
//!   33-byte wire form
//! - [`Ref`] - Any reference with a canonical string form
//! - [`FeedRef`], [`MessageRef`], [`ContentRef`] - The typed references
//!
//! ## Wire Format
//!
//! One discriminant byte (`0x01` feed, `0x02` message, `0x03` content)
//! followed by 32 payload bytes. See [`binref`] module.
//!
//! ```rust
//! use gabbygrove_refs::{BinaryRef, RefType};
//!
//! let br = BinaryRef::from_public_key(&[0u8; 32]).unwrap();
//! let bytes = br.marshal_binary().unwrap();
//! assert_eq!(bytes[0], 0x01);
//!
//! let decoded = BinaryRef::from_binary(&bytes).unwrap();
//! assert_eq!(decoded.validate(), RefType::Feed);
//! ```

pub mod binref;
pub mod crypto;
pub mod error;
pub mod refs;

pub use binref::{BinaryRef, RefType, BINREF_SIZE};
pub use crypto::{content_ref_for, message_ref_for, Keypair};
pub use error::{RefError, Result};
pub use refs::{BlobRef, ContentRef, FeedRef, MessageRef, Ref, RefAlgo, REF_LEN};
