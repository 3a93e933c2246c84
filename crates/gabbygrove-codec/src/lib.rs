//! # Gabby Grove Codec
//!
//! CBOR encoding for structures that carry [`BinaryRef`](gabbygrove_refs::BinaryRef)
//! fields.
//!
//! The codec knows nothing about reference internals. A binary reference is
//! registered as an extension ([`BinRefExt`]) under a CBOR tag, and the codec
//! asks the extension for bytes when it encodes and hands bytes back when it
//! decodes. Any extension error aborts the whole operation.
//!
//! ```rust
//! use gabbygrove_codec::{CodecConfig, RefCodec};
//! use gabbygrove_refs::{BinaryRef, FeedRef};
//!
//! let codec = RefCodec::new(CodecConfig::default());
//! let feed = BinaryRef::Feed(FeedRef::gabby([7u8; 32]));
//!
//! let bytes = codec.encode(&feed).unwrap();
//! assert_eq!(&bytes[..3], &[0xc1, 0x58, 0x21]);
//! assert_eq!(codec.decode(&bytes).unwrap(), feed);
//! ```
//!
//! [`Event`] shows the extension used inside a composite structure.

pub mod cbor;
pub mod config;
pub mod error;
pub mod event;
pub mod ext;

pub use cbor::{decode_ref_list, encode_ref_list, ExtCodec, RefCodec};
pub use config::{CodecConfig, DEFAULT_BINREF_TAG};
pub use error::{CodecError, Result};
pub use event::{ContentHeader, ContentType, Event};
pub use ext::{BinRefExt, BytesExt};
