//! Codec extensions: type-specific byte encodings the generic codec
//! delegates to while it walks a value.
//!
//! An extension is a pair of pure functions keyed by its `Value` type. The
//! codec never inspects the bytes; any error returned here aborts the whole
//! encode or decode.

use gabbygrove_refs::BinaryRef;

use crate::error::Result;

/// A type that the codec writes as an opaque byte string.
pub trait BytesExt {
    /// The type this extension handles.
    type Value: Default;

    /// Convert a value into its wire bytes.
    fn convert_ext(&self, value: &Self::Value) -> Result<Vec<u8>>;

    /// Decode wire bytes into `dst`.
    fn update_ext(&self, dst: &mut Self::Value, src: &[u8]) -> Result<()>;
}

/// Extension for [`BinaryRef`]: delegates to its 33-byte wire form.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinRefExt;

impl BytesExt for BinRefExt {
    type Value = BinaryRef;

    fn convert_ext(&self, value: &BinaryRef) -> Result<Vec<u8>> {
        let bytes = value.marshal_binary()?;
        Ok(bytes.to_vec())
    }

    fn update_ext(&self, dst: &mut BinaryRef, src: &[u8]) -> Result<()> {
        dst.unmarshal_binary(src)?;
        Ok(())
    }
}
