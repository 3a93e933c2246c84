//! CBOR encoding of extension values.
//!
//! An extension value is written as a tagged byte string:
//!
//! ```text
//! tag(binref_tag) bytes(33)   e.g. c1 58 21 <33 bytes>
//! ```
//!
//! The codec owns the tag and the framing; the extension owns the bytes.

use ciborium::value::Value;
use gabbygrove_refs::BinaryRef;
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::ext::{BinRefExt, BytesExt};

/// Codec for one extension type, registered under one CBOR tag.
#[derive(Debug, Clone)]
pub struct ExtCodec<E> {
    ext: E,
    tag: u64,
    accept_untagged: bool,
}

/// The codec for binary references.
pub type RefCodec = ExtCodec<BinRefExt>;

impl RefCodec {
    /// Create a binary reference codec from configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self::with_ext(BinRefExt, config.binref_tag, config.accept_untagged)
    }
}

impl Default for RefCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl<E: BytesExt> ExtCodec<E> {
    /// Register `ext` under `tag`.
    pub fn with_ext(ext: E, tag: u64, accept_untagged: bool) -> Self {
        Self {
            ext,
            tag,
            accept_untagged,
        }
    }

    /// The CBOR tag this codec writes.
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Convert a value to a tagged CBOR byte string.
    pub fn to_value(&self, value: &E::Value) -> Result<Value> {
        let bytes = self.ext.convert_ext(value)?;
        trace!(tag = self.tag, len = bytes.len(), "encoded extension value");
        Ok(Value::Tag(self.tag, Box::new(Value::Bytes(bytes))))
    }

    /// Convert a CBOR value back through the extension.
    pub fn from_value(&self, value: &Value) -> Result<E::Value> {
        let bytes = match value {
            Value::Tag(tag, inner) if *tag == self.tag => match inner.as_ref() {
                Value::Bytes(bytes) => bytes,
                _ => {
                    return Err(self.reject(CodecError::UnexpectedShape(
                        "tag content is not a byte string",
                    )))
                }
            },
            Value::Tag(tag, _) => {
                return Err(self.reject(CodecError::UnexpectedTag {
                    expected: self.tag,
                    got: *tag,
                }))
            }
            Value::Bytes(bytes) if self.accept_untagged => bytes,
            Value::Bytes(_) => {
                return Err(self.reject(CodecError::UnexpectedShape("untagged byte string")))
            }
            _ => {
                return Err(self.reject(CodecError::UnexpectedShape(
                    "expected a tagged byte string",
                )))
            }
        };

        let mut out = E::Value::default();
        self.ext
            .update_ext(&mut out, bytes)
            .map_err(|e| self.reject(e))?;
        trace!(tag = self.tag, "decoded extension value");
        Ok(out)
    }

    /// Encode a value to CBOR bytes.
    pub fn encode(&self, value: &E::Value) -> Result<Vec<u8>> {
        write_value(&self.to_value(value)?)
    }

    /// Decode a value from CBOR bytes. The input must hold exactly one item.
    pub fn decode(&self, bytes: &[u8]) -> Result<E::Value> {
        self.from_value(&read_value(bytes)?)
    }

    fn reject(&self, err: CodecError) -> CodecError {
        debug!(tag = self.tag, error = %err, "codec rejected wire value");
        err
    }
}

/// Write a CBOR value to bytes.
pub(crate) fn write_value(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CodecError::Encoding(e.to_string()))?;
    Ok(buf)
}

/// Read exactly one CBOR value from bytes.
pub(crate) fn read_value(bytes: &[u8]) -> Result<Value> {
    let mut reader = bytes;
    let value: Value =
        ciborium::from_reader(&mut reader).map_err(|e| CodecError::Decoding(e.to_string()))?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes(reader.len()));
    }
    Ok(value)
}

/// Encode a list of binary references as a CBOR array of tagged byte strings.
pub fn encode_ref_list(codec: &RefCodec, refs: &[BinaryRef]) -> Result<Vec<u8>> {
    let items = refs
        .iter()
        .map(|r| codec.to_value(r))
        .collect::<Result<Vec<_>>>()?;
    write_value(&Value::Array(items))
}

/// Decode a CBOR array of binary references. Any bad element aborts the decode.
pub fn decode_ref_list(codec: &RefCodec, bytes: &[u8]) -> Result<Vec<BinaryRef>> {
    match read_value(bytes)? {
        Value::Array(items) => items.iter().map(|v| codec.from_value(v)).collect(),
        _ => Err(CodecError::UnexpectedShape("expected an array of references")),
    }
}
