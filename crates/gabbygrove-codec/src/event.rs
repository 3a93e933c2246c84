//! Event headers: the composite structure that carries binary references.
//!
//! An event is encoded as a CBOR array (struct-to-array), with every
//! reference written through the [`RefCodec`] extension:
//!
//! ```text
//! [ previous, author, sequence, timestamp, [ hash, size, type ] ]
//! ```
//!
//! `previous` is `null` for the first event of a feed. Signing is not part of
//! this module.

use ciborium::value::{Integer, Value};
use gabbygrove_refs::{message_ref_for, BinaryRef, MessageRef, RefType};

use crate::cbor::{read_value, write_value, RefCodec};
use crate::error::{CodecError, Result};

/// Number of fields in an encoded event.
const EVENT_FIELDS: usize = 5;

/// Number of fields in an encoded content header.
const CONTENT_FIELDS: usize = 3;

/// How the content bytes are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContentType {
    Unknown = 0,
    Json = 1,
    Cbor = 2,
}

impl ContentType {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from the wire value.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Json),
            2 => Some(Self::Cbor),
            _ => None,
        }
    }
}

/// Describes the content an event points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentHeader {
    /// Content reference for the payload bytes.
    pub hash: BinaryRef,
    /// Payload size in bytes.
    pub size: u16,
    pub kind: ContentType,
}

/// A Gabby Grove event header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// The previous event in the feed (None if sequence = 1).
    pub previous: Option<BinaryRef>,
    /// The feed this event belongs to.
    pub author: BinaryRef,
    /// Position in the feed (1-indexed).
    pub sequence: u64,
    /// Author-claimed timestamp (Unix milliseconds). Untrusted.
    pub timestamp: i64,
    pub content: ContentHeader,
}

impl Event {
    /// Check reference kinds and the sequence/previous rules.
    pub fn validate(&self) -> Result<()> {
        expect_kind(&self.author, RefType::Feed, "author")?;
        expect_kind(&self.content.hash, RefType::Content, "content hash")?;

        match (self.sequence, &self.previous) {
            (0, _) => Err(malformed("sequence starts at 1")),
            (1, Some(_)) => Err(malformed("first event must not have a previous reference")),
            (1, None) => Ok(()),
            (_, None) => Err(malformed("sequence > 1 requires a previous reference")),
            (_, Some(prev)) => expect_kind(prev, RefType::Message, "previous"),
        }
    }

    /// Build the CBOR value, passing every reference through `codec`.
    pub fn to_value(&self, codec: &RefCodec) -> Result<Value> {
        self.validate()?;

        let previous = match &self.previous {
            Some(prev) => codec.to_value(prev)?,
            None => Value::Null,
        };
        let content = Value::Array(vec![
            codec.to_value(&self.content.hash)?,
            Value::Integer(self.content.size.into()),
            Value::Integer(self.content.kind.to_u8().into()),
        ]);

        Ok(Value::Array(vec![
            previous,
            codec.to_value(&self.author)?,
            Value::Integer(self.sequence.into()),
            Value::Integer(self.timestamp.into()),
            content,
        ]))
    }

    /// Parse an event from a CBOR value.
    pub fn from_value(value: &Value, codec: &RefCodec) -> Result<Self> {
        let fields = array_of(value, EVENT_FIELDS, "event")?;

        let previous = match &fields[0] {
            Value::Null => None,
            other => Some(codec.from_value(other)?),
        };
        let author = codec.from_value(&fields[1])?;
        let sequence = integer(&fields[2], "sequence")?;
        let timestamp = integer(&fields[3], "timestamp")?;

        let content_fields = array_of(&fields[4], CONTENT_FIELDS, "content")?;
        let hash = codec.from_value(&content_fields[0])?;
        let size = integer(&content_fields[1], "content size")?;
        let kind_raw: u64 = integer(&content_fields[2], "content type")?;
        let kind = ContentType::from_u64(kind_raw)
            .ok_or_else(|| malformed(format!("unknown content type: {kind_raw}")))?;

        let event = Event {
            previous,
            author,
            sequence,
            timestamp,
            content: ContentHeader { hash, size, kind },
        };
        event.validate()?;
        Ok(event)
    }

    /// Encode to CBOR bytes.
    pub fn encode(&self, codec: &RefCodec) -> Result<Vec<u8>> {
        write_value(&self.to_value(codec)?)
    }

    /// Decode from CBOR bytes. The input must hold exactly one event.
    pub fn decode(bytes: &[u8], codec: &RefCodec) -> Result<Self> {
        Self::from_value(&read_value(bytes)?, codec)
    }

    /// The message reference other events use to point at this one.
    pub fn message_ref(&self, codec: &RefCodec) -> Result<MessageRef> {
        Ok(message_ref_for(&self.encode(codec)?))
    }
}

fn malformed(msg: impl Into<String>) -> CodecError {
    CodecError::MalformedEvent(msg.into())
}

fn expect_kind(r: &BinaryRef, expected: RefType, field: &str) -> Result<()> {
    let actual = r.validate();
    if actual != expected {
        return Err(malformed(format!("{field} must be a {expected} reference, got {actual}")));
    }
    Ok(())
}

fn array_of<'a>(value: &'a Value, len: usize, what: &str) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) if items.len() == len => Ok(items),
        Value::Array(items) => Err(malformed(format!(
            "{what}: expected {len} fields, got {}",
            items.len()
        ))),
        _ => Err(malformed(format!("{what}: expected an array"))),
    }
}

fn integer<T: TryFrom<Integer>>(value: &Value, field: &str) -> Result<T> {
    match value {
        Value::Integer(i) => {
            T::try_from(*i).map_err(|_| malformed(format!("{field} out of range")))
        }
        _ => Err(malformed(format!("{field}: expected an integer"))),
    }
}
