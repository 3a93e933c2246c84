//! Binary references: a compact, tagged encoding of feed, message and
//! content references.
//!
//! Wire format (always 33 bytes):
//!
//! | Offset | Length | Meaning |
//! |---|---|---|
//! | 0 | 1 | discriminant: 0x01 feed, 0x02 message, 0x03 content |
//! | 1 | 32 | public key (feed) or hash (message, content) |
//!
//! Feed and message references always decode with the Gabby Grove
//! algorithms. Content references must use [`RefAlgo::ContentGabby`] in both
//! directions.
//!
//! **CRITICAL**: This layout is FROZEN. Events sign over these bytes.

use serde::de::{self, Visitor};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{RefError, Result};
use crate::refs::{
    ContentRef, FeedRef, MessageRef, Ref, RefAlgo, CONTENT_BINARY_LEN, CONTENT_GABBY_TAG, REF_LEN,
};

/// Size of every encoded binary reference: one tag byte and 32 payload bytes.
pub const BINREF_SIZE: usize = 1 + REF_LEN;

/// Wire discriminants.
mod tag {
    pub const FEED: u8 = 0x01;
    pub const MESSAGE: u8 = 0x02;
    pub const CONTENT: u8 = 0x03;
}

/// The kind of reference held by a [`BinaryRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefType {
    #[default]
    Undefined,
    Feed,
    Message,
    Content,
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefType::Undefined => "undefined",
            RefType::Feed => "feed",
            RefType::Message => "message",
            RefType::Content => "content",
        };
        f.write_str(name)
    }
}

/// A feed, message or content reference with a fixed 33-byte binary form.
///
/// At most one reference is held; `Undefined` is the empty state and cannot
/// be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BinaryRef {
    #[default]
    Undefined,
    Feed(FeedRef),
    Message(MessageRef),
    Content(ContentRef),
}

impl BinaryRef {
    /// Wrap a typed reference.
    ///
    /// Blobs have no binary reference form and are rejected.
    pub fn from_ref(r: Ref) -> Result<Self> {
        match r {
            Ref::Feed(fr) => Ok(BinaryRef::Feed(fr)),
            Ref::Message(mr) => Ok(BinaryRef::Message(mr)),
            Ref::Content(cr) => Ok(BinaryRef::Content(cr)),
            other @ Ref::Blob(_) => Err(RefError::UnsupportedReferenceType(other.kind_name())),
        }
    }

    /// Build a Gabby Grove feed reference from a raw ed25519 public key.
    pub fn from_public_key(public_key: &[u8]) -> Result<Self> {
        if public_key.len() != ed25519_dalek::PUBLIC_KEY_LENGTH {
            return Err(RefError::InvalidPublicKeyLength(public_key.len()));
        }
        let fr = FeedRef::from_bytes(public_key, RefAlgo::FeedGabby)?;
        Ok(BinaryRef::Feed(fr))
    }

    /// Decode the 33-byte wire form.
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        if data.len() != BINREF_SIZE {
            return Err(RefError::InvalidLength {
                expected: BINREF_SIZE,
                got: data.len(),
            });
        }

        let payload = &data[1..];
        match data[0] {
            tag::FEED => {
                let fr = FeedRef::from_bytes(payload, RefAlgo::FeedGabby)?;
                Ok(BinaryRef::Feed(fr))
            }
            tag::MESSAGE => {
                let mr = MessageRef::from_bytes(payload, RefAlgo::MessageGabby)?;
                Ok(BinaryRef::Message(mr))
            }
            tag::CONTENT => {
                // content refs carry their own tag; swap ours for theirs
                let mut retagged = [0u8; CONTENT_BINARY_LEN];
                retagged[0] = CONTENT_GABBY_TAG;
                retagged[1..].copy_from_slice(payload);

                let cr = ContentRef::from_binary(&retagged)?;
                if cr.algo() != RefAlgo::ContentGabby {
                    return Err(RefError::InvalidContentAlgorithm(cr.algo()));
                }
                Ok(BinaryRef::Content(cr))
            }
            other => Err(RefError::UnknownDiscriminant(other)),
        }
    }

    /// The kind of reference held. `Undefined` is not an error here;
    /// callers decide what an empty reference means to them.
    pub fn validate(&self) -> RefType {
        match self {
            BinaryRef::Undefined => RefType::Undefined,
            BinaryRef::Feed(_) => RefType::Feed,
            BinaryRef::Message(_) => RefType::Message,
            BinaryRef::Content(_) => RefType::Content,
        }
    }

    /// Check if no reference is held.
    pub fn is_undefined(&self) -> bool {
        matches!(self, BinaryRef::Undefined)
    }

    /// Encode to the 33-byte wire form.
    pub fn marshal_binary(&self) -> Result<[u8; BINREF_SIZE]> {
        let mut out = [0u8; BINREF_SIZE];
        match self {
            BinaryRef::Undefined => return Err(RefError::AllVariantsEmpty),
            BinaryRef::Feed(fr) => {
                out[0] = tag::FEED;
                out[1..].copy_from_slice(fr.pub_key());
            }
            BinaryRef::Message(mr) => {
                let mut hash = [0u8; REF_LEN];
                mr.copy_hash_to(&mut hash)?;
                out[0] = tag::MESSAGE;
                out[1..].copy_from_slice(&hash);
            }
            BinaryRef::Content(cr) => {
                if cr.algo() != RefAlgo::ContentGabby {
                    return Err(RefError::UnsupportedContentAlgorithm(cr.algo()));
                }
                let cr_bytes = cr.marshal_binary()?;
                out[0] = tag::CONTENT;
                out[1..].copy_from_slice(&cr_bytes[1..]);
            }
        }
        Ok(out)
    }

    /// Decode the 33-byte wire form into `self`.
    ///
    /// On failure `self` is left `Undefined`.
    pub fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        *self = BinaryRef::Undefined;
        *self = Self::from_binary(data)?;
        Ok(())
    }

    /// Encoded size. Constant, whatever is held.
    pub fn size(&self) -> usize {
        BINREF_SIZE
    }

    /// The held reference, if it is of the `expected` kind.
    pub fn get_ref(&self, expected: RefType) -> Result<Ref> {
        let actual = self.validate();
        if actual != expected {
            return Err(RefError::KindMismatch { expected, actual });
        }
        match *self {
            BinaryRef::Undefined => Err(RefError::AllVariantsEmpty),
            BinaryRef::Feed(fr) => Ok(Ref::Feed(fr)),
            BinaryRef::Message(mr) => Ok(Ref::Message(mr)),
            BinaryRef::Content(cr) => Ok(Ref::Content(cr)),
        }
    }

    /// The canonical string form of the held reference.
    ///
    /// # Panics
    ///
    /// Panics if the reference is `Undefined`. Use [`get_ref`](Self::get_ref)
    /// when the reference may be empty.
    pub fn ref_string(&self) -> String {
        match self.get_ref(self.validate()) {
            Ok(r) => r.to_string(),
            Err(err) => panic!("binary reference cannot be rendered: {err}"),
        }
    }

    /// Encode as a JSON string holding the canonical reference string.
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        let r = self.get_ref(self.validate())?;
        serde_json::to_vec(&r.to_string()).map_err(|e| RefError::Json(e.to_string()))
    }

    /// Decode a JSON string holding a canonical reference string.
    ///
    /// On failure `self` is left `Undefined`.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        *self = BinaryRef::Undefined;
        let s: String = serde_json::from_slice(data).map_err(|e| RefError::Json(e.to_string()))?;
        *self = s.parse()?;
        Ok(())
    }

    pub fn as_feed(&self) -> Option<&FeedRef> {
        match self {
            BinaryRef::Feed(fr) => Some(fr),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageRef> {
        match self {
            BinaryRef::Message(mr) => Some(mr),
            _ => None,
        }
    }

    pub fn as_content(&self) -> Option<&ContentRef> {
        match self {
            BinaryRef::Content(cr) => Some(cr),
            _ => None,
        }
    }
}

impl From<FeedRef> for BinaryRef {
    fn from(fr: FeedRef) -> Self {
        BinaryRef::Feed(fr)
    }
}

impl From<MessageRef> for BinaryRef {
    fn from(mr: MessageRef) -> Self {
        BinaryRef::Message(mr)
    }
}

impl From<ContentRef> for BinaryRef {
    fn from(cr: ContentRef) -> Self {
        BinaryRef::Content(cr)
    }
}

impl TryFrom<&[u8]> for BinaryRef {
    type Error = RefError;

    fn try_from(data: &[u8]) -> Result<Self> {
        Self::from_binary(data)
    }
}

impl FromStr for BinaryRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_ref(s.parse()?)
    }
}

/// Human-readable formats get the reference string, binary formats the
/// 33-byte wire form.
impl Serialize for BinaryRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            let r = self.get_ref(self.validate()).map_err(S::Error::custom)?;
            serializer.serialize_str(&r.to_string())
        } else {
            let bytes = self.marshal_binary().map_err(S::Error::custom)?;
            serializer.serialize_bytes(&bytes)
        }
    }
}

struct BinaryRefVisitor;

impl<'de> Visitor<'de> for BinaryRefVisitor {
    type Value = BinaryRef;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a reference string or {BINREF_SIZE} reference bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<BinaryRef, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<BinaryRef, E> {
        BinaryRef::from_binary(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for BinaryRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(BinaryRefVisitor)
        } else {
            deserializer.deserialize_bytes(BinaryRefVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::BlobRef;

    fn samples() -> Vec<BinaryRef> {
        vec![
            BinaryRef::Feed(FeedRef::gabby([0x11; 32])),
            BinaryRef::Message(MessageRef::gabby([0x22; 32])),
            BinaryRef::Content(ContentRef::gabby([0x33; 32])),
        ]
    }

    #[test]
    fn test_binary_roundtrip() {
        for br in samples() {
            let bytes = br.marshal_binary().unwrap();
            assert_eq!(bytes.len(), BINREF_SIZE);

            let mut decoded = BinaryRef::default();
            decoded.unmarshal_binary(&bytes).unwrap();
            assert_eq!(decoded, br);
        }
    }

    #[test]
    fn test_wire_layout() {
        let feed = BinaryRef::Feed(FeedRef::gabby([0xaa; 32])).marshal_binary().unwrap();
        assert_eq!(feed[0], 0x01);
        assert_eq!(&feed[1..], &[0xaa; 32]);

        let msg = BinaryRef::Message(MessageRef::gabby([0xbb; 32])).marshal_binary().unwrap();
        assert_eq!(msg[0], 0x02);
        assert_eq!(&msg[1..], &[0xbb; 32]);

        let content = BinaryRef::Content(ContentRef::gabby([0xcc; 32])).marshal_binary().unwrap();
        assert_eq!(content[0], 0x03);
        assert_eq!(&content[1..], &[0xcc; 32]);
    }

    #[test]
    fn test_invalid_length() {
        for len in [0usize, 1, 32, 34, 100] {
            let data = vec![0x01; len];
            let err = BinaryRef::from_binary(&data).unwrap_err();
            assert!(
                matches!(err, RefError::InvalidLength { expected: 33, got } if got == len),
                "len {len}: {err:?}"
            );
        }
    }

    #[test]
    fn test_unknown_discriminant() {
        for first in [0x00u8, 0x04, 0xff] {
            let mut data = [0u8; BINREF_SIZE];
            data[0] = first;
            assert!(matches!(
                BinaryRef::from_binary(&data),
                Err(RefError::UnknownDiscriminant(b)) if b == first
            ));
        }
    }

    #[test]
    fn test_failed_decode_leaves_undefined() {
        let mut br = BinaryRef::Feed(FeedRef::gabby([1; 32]));
        assert!(br.unmarshal_binary(&[0x09; BINREF_SIZE]).is_err());
        assert!(br.is_undefined());
    }

    #[test]
    fn test_content_algorithm_gate() {
        let br = BinaryRef::Content(ContentRef::new([0x33; 32], RefAlgo::BlobSsb1));
        assert!(matches!(
            br.marshal_binary(),
            Err(RefError::UnsupportedContentAlgorithm(RefAlgo::BlobSsb1))
        ));
    }

    #[test]
    fn test_undefined_cannot_be_encoded() {
        let br = BinaryRef::Undefined;
        assert!(matches!(br.marshal_binary(), Err(RefError::AllVariantsEmpty)));
        assert!(matches!(br.marshal_json(), Err(RefError::AllVariantsEmpty)));
    }

    #[test]
    fn test_size_is_constant() {
        assert_eq!(BinaryRef::Undefined.size(), 33);
        for br in samples() {
            assert_eq!(br.size(), 33);
        }
    }

    #[test]
    fn test_zero_public_key() {
        let br = BinaryRef::from_public_key(&[0u8; 32]).unwrap();
        assert_eq!(br.validate(), RefType::Feed);

        let mut expected = [0u8; 33];
        expected[0] = 0x01;
        assert_eq!(br.marshal_binary().unwrap(), expected);
    }

    #[test]
    fn test_public_key_length() {
        for len in [0usize, 31, 33, 64] {
            assert!(matches!(
                BinaryRef::from_public_key(&vec![0u8; len]),
                Err(RefError::InvalidPublicKeyLength(n)) if n == len
            ));
        }
    }

    #[test]
    fn test_get_ref_kind_mismatch() {
        let br = BinaryRef::Message(MessageRef::gabby([0x22; 32]));
        assert!(matches!(
            br.get_ref(RefType::Feed),
            Err(RefError::KindMismatch {
                expected: RefType::Feed,
                actual: RefType::Message
            })
        ));
        assert!(matches!(br.get_ref(RefType::Message), Ok(Ref::Message(_))));

        assert!(matches!(
            BinaryRef::Undefined.get_ref(RefType::Content),
            Err(RefError::KindMismatch { actual: RefType::Undefined, .. })
        ));
    }

    #[test]
    fn test_from_ref() {
        let fr = FeedRef::gabby([5; 32]);
        assert_eq!(BinaryRef::from_ref(Ref::Feed(fr)).unwrap(), BinaryRef::Feed(fr));

        let blob = Ref::Blob(BlobRef::new([6; 32]));
        assert!(matches!(
            BinaryRef::from_ref(blob),
            Err(RefError::UnsupportedReferenceType("blob"))
        ));
    }

    #[test]
    fn test_ref_string() {
        let br = BinaryRef::Message(MessageRef::gabby([0; 32]));
        assert_eq!(
            br.ref_string(),
            "%AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=.ggmsg-v1"
        );
    }

    #[test]
    #[should_panic(expected = "cannot be rendered")]
    fn test_ref_string_panics_when_undefined() {
        BinaryRef::Undefined.ref_string();
    }

    #[test]
    fn test_json_roundtrip() {
        for br in samples() {
            let json = br.marshal_json().unwrap();
            assert_eq!(json.first(), Some(&b'"'));
            assert_eq!(json.last(), Some(&b'"'));

            let mut decoded = BinaryRef::default();
            decoded.unmarshal_json(&json).unwrap();
            assert_eq!(decoded, br);
        }
    }

    #[test]
    fn test_json_decode_rejects_blob() {
        let json = serde_json::to_vec(&BlobRef::new([1; 32]).to_string()).unwrap();
        let mut br = BinaryRef::default();
        assert!(matches!(
            br.unmarshal_json(&json),
            Err(RefError::UnsupportedReferenceType(_))
        ));
        assert!(matches!(br.unmarshal_json(b"42"), Err(RefError::Json(_))));
    }

    #[test]
    fn test_serde_json_uses_ref_string() {
        let br = BinaryRef::Feed(FeedRef::gabby([0x11; 32]));
        let json = serde_json::to_string(&br).unwrap();
        assert_eq!(json, format!("\"{}\"", br.ref_string()));

        let back: BinaryRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, br);
    }

    #[test]
    fn test_serde_cbor_uses_wire_bytes() {
        let br = BinaryRef::Content(ContentRef::gabby([0x33; 32]));
        let mut buf = Vec::new();
        ciborium::into_writer(&br, &mut buf).unwrap();

        // 0x58 0x21: byte string of length 33
        assert_eq!(&buf[..2], &[0x58, 0x21]);
        assert_eq!(&buf[2..], &br.marshal_binary().unwrap());

        let back: BinaryRef = ciborium::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back, br);
    }

    #[test]
    fn test_serialize_undefined_fails() {
        assert!(serde_json::to_string(&BinaryRef::Undefined).is_err());
    }
}
