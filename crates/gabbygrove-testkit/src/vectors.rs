//! Golden test vectors for deterministic verification.
//!
//! Reference vectors pin the 33-byte binary form, the canonical string and
//! the tagged CBOR encoding. Event vectors pin the full CBOR encoding of an
//! event header and the message reference derived from it.

use gabbygrove_codec::{ContentHeader, ContentType, Event, RefCodec};
use gabbygrove_refs::{content_ref_for, BinaryRef, ContentRef, FeedRef, MessageRef, RefType};

/// A golden binary reference.
#[derive(Debug, Clone)]
pub struct RefVector {
    pub name: &'static str,
    pub kind: RefType,
    /// The 32 payload bytes (key or hash).
    pub payload: [u8; 32],
    /// Expected 33-byte binary form (hex).
    pub binary: &'static str,
    pub ref_string: &'static str,
    /// Expected tagged CBOR encoding with the default tag (hex).
    pub cbor: &'static str,
}

impl RefVector {
    /// Build the reference this vector describes.
    pub fn binary_ref(&self) -> BinaryRef {
        match self.kind {
            RefType::Feed => BinaryRef::Feed(FeedRef::gabby(self.payload)),
            RefType::Message => BinaryRef::Message(MessageRef::gabby(self.payload)),
            RefType::Content => BinaryRef::Content(ContentRef::gabby(self.payload)),
            RefType::Undefined => BinaryRef::Undefined,
        }
    }
}

/// A golden event header.
#[derive(Debug, Clone)]
pub struct EventVector {
    pub name: &'static str,
    /// Raw author key.
    pub author: [u8; 32],
    /// Hash of the previous event, if any.
    pub previous: Option<&'static str>,
    pub sequence: u64,
    pub timestamp: i64,
    pub content: &'static [u8],
    pub content_type: ContentType,
    /// Expected CBOR encoding (hex).
    pub expected_cbor: &'static str,
    /// Expected message reference hash (hex).
    pub expected_message_ref: &'static str,
}

/// Get all golden reference vectors.
pub fn ref_vectors() -> Vec<RefVector> {
    vec![
        RefVector {
            name: "feed with repeated key byte",
            kind: RefType::Feed,
            payload: [0x11; 32],
            binary: "011111111111111111111111111111111111111111111111111111111111111111",
            ref_string: "@ERERERERERERERERERERERERERERERERERERERERERE=.ggfeed-v1",
            cbor: "c15821011111111111111111111111111111111111111111111111111111111111111111",
        },
        RefVector {
            name: "zero message",
            kind: RefType::Message,
            payload: [0x00; 32],
            binary: "020000000000000000000000000000000000000000000000000000000000000000",
            ref_string: "%AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=.ggmsg-v1",
            cbor: "c15821020000000000000000000000000000000000000000000000000000000000000000",
        },
        RefVector {
            name: "saturated content",
            kind: RefType::Content,
            payload: [0xff; 32],
            binary: "03ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            ref_string: "!//////////////////////////////////////////8=.gabby-v1-content",
            cbor: "c1582103ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        },
    ]
}

/// Get all golden event vectors.
pub fn event_vectors() -> Vec<EventVector> {
    vec![
        EventVector {
            name: "first event with json content",
            author: [0x11; 32],
            previous: None,
            sequence: 1,
            timestamp: 1736870400000, // 2025-01-14T16:00:00Z
            content: br#"{"type":"post","text":"hello"}"#,
            content_type: ContentType::Json,
            expected_cbor: concat!(
                "85f6c1582101111111111111111111111111111111111111111111111111111111",
                "1111111111011b00000194658b100083c1582103fa5906f0471289d655058bce0f",
                "3acebb0b0f5795d6649394ac6b0467052401ea181e01",
            ),
            expected_message_ref: "6b580e3365691253edd1726d43eb7e6f4a9c8ef9bd14d0964f63176524f5b055",
        },
        EventVector {
            name: "second event chained to the first",
            author: [0x11; 32],
            previous: Some("6b580e3365691253edd1726d43eb7e6f4a9c8ef9bd14d0964f63176524f5b055"),
            sequence: 2,
            timestamp: 1736870401000,
            content: b"world",
            content_type: ContentType::Unknown,
            expected_cbor: concat!(
                "85c15821026b580e3365691253edd1726d43eb7e6f4a9c8ef9bd14d0964f631765",
                "24f5b055c158210111111111111111111111111111111111111111111111111111",
                "11111111111111021b00000194658b13e883c1582103486ea46224d1bb4fb680f3",
                "4f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a70500",
            ),
            expected_message_ref: "4455f89d985c163a7b833d7a038f8d1b4ac99154dae54151e247011deb8c3bff",
        },
        EventVector {
            name: "empty cbor content at epoch",
            author: [0x00; 32],
            previous: None,
            sequence: 1,
            timestamp: 0,
            content: b"",
            content_type: ContentType::Cbor,
            expected_cbor: concat!(
                "85f6c1582101000000000000000000000000000000000000000000000000000000",
                "0000000000010083c1582103e3b0c44298fc1c149afbf4c8996fb92427ae41e464",
                "9b934ca495991b7852b8550002",
            ),
            expected_message_ref: "29b5c5423f696445bc7d3a5428b6efd95cd9fa034b2411246568ecf4e23612fb",
        },
    ]
}

fn hash_from_hex(s: &str) -> [u8; 32] {
    let bytes = hex::decode(s).expect("vector hash must be hex");
    bytes.try_into().expect("vector hash must be 32 bytes")
}

/// Build the event a vector describes.
pub fn event_from_vector(vector: &EventVector) -> Event {
    let size = u16::try_from(vector.content.len()).expect("vector content fits in u16");
    Event {
        previous: vector
            .previous
            .map(|h| BinaryRef::Message(MessageRef::gabby(hash_from_hex(h)))),
        author: BinaryRef::Feed(FeedRef::gabby(vector.author)),
        sequence: vector.sequence,
        timestamp: vector.timestamp,
        content: ContentHeader {
            hash: BinaryRef::Content(content_ref_for(vector.content)),
            size,
            kind: vector.content_type,
        },
    }
}

/// Verify all golden vectors against the default codec.
///
/// Returns `(name, matches, what we produced)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let codec = RefCodec::default();

    let refs = ref_vectors().into_iter().map(|v| {
        let produced = v
            .binary_ref()
            .marshal_binary()
            .map(hex::encode)
            .unwrap_or_default();
        let cbor = codec
            .encode(&v.binary_ref())
            .map(hex::encode)
            .unwrap_or_default();
        let matches = produced == v.binary
            && cbor == v.cbor
            && v.binary_ref().ref_string() == v.ref_string;
        (v.name.to_string(), matches, produced)
    });

    let events = event_vectors().into_iter().map(|v| {
        let event = event_from_vector(&v);
        let cbor = event.encode(&codec).map(hex::encode).unwrap_or_default();
        let msg = event
            .message_ref(&codec)
            .map(|m| hex::encode(m.hash()))
            .unwrap_or_default();
        let matches = cbor == v.expected_cbor && msg == v.expected_message_ref;
        (v.name.to_string(), matches, cbor)
    });

    refs.chain(events).collect()
}
