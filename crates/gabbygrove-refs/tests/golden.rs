//! Golden wire vectors for binary references.
//!
//! Every implementation of Gabby Grove must produce identical:
//! - 33-byte binary reference (hex)
//! - canonical reference string

use gabbygrove_refs::{
    BinaryRef, ContentRef, FeedRef, MessageRef, Ref, RefAlgo, RefError, RefType, BINREF_SIZE,
};
use proptest::prelude::*;

struct GoldenVector {
    name: &'static str,
    reference: BinaryRef,
    binary: &'static str,
    ref_string: &'static str,
}

fn counting() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = i as u8;
    }
    bytes
}

fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "zero_feed",
            reference: BinaryRef::Feed(FeedRef::gabby([0x00; 32])),
            binary: "010000000000000000000000000000000000000000000000000000000000000000",
            ref_string: "@AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=.ggfeed-v1",
        },
        GoldenVector {
            name: "counting_message",
            reference: BinaryRef::Message(MessageRef::gabby(counting())),
            binary: "02000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
            ref_string: "%AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=.ggmsg-v1",
        },
        GoldenVector {
            name: "saturated_content",
            reference: BinaryRef::Content(ContentRef::gabby([0xff; 32])),
            binary: "03ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            ref_string: "!//////////////////////////////////////////8=.gabby-v1-content",
        },
    ]
}

#[test]
fn test_vectors_encode() {
    for v in all_vectors() {
        let bytes = v.reference.marshal_binary().unwrap();
        assert_eq!(hex::encode(bytes), v.binary, "binary mismatch for {}", v.name);
        assert_eq!(v.reference.ref_string(), v.ref_string, "string mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_decode() {
    for v in all_vectors() {
        let bytes = hex::decode(v.binary).unwrap();
        let decoded = BinaryRef::from_binary(&bytes).unwrap();
        assert_eq!(decoded, v.reference, "binary decode mismatch for {}", v.name);

        let parsed: BinaryRef = v.ref_string.parse().unwrap();
        assert_eq!(parsed, v.reference, "string parse mismatch for {}", v.name);
    }
}

#[test]
fn test_binary_and_string_forms_agree() {
    // binary -> typed ref -> string -> typed ref -> binary
    for v in all_vectors() {
        let bytes = hex::decode(v.binary).unwrap();
        let decoded = BinaryRef::from_binary(&bytes).unwrap();
        let r = decoded.get_ref(decoded.validate()).unwrap();

        let reparsed: Ref = r.to_string().parse().unwrap();
        let back = BinaryRef::from_ref(reparsed).unwrap();
        assert_eq!(hex::encode(back.marshal_binary().unwrap()), v.binary);
    }
}

// =============================================================================
// REJECTION TEST VECTORS
// These test that invalid inputs are properly rejected.
// =============================================================================

#[test]
fn test_reject_wrong_lengths() {
    for len in [0usize, 1, 32, 34, 100] {
        let data = vec![0x02u8; len];
        let mut br = BinaryRef::default();
        assert!(
            matches!(
                br.unmarshal_binary(&data),
                Err(RefError::InvalidLength { expected: BINREF_SIZE, got }) if got == len
            ),
            "must reject length {len}"
        );
    }
}

#[test]
fn test_reject_unknown_discriminants() {
    for first in [0x00u8, 0x04, 0xff] {
        let mut data = hex::decode(all_vectors()[0].binary).unwrap();
        data[0] = first;
        assert!(
            matches!(BinaryRef::from_binary(&data), Err(RefError::UnknownDiscriminant(b)) if b == first),
            "must reject discriminant {first:#04x}"
        );
    }
}

#[test]
fn test_reject_non_gabby_content_on_encode() {
    let br = BinaryRef::from(ContentRef::new([0x01; 32], RefAlgo::MessageSsb1));
    assert!(
        matches!(br.marshal_binary(), Err(RefError::UnsupportedContentAlgorithm(_))),
        "must reject non-gabby content"
    );
}

#[test]
fn test_decoded_feed_and_message_use_gabby_algorithms() {
    let classic = BinaryRef::Feed(FeedRef::from_bytes(&[9; 32], RefAlgo::FeedSsb1).unwrap());
    let bytes = classic.marshal_binary().unwrap();
    let decoded = BinaryRef::from_binary(&bytes).unwrap();

    assert_eq!(decoded.validate(), RefType::Feed);
    assert_eq!(decoded.as_feed().map(|f| f.algo()), Some(RefAlgo::FeedGabby));
    assert_eq!(decoded.as_feed().map(|f| *f.pub_key()), Some([9; 32]));
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn defined_ref() -> impl Strategy<Value = BinaryRef> {
    (0u8..3, any::<[u8; 32]>()).prop_map(|(kind, bytes)| match kind {
        0 => BinaryRef::Feed(FeedRef::gabby(bytes)),
        1 => BinaryRef::Message(MessageRef::gabby(bytes)),
        _ => BinaryRef::Content(ContentRef::gabby(bytes)),
    })
}

proptest! {
    #[test]
    fn binary_roundtrip(br in defined_ref()) {
        let bytes = br.marshal_binary().unwrap();
        prop_assert_eq!(BinaryRef::from_binary(&bytes).unwrap(), br);
    }

    #[test]
    fn string_roundtrip(br in defined_ref()) {
        let parsed: BinaryRef = br.ref_string().parse().unwrap();
        prop_assert_eq!(parsed, br);
    }

    #[test]
    fn decode_accepts_only_known_discriminants(data in prop::collection::vec(any::<u8>(), 33)) {
        let decoded = BinaryRef::from_binary(&data);
        prop_assert_eq!(decoded.is_ok(), (1..=3).contains(&data[0]));
    }
}
