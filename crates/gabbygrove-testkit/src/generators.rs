//! Proptest generators for property-based testing.

use proptest::prelude::*;

use gabbygrove_codec::{ContentHeader, ContentType, Event};
use gabbygrove_refs::{
    content_ref_for, BinaryRef, ContentRef, FeedRef, Keypair, MessageRef, RefAlgo,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a feed reference in the gabby format.
pub fn feed_ref() -> impl Strategy<Value = FeedRef> {
    any::<[u8; 32]>().prop_map(FeedRef::gabby)
}

/// Generate a feed reference in either feed format.
pub fn any_feed_ref() -> impl Strategy<Value = FeedRef> {
    (any::<[u8; 32]>(), prop_oneof![Just(RefAlgo::FeedSsb1), Just(RefAlgo::FeedGabby)])
        .prop_map(|(key, algo)| FeedRef::from_bytes(&key, algo).expect("feed algorithm"))
}

pub fn message_ref() -> impl Strategy<Value = MessageRef> {
    any::<[u8; 32]>().prop_map(MessageRef::gabby)
}

pub fn content_ref() -> impl Strategy<Value = ContentRef> {
    any::<[u8; 32]>().prop_map(ContentRef::gabby)
}

/// Generate a defined binary reference of any kind.
pub fn binary_ref() -> impl Strategy<Value = BinaryRef> {
    prop_oneof![
        feed_ref().prop_map(BinaryRef::Feed),
        message_ref().prop_map(BinaryRef::Message),
        content_ref().prop_map(BinaryRef::Content),
    ]
}

/// Generate a list of defined binary references.
pub fn binary_refs(max_len: usize) -> impl Strategy<Value = Vec<BinaryRef>> {
    prop::collection::vec(binary_ref(), 0..=max_len)
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

pub fn content_type() -> impl Strategy<Value = ContentType> {
    prop_oneof![
        Just(ContentType::Unknown),
        Just(ContentType::Json),
        Just(ContentType::Cbor),
    ]
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for generating an event header.
#[derive(Debug, Clone)]
pub struct EventParams {
    pub keypair: Keypair,
    pub sequence: u64,
    pub timestamp: i64,
    pub content: Vec<u8>,
    pub content_type: ContentType,
    /// Hash of the previous event; ignored when sequence = 1.
    pub previous: [u8; 32],
}

impl Arbitrary for EventParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // seed
            1u64..=1000u64,    // sequence
            timestamp(),
            payload(1000),
            content_type(),
            any::<[u8; 32]>(),
        )
            .prop_map(|(seed, sequence, ts, content, kind, prev)| EventParams {
                keypair: Keypair::from_seed(&seed),
                sequence,
                timestamp: ts,
                content,
                content_type: kind,
                previous: prev,
            })
            .boxed()
    }
}

/// Generate a valid event from parameters.
pub fn event_from_params(params: &EventParams) -> Event {
    let previous = (params.sequence > 1)
        .then(|| BinaryRef::Message(MessageRef::gabby(params.previous)));
    let size = u16::try_from(params.content.len()).expect("generated content fits in u16");

    Event {
        previous,
        author: params.keypair.binary_ref(),
        sequence: params.sequence,
        timestamp: params.timestamp,
        content: ContentHeader {
            hash: BinaryRef::Content(content_ref_for(&params.content)),
            size,
            kind: params.content_type,
        },
    }
}
