//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use gabbygrove_codec::{ContentHeader, ContentType, Event, RefCodec};
use gabbygrove_refs::{content_ref_for, BinaryRef, FeedRef, Keypair, MessageRef};

/// A test fixture owning one feed.
pub struct TestFixture {
    pub keypair: Keypair,
    pub codec: RefCodec,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            codec: RefCodec::default(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            codec: RefCodec::default(),
        }
    }

    pub fn feed_ref(&self) -> FeedRef {
        self.keypair.feed_ref()
    }

    /// Create the first event of the feed.
    pub fn make_first_event(&self, content: &[u8]) -> Event {
        self.make_event(1, None, ContentType::Json, content)
    }

    /// Create an event following `prev`.
    pub fn make_next_event(&self, seq: u64, prev: MessageRef, content: &[u8]) -> Event {
        self.make_event(seq, Some(prev), ContentType::Json, content)
    }

    /// Create an event with full control over the header.
    pub fn make_event(
        &self,
        seq: u64,
        prev: Option<MessageRef>,
        kind: ContentType,
        content: &[u8],
    ) -> Event {
        let size = u16::try_from(content.len()).expect("fixture content fits in u16");
        Event {
            previous: prev.map(BinaryRef::Message),
            author: self.keypair.binary_ref(),
            sequence: seq,
            timestamp: now_millis(),
            content: ContentHeader {
                hash: BinaryRef::Content(content_ref_for(content)),
                size,
                kind,
            },
        }
    }

    /// Build a feed with one event per content item.
    pub fn make_chain(&self, contents: &[&[u8]]) -> Vec<Event> {
        let mut events: Vec<Event> = Vec::with_capacity(contents.len());
        for (i, content) in contents.iter().enumerate() {
            let event = match events.last() {
                None => self.make_first_event(content),
                Some(prev) => {
                    let prev_ref = prev.message_ref(&self.codec).expect("fixture event encodes");
                    self.make_next_event(i as u64 + 1, prev_ref, content)
                }
            };
            events.push(event);
        }
        events
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
