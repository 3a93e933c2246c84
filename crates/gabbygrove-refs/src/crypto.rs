//! Key and hash helpers for deriving references.
//!
//! Feeds are identified by Ed25519 public keys; messages and content by
//! SHA-256 hashes.

use ed25519_dalek::SigningKey;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::binref::BinaryRef;
use crate::refs::{ContentRef, FeedRef, MessageRef};

/// An Ed25519 keypair owning a feed.
///
/// This wraps ed25519-dalek's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The raw public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The Gabby Grove feed reference for this key.
    pub fn feed_ref(&self) -> FeedRef {
        FeedRef::gabby(self.public_key_bytes())
    }

    pub fn binary_ref(&self) -> BinaryRef {
        BinaryRef::Feed(self.feed_ref())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.feed_ref())
    }
}

fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Content reference for a payload: SHA-256 of the raw content bytes.
pub fn content_ref_for(payload: &[u8]) -> ContentRef {
    ContentRef::gabby(sha256(payload))
}

/// Message reference for an encoded event: SHA-256 of its bytes.
pub fn message_ref_for(encoded_event: &[u8]) -> MessageRef {
    MessageRef::gabby(sha256(encoded_event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.feed_ref(), kp2.feed_ref());
    }

    #[test]
    fn test_keypair_binary_ref_matches_public_key() {
        let kp = Keypair::generate();
        let from_pk = BinaryRef::from_public_key(&kp.public_key_bytes()).unwrap();
        assert_eq!(kp.binary_ref(), from_pk);
    }

    #[test]
    fn test_content_ref_for_known_hash() {
        // sha256("")
        let cr = content_ref_for(b"");
        assert_eq!(
            hex::encode(cr.hash()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hashes_differ_by_input() {
        assert_ne!(message_ref_for(b"a"), message_ref_for(b"b"));
        assert_ne!(content_ref_for(b"a").hash(), content_ref_for(b"b").hash());
    }
}
