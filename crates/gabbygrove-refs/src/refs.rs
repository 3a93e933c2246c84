//! Typed references: feeds, messages, content and blobs.
//!
//! Every reference wraps exactly 32 bytes plus the algorithm that produced
//! them. The canonical string form is `<sigil><base64>.<algo>`, e.g.
//! `@AAAA...AAA=.ggfeed-v1`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;

use crate::error::{RefError, Result};

/// Length of every raw reference payload (public key or hash).
pub const REF_LEN: usize = 32;

/// Leading byte of a gabby [`ContentRef`] in its own binary form.
pub const CONTENT_GABBY_TAG: u8 = 0x02;

/// Length of a [`ContentRef`] in its own binary form.
pub const CONTENT_BINARY_LEN: usize = 1 + REF_LEN;

/// Reference sigils.
mod sigil {
    pub const FEED: char = '@';
    pub const MESSAGE: char = '%';
    pub const CONTENT: char = '!';
    pub const BLOB: char = '&';
}

/// The algorithm suffix of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefAlgo {
    /// Classic ed25519 feed.
    FeedSsb1,
    /// Gabby Grove feed.
    FeedGabby,
    /// Classic sha256 message.
    MessageSsb1,
    /// Gabby Grove message.
    MessageGabby,
    /// Gabby Grove content hash. The only content algorithm with a binary form.
    ContentGabby,
    /// Classic sha256 blob.
    BlobSsb1,
}

impl RefAlgo {
    /// All known algorithms.
    pub const ALL: [RefAlgo; 6] = [
        RefAlgo::FeedSsb1,
        RefAlgo::FeedGabby,
        RefAlgo::MessageSsb1,
        RefAlgo::MessageGabby,
        RefAlgo::ContentGabby,
        RefAlgo::BlobSsb1,
    ];

    /// The suffix used in the string form.
    pub fn as_str(self) -> &'static str {
        match self {
            RefAlgo::FeedSsb1 => "ed25519",
            RefAlgo::FeedGabby => "ggfeed-v1",
            RefAlgo::MessageSsb1 => "sha256",
            RefAlgo::MessageGabby => "ggmsg-v1",
            RefAlgo::ContentGabby => "gabby-v1-content",
            RefAlgo::BlobSsb1 => "sha256",
        }
    }

    fn sigil(self) -> char {
        match self {
            RefAlgo::FeedSsb1 | RefAlgo::FeedGabby => sigil::FEED,
            RefAlgo::MessageSsb1 | RefAlgo::MessageGabby => sigil::MESSAGE,
            RefAlgo::ContentGabby => sigil::CONTENT,
            RefAlgo::BlobSsb1 => sigil::BLOB,
        }
    }

    /// Check if this algorithm identifies feeds.
    pub fn is_feed(self) -> bool {
        self.sigil() == sigil::FEED
    }

    /// Check if this algorithm identifies messages.
    pub fn is_message(self) -> bool {
        self.sigil() == sigil::MESSAGE
    }

    /// Resolve a suffix in the context of a sigil.
    ///
    /// `sha256` is ambiguous on its own, so the sigil decides.
    fn parse(sig: char, suffix: &str) -> Result<Self> {
        let mut known = Self::ALL.iter().filter(|a| a.as_str() == suffix).peekable();
        let first = match known.peek() {
            Some(algo) => **algo,
            None => return Err(RefError::UnknownAlgorithm(suffix.to_string())),
        };
        known
            .find(|a| a.sigil() == sig)
            .copied()
            .ok_or(RefError::AlgorithmMismatch {
                kind: kind_for_sigil(sig),
                algo: first,
            })
    }
}

impl fmt::Display for RefAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn kind_for_sigil(sig: char) -> &'static str {
    match sig {
        sigil::FEED => "feed",
        sigil::MESSAGE => "message",
        sigil::CONTENT => "content",
        _ => "blob",
    }
}

/// Copy exactly [`REF_LEN`] bytes out of a slice.
fn ref_bytes(bytes: &[u8]) -> Result<[u8; REF_LEN]> {
    bytes.try_into().map_err(|_| RefError::InvalidLength {
        expected: REF_LEN,
        got: bytes.len(),
    })
}

fn write_ref(f: &mut fmt::Formatter<'_>, sig: char, bytes: &[u8], algo: RefAlgo) -> fmt::Result {
    write!(f, "{}{}.{}", sig, STANDARD.encode(bytes), algo)
}

/// A reference to a feed, derived from its public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedRef {
    id: [u8; REF_LEN],
    algo: RefAlgo,
}

impl FeedRef {
    /// Parse a feed reference from 32 raw public key bytes.
    pub fn from_bytes(bytes: &[u8], algo: RefAlgo) -> Result<Self> {
        if !algo.is_feed() {
            return Err(RefError::AlgorithmMismatch { kind: "feed", algo });
        }
        Ok(Self {
            id: ref_bytes(bytes)?,
            algo,
        })
    }

    /// A Gabby Grove feed reference for the given public key.
    pub const fn gabby(id: [u8; REF_LEN]) -> Self {
        Self {
            id,
            algo: RefAlgo::FeedGabby,
        }
    }

    /// The raw public key.
    pub const fn pub_key(&self) -> &[u8; REF_LEN] {
        &self.id
    }

    pub fn algo(&self) -> RefAlgo {
        self.algo
    }
}

impl fmt::Display for FeedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ref(f, sigil::FEED, &self.id, self.algo)
    }
}

impl fmt::Debug for FeedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedRef({}.{})", &hex::encode(self.id)[..16], self.algo)
    }
}

/// A reference to a single message in a feed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    hash: [u8; REF_LEN],
    algo: RefAlgo,
}

impl MessageRef {
    /// Parse a message reference from 32 raw hash bytes.
    pub fn from_bytes(bytes: &[u8], algo: RefAlgo) -> Result<Self> {
        if !algo.is_message() {
            return Err(RefError::AlgorithmMismatch {
                kind: "message",
                algo,
            });
        }
        Ok(Self {
            hash: ref_bytes(bytes)?,
            algo,
        })
    }

    /// A Gabby Grove message reference for the given hash.
    pub const fn gabby(hash: [u8; REF_LEN]) -> Self {
        Self {
            hash,
            algo: RefAlgo::MessageGabby,
        }
    }

    pub const fn hash(&self) -> &[u8; REF_LEN] {
        &self.hash
    }

    /// Copy the hash into `dst`, which must be exactly 32 bytes long.
    pub fn copy_hash_to(&self, dst: &mut [u8]) -> Result<()> {
        if dst.len() != REF_LEN {
            return Err(RefError::InvalidLength {
                expected: REF_LEN,
                got: dst.len(),
            });
        }
        dst.copy_from_slice(&self.hash);
        Ok(())
    }

    pub fn algo(&self) -> RefAlgo {
        self.algo
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ref(f, sigil::MESSAGE, &self.hash, self.algo)
    }
}

impl fmt::Debug for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageRef({}.{})", &hex::encode(self.hash)[..16], self.algo)
    }
}

/// A reference to the content (payload) of a message.
///
/// The algorithm is not restricted on construction; only
/// [`RefAlgo::ContentGabby`] has a binary form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentRef {
    hash: [u8; REF_LEN],
    algo: RefAlgo,
}

impl ContentRef {
    pub const fn new(hash: [u8; REF_LEN], algo: RefAlgo) -> Self {
        Self { hash, algo }
    }

    /// A Gabby Grove content reference for the given hash.
    pub const fn gabby(hash: [u8; REF_LEN]) -> Self {
        Self::new(hash, RefAlgo::ContentGabby)
    }

    pub const fn hash(&self) -> &[u8; REF_LEN] {
        &self.hash
    }

    pub fn algo(&self) -> RefAlgo {
        self.algo
    }

    /// Encode as `[0x02] ++ hash`.
    pub fn marshal_binary(&self) -> Result<[u8; CONTENT_BINARY_LEN]> {
        if self.algo != RefAlgo::ContentGabby {
            return Err(RefError::UnsupportedContentAlgorithm(self.algo));
        }
        let mut out = [0u8; CONTENT_BINARY_LEN];
        out[0] = CONTENT_GABBY_TAG;
        out[1..].copy_from_slice(&self.hash);
        Ok(out)
    }

    /// Decode the `[tag] ++ hash` form produced by [`marshal_binary`](Self::marshal_binary).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        if data.len() != CONTENT_BINARY_LEN {
            return Err(RefError::InvalidLength {
                expected: CONTENT_BINARY_LEN,
                got: data.len(),
            });
        }
        let algo = match data[0] {
            CONTENT_GABBY_TAG => RefAlgo::ContentGabby,
            other => return Err(RefError::UnknownDiscriminant(other)),
        };
        Ok(Self {
            hash: ref_bytes(&data[1..])?,
            algo,
        })
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ref(f, sigil::CONTENT, &self.hash, self.algo)
    }
}

impl fmt::Debug for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentRef({}.{})", &hex::encode(self.hash)[..16], self.algo)
    }
}

/// A reference to a blob. Has no binary reference form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobRef {
    hash: [u8; REF_LEN],
}

impl BlobRef {
    pub const fn new(hash: [u8; REF_LEN]) -> Self {
        Self { hash }
    }

    pub const fn hash(&self) -> &[u8; REF_LEN] {
        &self.hash
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ref(f, sigil::BLOB, &self.hash, RefAlgo::BlobSsb1)
    }
}

impl fmt::Debug for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobRef({})", &hex::encode(self.hash)[..16])
    }
}

/// Any reference the protocol knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ref {
    Feed(FeedRef),
    Message(MessageRef),
    Content(ContentRef),
    Blob(BlobRef),
}

impl Ref {
    /// Short name of the reference kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Ref::Feed(_) => "feed",
            Ref::Message(_) => "message",
            Ref::Content(_) => "content",
            Ref::Blob(_) => "blob",
        }
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ref::Feed(r) => fmt::Display::fmt(r, f),
            Ref::Message(r) => fmt::Display::fmt(r, f),
            Ref::Content(r) => fmt::Display::fmt(r, f),
            Ref::Blob(r) => fmt::Display::fmt(r, f),
        }
    }
}

impl FromStr for Ref {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self> {
        let sig = s
            .chars()
            .next()
            .ok_or_else(|| RefError::MalformedRef("empty reference".into()))?;
        let (encoded, suffix) = s[sig.len_utf8()..]
            .split_once('.')
            .ok_or_else(|| RefError::MalformedRef(format!("missing algorithm suffix: {s}")))?;

        if !matches!(sig, sigil::FEED | sigil::MESSAGE | sigil::CONTENT | sigil::BLOB) {
            return Err(RefError::InvalidSigil(sig));
        }
        let algo = RefAlgo::parse(sig, suffix)?;
        let raw = STANDARD.decode(encoded)?;
        let bytes = ref_bytes(&raw)?;

        let parsed = match sig {
            sigil::FEED => Ref::Feed(FeedRef::from_bytes(&bytes, algo)?),
            sigil::MESSAGE => Ref::Message(MessageRef::from_bytes(&bytes, algo)?),
            sigil::CONTENT => Ref::Content(ContentRef::new(bytes, algo)),
            _ => Ref::Blob(BlobRef::new(bytes)),
        };
        Ok(parsed)
    }
}

impl From<FeedRef> for Ref {
    fn from(r: FeedRef) -> Self {
        Ref::Feed(r)
    }
}

impl From<MessageRef> for Ref {
    fn from(r: MessageRef) -> Self {
        Ref::Message(r)
    }
}

impl From<ContentRef> for Ref {
    fn from(r: ContentRef) -> Self {
        Ref::Content(r)
    }
}

impl From<BlobRef> for Ref {
    fn from(r: BlobRef) -> Self {
        Ref::Blob(r)
    }
}
