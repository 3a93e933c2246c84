//! Codec configuration.

/// CBOR tag wrapping binary references by default.
pub const DEFAULT_BINREF_TAG: u64 = 1;

/// Configuration for [`RefCodec`](crate::RefCodec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// CBOR tag number wrapping each encoded binary reference.
    pub binref_tag: u64,
    /// Whether bare 33-byte byte strings (no tag) are accepted on decode.
    /// Encoding always writes the tag.
    pub accept_untagged: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            binref_tag: DEFAULT_BINREF_TAG,
            accept_untagged: false,
        }
    }
}

impl CodecConfig {
    /// Use a different tag number for binary references.
    pub fn with_binref_tag(mut self, tag: u64) -> Self {
        self.binref_tag = tag;
        self
    }

    /// Accept or reject untagged byte strings on decode.
    pub fn accept_untagged(mut self, accept: bool) -> Self {
        self.accept_untagged = accept;
        self
    }
}
