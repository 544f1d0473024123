//! Round-trip encoders used as duplication mechanisms
//!
//! A [`Codec`] turns a graph into a blob and back. [`RoundTrip`] composes the
//! two into a clone: decoding always allocates fresh nodes, so the result
//! never shares structure with the source.
//!
//! The blob formats are a vehicle for duplication only, not an interchange
//! contract.

pub mod binary;
pub mod text;

pub use binary::BinaryCodec;
pub use text::{JsonText, JsonTree};

use crate::error::{CloneError, CloneResult};
use crate::reflect::Kind;
use crate::strategy::CloneStrategy;

/// An encode/decode pair over graphs rooted at `T`
pub trait Codec<T> {
    /// Intermediate representation produced by `encode`
    type Blob;

    fn encode(&self, source: &T) -> CloneResult<Self::Blob>;

    fn decode(&self, blob: Self::Blob) -> CloneResult<T>;
}

/// Reject kinds that have not opted in to encoding
pub(crate) fn require_encodable(kind: &Kind) -> CloneResult<()> {
    if kind.encodable {
        Ok(())
    } else {
        Err(CloneError::NotEligibleForEncoding {
            kind: kind.name.to_string(),
        })
    }
}

/// Clone strategy that duplicates through a codec: `decode(encode(source))`
pub struct RoundTrip<C> {
    name: String,
    codec: C,
}

impl<C> RoundTrip<C> {
    pub fn new(name: impl Into<String>, codec: C) -> Self {
        Self {
            name: name.into(),
            codec,
        }
    }
}

impl<T, C: Codec<T>> CloneStrategy<T> for RoundTrip<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn clone_graph(&mut self, source: &T) -> CloneResult<T> {
        let blob = self.codec.encode(source)?;
        self.codec.decode(blob)
    }
}
