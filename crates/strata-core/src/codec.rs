// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Payload codec port.
//!
//! Serialization is deliberately separated from the versioning core: the
//! dataset moves opaque bytes, and a [`Codec`] turns typed payloads into
//! those bytes and back. Concrete adapters (JSON, CBOR) live in
//! `strata-codec` so the core stays free of format dependencies.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors from encoding or decoding a payload.
///
/// The underlying format error is boxed and preserved as the source, so
/// "which byte went wrong" survives up through the dataset error chain.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload could not be encoded.
    #[error("encode failed: {source}")]
    Encode {
        /// The underlying format error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The bytes were not a valid encoding of the payload type.
    #[error("decode failed: {source}")]
    Decode {
        /// The underlying format error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CodecError {
    /// Wrap an encoder failure.
    pub fn encode(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Encode {
            source: source.into(),
        }
    }

    /// Wrap a decoder failure.
    pub fn decode(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Decode {
            source: source.into(),
        }
    }
}

/// Encodes and decodes one payload type.
///
/// Implementations must be pure and deterministic: no I/O, and no ambient
/// state (time, randomness, global mutable config) consulted during encode
/// or decode.
pub trait Codec {
    /// The typed payload this codec carries.
    type Payload;

    /// Short stable name for descriptions and logs (e.g. `"json"`).
    fn name(&self) -> &'static str;

    /// Encode `payload` into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if the payload cannot be represented.
    fn encode(&self, payload: &Self::Payload) -> Result<Vec<u8>, CodecError>;

    /// Decode `bytes` strictly into a payload.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] if `bytes` is not a valid encoding.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Payload, CodecError>;

    /// Codec configuration for description output, sorted by key.
    fn options(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}
