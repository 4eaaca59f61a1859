// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CBOR codec over `ciborium`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use strata_core::{Codec, CodecError};

/// CBOR codec for any serde-serializable payload.
///
/// Binary and compact; the natural choice for large artifacts nobody reads
/// by hand.
pub struct CborCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> CborCodec<T> {
    /// Create the codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for CborCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CborCodec<T> {
    fn clone(&self) -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for CborCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CborCodec").finish()
    }
}

impl<T> Codec for CborCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Payload = T;

    fn name(&self) -> &'static str {
        "cbor"
    }

    fn encode(&self, payload: &T) -> Result<Vec<u8>, CodecError> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(payload, &mut bytes).map_err(CodecError::encode)?;
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        ciborium::de::from_reader(bytes).map_err(CodecError::decode)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: u32,
        label: String,
    }

    // ── 1. round trip ───────────────────────────────────────────────────

    #[test]
    fn round_trip() {
        let codec = CborCodec::<Sample>::new();
        let original = Sample {
            id: 7,
            label: "seven".to_string(),
        };
        let bytes = codec.encode(&original).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), original);
    }

    // ── 2. decode failure carries the ciborium cause ────────────────────

    #[test]
    fn decode_failure_is_typed_with_cause() {
        let codec = CborCodec::<Sample>::new();
        let err = codec.decode(&[0xff, 0xff]).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    // ── 3. payload shape is checked, not just syntax ────────────────────

    #[test]
    fn decoding_the_wrong_shape_fails() {
        let numbers = CborCodec::<u64>::new();
        let bytes = numbers.encode(&42).unwrap();

        let records = CborCodec::<Sample>::new();
        assert!(matches!(
            records.decode(&bytes),
            Err(CodecError::Decode { .. })
        ));
    }

    // ── 4. identity ─────────────────────────────────────────────────────

    #[test]
    fn name_and_default_options() {
        let codec = CborCodec::<Sample>::new();
        assert_eq!(codec.name(), "cbor");
        assert!(codec.options().is_empty());
    }
}
