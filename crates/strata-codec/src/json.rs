// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON codec over `serde_json`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use strata_core::{Codec, CodecError};

/// JSON codec for any serde-serializable payload.
///
/// Compact by default; [`JsonCodec::pretty`] emits indented output for
/// artifacts meant to be read by humans. Pretty and compact bytes differ
/// but decode identically, so the flag is a rendering choice, not a schema
/// one.
pub struct JsonCodec<T> {
    pretty: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    /// Compact (single-line) JSON.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            _marker: PhantomData,
        }
    }

    /// Indented JSON.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self {
            pretty: self.pretty,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCodec")
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl<T> Codec for JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Payload = T;

    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, payload: &T) -> Result<Vec<u8>, CodecError> {
        if self.pretty {
            serde_json::to_vec_pretty(payload).map_err(CodecError::encode)
        } else {
            serde_json::to_vec(payload).map_err(CodecError::encode)
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::decode)
    }

    fn options(&self) -> std::collections::BTreeMap<String, String> {
        std::collections::BTreeMap::from([("pretty".to_string(), self.pretty.to_string())])
    }
}
