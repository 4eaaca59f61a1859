// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serde-backed JSON and CBOR codecs for Strata datasets.
//!
//! This crate provides:
//! - [`JsonCodec`] for human-readable artifacts (compact or pretty)
//! - [`CborCodec`] for compact binary artifacts
//!
//! # Design
//!
//! Serialization formats are deliberately separated from the dataset core.
//! strata-core defines the `Codec` port and nothing else; this crate pulls
//! in `serde_json` and `ciborium` so dataset logic never depends on a wire
//! format.

mod cbor;
mod json;

pub use cbor::*;
pub use json::*;
