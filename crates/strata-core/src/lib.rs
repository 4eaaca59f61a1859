// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! strata-core: versioned dataset resolution over pluggable storage.
//!
//! A [`VersionedDataset`] snapshots payloads under timestamp-derived
//! [`VersionToken`]s instead of overwriting one path. Each version lives at
//!
//! ```text
//! <base_path>/<token>/<basename>
//! ```
//!
//! so the logical path doubles as the version container, listing it
//! enumerates versions, and lexicographic token order equals temporal order.
//! Load resolution, save-target selection, and the post-save round-trip
//! consistency check live in dedicated modules; storage and serialization
//! are ports ([`strata_store::ArtifactStore`], [`Codec`]) so the same
//! dataset logic runs over memory, disk, or anything else.
//!
//! Resolution decisions are traced at `debug` level via `tracing`; with no
//! subscriber installed they cost a branch.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod codec;
mod consistency;
mod dataset;
mod error;
mod path;
mod resolve;
mod token;

// Re-exports for stable public API
/// Serialization port and its error.
pub use codec::{Codec, CodecError};
/// Post-save round-trip checking and the lexical normalization it relies on.
pub use consistency::{check_round_trip, normalize_path};
/// The pipeline-facing dataset and its structural description.
pub use dataset::{DatasetDescription, VersionedDataset};
/// Unified error taxonomy for dataset operations.
pub use error::DatasetError;
/// Validated logical paths and the concrete paths resolved from them.
pub use path::{LogicalPath, PathError, ResolvedPath};
/// Version-to-path resolution primitives.
pub use resolve::{LoadResolution, PathResolver, ResolvedSave};
/// Version tokens, generation, and load/save pinning.
pub use token::{TokenError, VersionSpec, VersionToken};
