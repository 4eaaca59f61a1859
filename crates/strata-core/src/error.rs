// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! User-facing dataset error taxonomy.

use thiserror::Error;

use strata_store::StoreError;

use crate::codec::CodecError;
use crate::path::PathError;
use crate::token::TokenError;

/// Errors surfaced by dataset operations.
///
/// Every variant carries the dataset's logical path, and the consistency
/// variant names both resolved paths, so a failure can be traced without
/// reproducing it. This layer never retries and never rolls back partial
/// writes.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset has no complete versions to load.
    ///
    /// Hard failure for `load()`; `exists()` reports this state as plain
    /// `false`.
    #[error("did not find any versions for {base_path}")]
    NoVersionFound {
        /// Logical path of the dataset.
        base_path: String,
    },

    /// The storage backend failed.
    #[error("storage failure for {base_path}: {source}")]
    Storage {
        /// Logical path of the dataset.
        base_path: String,
        /// The backend failure.
        #[source]
        source: StoreError,
    },

    /// Encoding or decoding the payload failed.
    #[error("codec failure for {base_path}: {source}")]
    Codec {
        /// Logical path of the dataset.
        base_path: String,
        /// The codec failure.
        #[source]
        source: CodecError,
    },

    /// After a save, the freshly re-resolved load path did not land on the
    /// artifact just written. The save is failed even though bytes were
    /// written.
    #[error("save path {save_path} did not match load path {load_path} for {base_path}")]
    VersionConsistency {
        /// Logical path of the dataset.
        base_path: String,
        /// The path the save wrote to.
        save_path: String,
        /// The path a subsequent load would read from.
        load_path: String,
    },

    /// A save targeted a version that already exists; saved versions are
    /// immutable.
    #[error("version already exists at {path} for {base_path}")]
    VersionAlreadyExists {
        /// Logical path of the dataset.
        base_path: String,
        /// The resolved save path that is already occupied.
        path: String,
    },

    /// The dataset was constructed with invalid structural configuration.
    #[error("invalid dataset configuration: {source}")]
    InvalidConfig {
        /// The validation failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<PathError> for DatasetError {
    fn from(source: PathError) -> Self {
        Self::InvalidConfig {
            source: Box::new(source),
        }
    }
}

impl From<TokenError> for DatasetError {
    fn from(source: TokenError) -> Self {
        Self::InvalidConfig {
            source: Box::new(source),
        }
    }
}
