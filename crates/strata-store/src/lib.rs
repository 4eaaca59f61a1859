// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Byte-level artifact storage port for Strata.
//!
//! `strata-store` defines the [`ArtifactStore`] trait that the versioning core
//! (`strata-core`) resolves paths against. Backends store opaque byte blobs
//! keyed by `/`-separated relative paths; "directories" are implied by path
//! prefixes and need not exist as first-class objects (object-store
//! semantics). [`MemoryStore`] ships here as the reference implementation;
//! the filesystem adapter lives in `strata-store-fs`.
//!
//! # Absence Semantics
//!
//! The two read-side operations treat absence differently, and both contracts
//! are load-bearing for version resolution:
//!
//! - [`read_bytes`](ArtifactStore::read_bytes) on a missing path is an
//!   **error** ([`StoreError::NotFound`]) — readers asked for a specific
//!   artifact and it was not there.
//! - [`list_children`](ArtifactStore::list_children) on an absent container
//!   returns **`Ok(vec![])`** — an unversioned-yet dataset has no container,
//!   and that is an expected state, not a failure.
//!
//! # Determinism
//!
//! [`list_children`](ArtifactStore::list_children) returns names in sorted
//! order. Version resolution scans listings in order; unsorted backends would
//! make "most recent version" depend on backend iteration order.
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
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod memory;
pub use memory::MemoryStore;

/// Errors that can occur during backend storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No artifact exists at the requested path.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was requested but not present.
        path: String,
    },

    /// An I/O failure from the underlying medium.
    #[error("io error at {path}: {source}")]
    Io {
        /// The path the operation was addressing when it failed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A backend-specific failure that is not plain I/O (quota, simulated
    /// faults in test doubles, remote service errors).
    #[error("backend error at {path}: {message}")]
    Backend {
        /// The path the operation was addressing when it failed.
        path: String,
        /// Backend-provided description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Returns the path the failed operation was addressing.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Backend { path, .. } => path,
        }
    }
}

/// Storage backend for opaque byte artifacts keyed by relative paths.
///
/// Paths are `/`-separated strings relative to the backend's root. Writers
/// never pre-create containers: [`write_bytes`](ArtifactStore::write_bytes)
/// materializes any parents it needs. All methods take `&self` so one backend
/// can be shared across pipeline workers; implementations must be
/// `Send + Sync`.
pub trait ArtifactStore: Send + Sync {
    /// Read the full artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no artifact exists at `path`, or
    /// [`StoreError::Io`]/[`StoreError::Backend`] on backend failure.
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>, StoreError>;

    /// Write `bytes` as the artifact at `path`, creating parent containers
    /// as needed. Overwrites any existing artifact at `path` — overwrite
    /// *policy* belongs to the caller, not the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`]/[`StoreError::Backend`] on backend failure.
    fn write_bytes(&self, path: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Check whether anything exists at `path` — an artifact, or a container
    /// implied by artifacts stored beneath `path/`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`]/[`StoreError::Backend`] on backend failure.
    fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// List the immediate child names under the container `dir`, sorted.
    ///
    /// An absent container yields `Ok(vec![])` — see the module docs on
    /// absence semantics.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`]/[`StoreError::Backend`] on backend failure.
    fn list_children(&self, dir: &str) -> Result<Vec<String>, StoreError>;
}
