// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Versioned dataset orchestration.
//!
//! [`VersionedDataset`] is the pipeline-facing composition: a logical path,
//! an optional version pin, a codec, and a storage backend, wired into
//! `load`/`save`/`exists`/`describe` with reproducible version resolution.
//! All resolution and checking delegates to [`resolve`](crate::resolve) and
//! [`consistency`](crate::consistency); this module owns only the operation
//! ordering and the error context.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use strata_store::{ArtifactStore, StoreError};

use crate::codec::{Codec, CodecError};
use crate::consistency::check_round_trip;
use crate::error::DatasetError;
use crate::path::{LogicalPath, ResolvedPath};
use crate::resolve::{LoadResolution, PathResolver};
use crate::token::VersionSpec;

/// A dataset whose persisted snapshots are addressed by version tokens.
///
/// The dataset is in one of two states, fixed at construction:
///
/// - **Unversioned** (`version == None`): every operation targets the
///   logical path directly and saves overwrite in place.
/// - **Versioned**: operations target `<base>/<token>/<name>`, past versions
///   are immutable, and every save is followed by a round-trip consistency
///   check.
///
/// Operations take `&self` and the backend is `Send + Sync`, so independent
/// dataset instances can share one backend across pipeline workers.
#[derive(Debug)]
pub struct VersionedDataset<C, S> {
    resolver: PathResolver,
    version: Option<VersionSpec>,
    codec: C,
    store: S,
}

impl<C, S> VersionedDataset<C, S> {
    /// Create a dataset over `store`, encoding payloads with `codec`.
    ///
    /// Structural validation happens here, not at call time: an invalid
    /// `base_path` never produces a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidConfig`] if `base_path` is empty,
    /// absolute, ends with a separator, or contains an empty, `.`, or `..`
    /// component.
    pub fn new(
        base_path: impl Into<String>,
        version: Option<VersionSpec>,
        codec: C,
        store: S,
    ) -> Result<Self, DatasetError> {
        let base = LogicalPath::new(base_path)?;
        Ok(Self {
            resolver: PathResolver::new(base),
            version,
            codec,
            store,
        })
    }

    /// The dataset's logical path.
    pub fn base_path(&self) -> &LogicalPath {
        self.resolver.base()
    }

    /// The dataset's version spec; `None` for unversioned datasets.
    pub fn version(&self) -> Option<&VersionSpec> {
        self.version.as_ref()
    }

    /// Consume the dataset and return the backend store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<C, S> VersionedDataset<C, S>
where
    C: Codec,
    S: ArtifactStore,
{
    /// Load the payload this dataset's version spec selects.
    ///
    /// Unpinned versioned loads resolve to the most recent complete version
    /// with a fresh backend listing on every call; pinned loads go straight
    /// to the pinned token's path.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::NoVersionFound`] when an unpinned load finds no
    ///   complete versions.
    /// - [`DatasetError::Storage`] on backend failure — including reads of a
    ///   pinned version that does not exist.
    /// - [`DatasetError::Codec`] when the stored bytes do not decode.
    pub fn load(&self) -> Result<C::Payload, DatasetError> {
        let path = self.load_target()?;
        debug!(base = %self.base_path(), path = %path, "load resolved");
        let bytes = self
            .store
            .read_bytes(path.as_str())
            .map_err(|err| self.storage_error(err))?;
        self.codec
            .decode(&bytes)
            .map_err(|err| self.codec_error(err))
    }

    /// Save `payload` as a new version (or in place when unversioned).
    ///
    /// Versioned saves run four steps, in order:
    ///
    /// 1. Resolve the save target exactly once — the pinned token or a
    ///    freshly generated one — and hold it for the whole operation.
    /// 2. Refuse a target that already exists: saved versions are immutable
    ///    ([`DatasetError::VersionAlreadyExists`]).
    /// 3. Encode and write the artifact; the backend creates parent
    ///    containers.
    /// 4. Re-resolve the load side against a fresh listing and verify it
    ///    lands on the artifact just written
    ///    ([`DatasetError::VersionConsistency`] otherwise). A load token
    ///    pinned to some other version fails here: the dataset would not
    ///    read back what it just wrote.
    ///
    /// The written bytes are not removed when step 4 fails, and nothing is
    /// retried. Callers needing atomicity must layer it into the backend
    /// (write-to-temp-then-rename, or a transactional store). A writer
    /// racing this one between steps 3 and 4 can surface as a consistency
    /// failure.
    ///
    /// # Errors
    ///
    /// See the step list above, plus [`DatasetError::Storage`] and
    /// [`DatasetError::Codec`] for backend and encoding failures.
    pub fn save(&self, payload: &C::Payload) -> Result<(), DatasetError> {
        let Some(spec) = &self.version else {
            let bytes = self
                .codec
                .encode(payload)
                .map_err(|err| self.codec_error(err))?;
            return self
                .store
                .write_bytes(self.base_path().as_str(), &bytes)
                .map_err(|err| self.storage_error(err));
        };

        let target = self.resolver.resolve_for_save(spec);
        if self
            .store
            .exists(target.path.as_str())
            .map_err(|err| self.storage_error(err))?
        {
            return Err(DatasetError::VersionAlreadyExists {
                base_path: self.base_path().as_str().to_string(),
                path: target.path.into_string(),
            });
        }

        let bytes = self
            .codec
            .encode(payload)
            .map_err(|err| self.codec_error(err))?;
        self.store
            .write_bytes(target.path.as_str(), &bytes)
            .map_err(|err| self.storage_error(err))?;
        debug!(
            base = %self.base_path(),
            token = %target.token,
            path = %target.path,
            "version written"
        );

        let load_path = match self
            .resolver
            .resolve_for_load(spec, &self.store)
            .map_err(|err| self.storage_error(err))?
        {
            LoadResolution::Found(path) => path,
            LoadResolution::NoVersions => {
                return Err(DatasetError::NoVersionFound {
                    base_path: self.base_path().as_str().to_string(),
                })
            }
        };
        check_round_trip(self.resolver.base(), &target.path, &load_path)?;
        debug!(base = %self.base_path(), path = %target.path, "save consistency verified");
        Ok(())
    }

    /// Whether the version this dataset's spec selects exists.
    ///
    /// An unpinned dataset with no versions yet reports `false` — that is an
    /// expected state, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Storage`] on backend failure.
    pub fn exists(&self) -> Result<bool, DatasetError> {
        let Some(spec) = &self.version else {
            return self
                .store
                .exists(self.base_path().as_str())
                .map_err(|err| self.storage_error(err));
        };
        match self
            .resolver
            .resolve_for_load(spec, &self.store)
            .map_err(|err| self.storage_error(err))?
        {
            LoadResolution::NoVersions => Ok(false),
            LoadResolution::Found(path) => self
                .store
                .exists(path.as_str())
                .map_err(|err| self.storage_error(err)),
        }
    }

    /// Structural description of the dataset — pure, no backend I/O.
    pub fn describe(&self) -> DatasetDescription {
        DatasetDescription {
            base_path: self.base_path().as_str().to_string(),
            load_version: self
                .version
                .as_ref()
                .and_then(|spec| spec.load.as_ref())
                .map(|token| token.as_str().to_string()),
            save_version: self
                .version
                .as_ref()
                .and_then(|spec| spec.save.as_ref())
                .map(|token| token.as_str().to_string()),
            codec: self.codec.name().to_string(),
            codec_options: self.codec.options(),
        }
    }

    fn load_target(&self) -> Result<ResolvedPath, DatasetError> {
        let Some(spec) = &self.version else {
            return Ok(ResolvedPath::new(self.base_path().as_str().to_string()));
        };
        match self
            .resolver
            .resolve_for_load(spec, &self.store)
            .map_err(|err| self.storage_error(err))?
        {
            LoadResolution::Found(path) => Ok(path),
            LoadResolution::NoVersions => Err(DatasetError::NoVersionFound {
                base_path: self.base_path().as_str().to_string(),
            }),
        }
    }

    fn storage_error(&self, source: StoreError) -> DatasetError {
        DatasetError::Storage {
            base_path: self.base_path().as_str().to_string(),
            source,
        }
    }

    fn codec_error(&self, source: CodecError) -> DatasetError {
        DatasetError::Codec {
            base_path: self.base_path().as_str().to_string(),
            source,
        }
    }
}

impl<C, S> fmt::Display for VersionedDataset<C, S>
where
    C: Codec,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VersionedDataset({}, codec={})",
            self.resolver.base(),
            self.codec.name()
        )
    }
}

/// Stable, serializable description of a dataset's configuration.
///
/// Field order and the sorted options map keep rendered output deterministic
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetDescription {
    /// Logical path of the dataset.
    pub base_path: String,
    /// Pinned load token, if any.
    pub load_version: Option<String>,
    /// Pinned save token, if any.
    pub save_version: Option<String>,
    /// Codec name.
    pub codec: String,
    /// Codec configuration, sorted by key.
    pub codec_options: BTreeMap<String, String>,
}
