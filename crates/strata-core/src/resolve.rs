// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Version resolution: logical path + version spec → concrete storage paths.

use strata_store::{ArtifactStore, StoreError};

use crate::path::{LogicalPath, ResolvedPath};
use crate::token::{VersionSpec, VersionToken};

/// Outcome of resolving the load side of a versioned dataset.
///
/// "No versions yet" is an expected state — `exists()` maps it to plain
/// `false` — so it is a value here rather than an error. Callers that do
/// require a version (`load()`) convert [`NoVersions`](Self::NoVersions)
/// into their own failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResolution {
    /// A concrete version was selected.
    Found(ResolvedPath),
    /// The dataset has no complete versions.
    NoVersions,
}

/// A save target fixed for the duration of one save operation.
///
/// Produced by [`PathResolver::resolve_for_save`]; the token and path stay
/// coupled so a save can never write under one token and report another.
#[derive(Debug, Clone)]
pub struct ResolvedSave {
    /// The token the artifact is being saved under.
    pub token: VersionToken,
    /// The concrete path the artifact is being written to.
    pub path: ResolvedPath,
}

/// Derives concrete storage paths for one dataset's versions.
///
/// Layout: the logical path itself is the version container, and the final
/// component repeats beneath each token folder:
///
/// ```text
/// data/records.json/2026-08-24T12.30.59.000042Z/records.json
/// └── base ───────┘ └── token ─────────────────┘ └── name ──┘
/// ```
///
/// Listing `<base>/` therefore enumerates version folders directly, which is
/// all unpinned resolution needs from the backend.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base: LogicalPath,
}

impl PathResolver {
    /// Create a resolver for `base`.
    #[must_use]
    pub fn new(base: LogicalPath) -> Self {
        Self { base }
    }

    /// The logical path this resolver derives versions of.
    #[must_use]
    pub fn base(&self) -> &LogicalPath {
        &self.base
    }

    /// The concrete path of the version named by `token`.
    #[must_use]
    pub fn versioned_path(&self, token: &VersionToken) -> ResolvedPath {
        ResolvedPath::new(format!(
            "{}/{}/{}",
            self.base.as_str(),
            token,
            self.base.name()
        ))
    }

    /// Resolve the load side of `spec` against `store`.
    ///
    /// A pinned load token resolves structurally, with no backend consult.
    /// Unpinned resolution lists the version container fresh on every call
    /// and selects the greatest token whose artifact actually exists;
    /// folders missing the expected artifact (a crashed writer's leftovers)
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from listing or probing the backend.
    pub fn resolve_for_load<S>(
        &self,
        spec: &VersionSpec,
        store: &S,
    ) -> Result<LoadResolution, StoreError>
    where
        S: ArtifactStore + ?Sized,
    {
        if let Some(token) = &spec.load {
            return Ok(LoadResolution::Found(self.versioned_path(token)));
        }
        let children = store.list_children(self.base.as_str())?;
        for name in children.iter().rev() {
            let Ok(token) = VersionToken::new(name.clone()) else {
                // Non-token clutter in the container.
                continue;
            };
            let path = self.versioned_path(&token);
            if store.exists(path.as_str())? {
                return Ok(LoadResolution::Found(path));
            }
        }
        Ok(LoadResolution::NoVersions)
    }

    /// Resolve the save side of `spec`: the pinned token, or a freshly
    /// generated one.
    ///
    /// Pure — no backend consult. Callers hold the returned value for the
    /// whole save so the operation targets exactly one path.
    #[must_use]
    pub fn resolve_for_save(&self, spec: &VersionSpec) -> ResolvedSave {
        let token = spec.save.clone().unwrap_or_else(VersionToken::generate);
        let path = self.versioned_path(&token);
        ResolvedSave { token, path }
    }

    /// Enumerate the complete versions of this dataset, ascending.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from listing or probing the backend.
    pub fn list_versions<S>(&self, store: &S) -> Result<Vec<VersionToken>, StoreError>
    where
        S: ArtifactStore + ?Sized,
    {
        let mut versions = Vec::new();
        for name in store.list_children(self.base.as_str())? {
            let Ok(token) = VersionToken::new(name) else {
                continue;
            };
            if store.exists(self.versioned_path(&token).as_str())? {
                versions.push(token);
            }
        }
        Ok(versions)
    }
}
