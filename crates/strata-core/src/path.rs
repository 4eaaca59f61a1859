// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Logical and resolved dataset paths.
//!
//! Two string newtypes keep "what the pipeline calls the dataset" and "where
//! one operation actually reads or writes" from mixing: a [`LogicalPath`] is
//! user-supplied and immutable for the dataset's lifetime, while a
//! [`ResolvedPath`] is derived per operation and only ever flows toward the
//! storage backend.

use std::fmt;

use thiserror::Error;

/// Errors from constructing a [`LogicalPath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path was empty.
    #[error("logical path is empty")]
    Empty,

    /// Path began with `/`. Store paths are relative to the backend root;
    /// an absolute path would escape it.
    #[error("logical path {path:?} is absolute; store paths are backend-relative")]
    Absolute {
        /// The rejected path text.
        path: String,
    },

    /// Path ended with `/`; the final component must name the artifact.
    #[error("logical path {path:?} ends with a path separator")]
    TrailingSeparator {
        /// The rejected path text.
        path: String,
    },

    /// Path contained an empty component (`a//b`).
    #[error("logical path {path:?} contains an empty component")]
    EmptyComponent {
        /// The rejected path text.
        path: String,
    },

    /// Path contained a `.` or `..` component. Traversal steps could resolve
    /// outside the backend root, so they never validate.
    #[error("logical path {path:?} contains a traversal component")]
    Traversal {
        /// The rejected path text.
        path: String,
    },
}

/// User-facing identifier for a dataset, independent of version.
///
/// A `/`-separated, backend-relative path whose final component names the
/// artifact (`pipelines/daily/records.json`). Validated at construction and
/// never mutated afterwards; the versioning layer derives concrete
/// [`ResolvedPath`]s from it instead of rewriting it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Validate `path` as a logical dataset path.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if `path` is empty, starts with `/`, ends
    /// with `/`, or contains an empty, `.`, or `..` component.
    pub fn new(path: impl Into<String>) -> Result<Self, PathError> {
        let path = path.into();
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.starts_with('/') {
            return Err(PathError::Absolute { path });
        }
        if path.ends_with('/') {
            return Err(PathError::TrailingSeparator { path });
        }
        if path.split('/').any(str::is_empty) {
            return Err(PathError::EmptyComponent { path });
        }
        // Backends join these paths beneath their root verbatim, so a `..`
        // component would resolve outside it.
        if path.split('/').any(|c| c == "." || c == "..") {
            return Err(PathError::Traversal { path });
        }
        Ok(Self(path))
    }

    /// View the path text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final path component — the artifact name repeated beneath each
    /// version folder.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Everything before the final component, if the path has more than one
    /// component.
    #[must_use]
    pub fn dir(&self) -> Option<&str> {
        self.0.rfind('/').map(|idx| &self.0[..idx])
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concrete storage path derived from a logical path, a version token, and
/// the operation being performed.
///
/// Recomputed on every operation, never cached across calls — holding one
/// pins a single operation's target, nothing more.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    pub(crate) fn new(path: String) -> Self {
        Self(path)
    }

    /// View the path text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner path string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
