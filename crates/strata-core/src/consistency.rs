// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Post-save round-trip consistency checking.
//!
//! After a versioned save, the dataset re-resolves its load side and
//! verifies the result lands on the artifact just written — "what you save
//! is what you next load". Store paths are backend-relative strings, so the
//! comparison normalizes lexically rather than consulting the filesystem.

use crate::error::DatasetError;
use crate::path::{LogicalPath, ResolvedPath};

/// Lexically normalize a backend-relative path.
///
/// Collapses duplicate separators, drops `.` components, and resolves `..`
/// against the component before it; a leading run of `..` is preserved since
/// there is nothing to resolve it against.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|prev| *prev != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// Verify that a save's write target and its re-resolved load target are the
/// same artifact.
///
/// # Errors
///
/// Returns [`DatasetError::VersionConsistency`] naming both paths when the
/// normalized paths differ.
pub fn check_round_trip(
    base: &LogicalPath,
    save_path: &ResolvedPath,
    load_path: &ResolvedPath,
) -> Result<(), DatasetError> {
    if normalize_path(save_path.as_str()) == normalize_path(load_path.as_str()) {
        Ok(())
    } else {
        Err(DatasetError::VersionConsistency {
            base_path: base.as_str().to_string(),
            save_path: save_path.as_str().to_string(),
            load_path: load_path.as_str().to_string(),
        })
    }
}
