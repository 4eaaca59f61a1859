// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory artifact store.
//!
//! [`MemoryStore`] is the reference `ArtifactStore` implementation — object-store
//! semantics over a `BTreeMap`, suitable for tests and single-process pipelines.
//! Durable backends live in `strata-store-fs`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::{ArtifactStore, StoreError};

/// In-memory artifact store over a sorted key map.
///
/// Keys are full relative paths; containers exist only as key prefixes. The
/// map lives behind `Arc<Mutex<_>>` so `Clone` shares state — two handles to
/// the same store see each other's writes, which is how a pipeline shares one
/// backend across several datasets.
///
/// `BTreeMap` keeps the key set sorted, but key order is over whole paths,
/// not their first segments: `a!b/x` sorts before `a/x` because `!` sorts
/// below `/`. Listings therefore sort the extracted child names themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of artifacts currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns `true` if no artifacts are stored.
    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }

    /// All stored paths, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}

// Container prefix for child listings: `""` lists the root.
fn child_prefix(dir: &str) -> String {
    if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}/")
    }
}

impl ArtifactStore for MemoryStore {
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let data = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        data.get(path).cloned().ok_or_else(|| StoreError::NotFound {
            path: path.to_string(),
        })
    }

    fn write_bytes(&self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut data = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        data.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let data = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if data.contains_key(path) {
            return Ok(true);
        }
        let prefix = format!("{path}/");
        Ok(data.keys().any(|key| key.starts_with(&prefix)))
    }

    fn list_children(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let prefix = child_prefix(dir);
        let data = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut children: Vec<String> = Vec::new();
        for key in data.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            let name = rest.split('/').next().unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            children.push(name.to_string());
        }
        // Key order does not transfer to first segments when one child name
        // prefixes another, so the names need their own sort before dedup.
        children.sort();
        children.dedup();
        Ok(children)
    }
}
