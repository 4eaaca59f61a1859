// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Instrumented in-memory artifact store for testing without filesystem I/O.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use strata_store::{ArtifactStore, StoreError};

/// In-memory [`ArtifactStore`] that tests can tamper with.
///
/// Beyond plain storage it tracks call counts, fails on demand per
/// operation, and can plant one extra artifact immediately after the next
/// successful write. Planting is how tests race a dataset's post-save
/// consistency check without threads: the planted artifact appears between
/// the write and the re-resolution that follows it.
///
/// `Clone` shares state, so a test can hold one handle while the code under
/// test holds another.
///
/// # Example
///
/// ```
/// use strata_dry_tests::TamperStore;
/// use strata_store::ArtifactStore;
///
/// let store = TamperStore::new();
/// store.write_bytes("data/a.bin", b"payload").unwrap();
/// assert_eq!(store.write_count(), 1);
/// assert_eq!(store.read_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct TamperStore {
    inner: Arc<Mutex<TamperStoreInner>>,
}

#[derive(Default)]
struct TamperStoreInner {
    data: BTreeMap<String, Vec<u8>>,
    read_count: usize,
    write_count: usize,
    list_count: usize,
    fail_on_read: bool,
    fail_on_write: bool,
    fail_on_list: bool,
    plant_after_write: Option<(String, Vec<u8>)>,
}

impl TamperStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given path-bytes pairs.
    #[must_use]
    pub fn with_data(data: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TamperStoreInner {
                data,
                ..Default::default()
            })),
        }
    }

    /// Configure the store to fail on `read_bytes` calls.
    pub fn set_fail_on_read(&self, fail: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.fail_on_read = fail;
    }

    /// Configure the store to fail on `write_bytes` calls.
    pub fn set_fail_on_write(&self, fail: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.fail_on_write = fail;
    }

    /// Configure the store to fail on `list_children` calls.
    pub fn set_fail_on_list(&self, fail: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.fail_on_list = fail;
    }

    /// Plant `bytes` at `path` immediately after the next successful write.
    ///
    /// One-shot: the plant is consumed by that write. Only one plant can be
    /// pending; setting another replaces it.
    pub fn plant_after_write(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.plant_after_write = Some((path.into(), bytes.into()));
    }

    /// Number of `read_bytes` calls (attempted, not successful).
    ///
    /// Incremented at the start of each call, before any failure checks.
    pub fn read_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .read_count
    }

    /// Number of `write_bytes` calls (attempted, not successful).
    pub fn write_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .write_count
    }

    /// Number of `list_children` calls (attempted, not successful).
    pub fn list_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .list_count
    }

    /// All stored paths, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .data
            .keys()
            .cloned()
            .collect()
    }

    /// Whether an artifact is stored at exactly `path`.
    pub fn contains_key(&self, path: &str) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .data
            .contains_key(path)
    }

    /// Reset the store to its initial empty state: data, counters, failure
    /// flags, and any pending plant.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.data.clear();
        inner.read_count = 0;
        inner.write_count = 0;
        inner.list_count = 0;
        inner.fail_on_read = false;
        inner.fail_on_write = false;
        inner.fail_on_list = false;
        inner.plant_after_write = None;
    }
}

impl ArtifactStore for TamperStore {
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.read_count += 1;

        if inner.fail_on_read {
            return Err(StoreError::Backend {
                path: path.to_string(),
                message: "simulated read failure".to_string(),
            });
        }

        inner
            .data
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }

    fn write_bytes(&self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.write_count += 1;

        if inner.fail_on_write {
            return Err(StoreError::Backend {
                path: path.to_string(),
                message: "simulated write failure".to_string(),
            });
        }

        inner.data.insert(path.to_string(), bytes.to_vec());
        if let Some((planted_path, planted_bytes)) = inner.plant_after_write.take() {
            inner.data.insert(planted_path, planted_bytes);
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.data.contains_key(path) {
            return Ok(true);
        }
        let prefix = format!("{path}/");
        Ok(inner.data.keys().any(|key| key.starts_with(&prefix)))
    }

    fn list_children(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.list_count += 1;

        if inner.fail_on_list {
            return Err(StoreError::Backend {
                path: dir.to_string(),
                message: "simulated list failure".to_string(),
            });
        }

        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };
        let mut children: Vec<String> = Vec::new();
        for key in inner.data.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            let name = rest.split('/').next().unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            children.push(name.to_string());
        }
        // Map order is over whole keys, not first segments; sort the names.
        children.sort();
        children.dedup();
        Ok(children)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ── 1. storage semantics match the port contract ────────────────────

    #[test]
    fn round_trip_and_counters() {
        let store = TamperStore::new();
        store.write_bytes("data/a.bin", b"hello").unwrap();
        assert_eq!(store.read_bytes("data/a.bin").unwrap(), b"hello");
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.read_count(), 1);
        assert_eq!(store.list_count(), 0);
    }

    #[test]
    fn missing_read_is_not_found_and_still_counted() {
        let store = TamperStore::new();
        let err = store.read_bytes("absent").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.read_count(), 1);
    }

    #[test]
    fn listing_is_sorted_and_distinct() {
        let store = TamperStore::new();
        store.write_bytes("base/v2/x", b"").unwrap();
        store.write_bytes("base/v1/x", b"").unwrap();
        store.write_bytes("base/v1/y", b"").unwrap();
        assert_eq!(store.list_children("base").unwrap(), vec!["v1", "v2"]);
        assert_eq!(store.list_children("other").unwrap(), Vec::<String>::new());

        // Key order diverges from name order when one child name prefixes
        // another ("v1-a" keys sort below "v1" keys, '-' < '/').
        store.write_bytes("base/v1-a/x", b"").unwrap();
        assert_eq!(
            store.list_children("base").unwrap(),
            vec!["v1", "v1-a", "v2"]
        );
    }

    // ── 2. failure injection ────────────────────────────────────────────

    #[test]
    fn fail_flags_produce_backend_errors() {
        let store = TamperStore::new();
        store.write_bytes("data/a.bin", b"hello").unwrap();

        store.set_fail_on_read(true);
        assert!(matches!(
            store.read_bytes("data/a.bin"),
            Err(StoreError::Backend { .. })
        ));

        store.set_fail_on_read(false);
        store.set_fail_on_write(true);
        assert!(matches!(
            store.write_bytes("data/b.bin", b""),
            Err(StoreError::Backend { .. })
        ));

        store.set_fail_on_write(false);
        store.set_fail_on_list(true);
        assert!(matches!(
            store.list_children("data"),
            Err(StoreError::Backend { .. })
        ));
    }

    // ── 3. planting fires once, after the next write ────────────────────

    #[test]
    fn plant_after_write_is_one_shot() {
        let store = TamperStore::new();
        store.plant_after_write("base/intruder", b"!".to_vec());

        assert!(!store.contains_key("base/intruder"));
        store.write_bytes("base/real", b"payload").unwrap();
        assert!(store.contains_key("base/intruder"));

        store.write_bytes("base/later", b"more").unwrap();
        assert_eq!(
            store.keys(),
            vec!["base/intruder", "base/later", "base/real"]
        );
    }

    // ── 4. reset restores the initial state ─────────────────────────────

    #[test]
    fn reset_clears_everything() {
        let store = TamperStore::new();
        store.write_bytes("a", b"1").unwrap();
        store.set_fail_on_read(true);
        store.plant_after_write("b", b"2".to_vec());

        store.reset();
        assert!(store.keys().is_empty());
        assert_eq!(store.write_count(), 0);
        assert!(matches!(
            store.read_bytes("a"),
            Err(StoreError::NotFound { .. })
        ));
    }
}
