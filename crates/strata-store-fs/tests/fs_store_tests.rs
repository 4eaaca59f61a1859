// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Full-stack dataset tests over the filesystem backend.
//!
//! These tests verify:
//! - the on-disk layout `<root>/<base>/<token>/<name>` as real directories
//! - durability: a second store handle on the same root sees prior saves
//! - unversioned datasets writing the logical path as a plain file
//! - dataset paths never resolving outside the store root

use std::fs;
use std::path::Path;

use strata_codec::JsonCodec;
use strata_core::{VersionSpec, VersionedDataset};
use strata_dry_tests::SampleRecord;
use strata_store_fs::FsStore;

const BASE: &str = "data/records.json";

fn store_at(root: &Path) -> FsStore {
    FsStore::new(root.join("artifacts")).unwrap_or_else(|err| panic!("store root: {err}"))
}

fn dataset_on(
    store: FsStore,
    version: Option<VersionSpec>,
) -> VersionedDataset<JsonCodec<SampleRecord>, FsStore> {
    VersionedDataset::new(BASE, version, JsonCodec::new(), store)
        .unwrap_or_else(|err| panic!("valid dataset config: {err}"))
}

/// Names of the entries directly under `dir`, sorted.
fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("read_dir {}: {err}", dir.display()))
        .map(|entry| {
            entry
                .unwrap_or_else(|err| panic!("dir entry: {err}"))
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[test]
fn versioned_save_creates_the_on_disk_layout() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let store = store_at(dir.path());
    let dataset = dataset_on(store, Some(VersionSpec::latest()));

    dataset
        .save(&SampleRecord::numbered(1))
        .unwrap_or_else(|err| panic!("save: {err}"));

    let container = dir.path().join("artifacts").join(BASE);
    let versions = dir_entries(&container);
    assert_eq!(versions.len(), 1, "one version dir: {versions:?}");
    assert_eq!(versions[0].len(), 27, "token-shaped dir name");

    let version_dir = container.join(&versions[0]);
    assert_eq!(dir_entries(&version_dir), vec!["records.json"]);
    assert!(version_dir.join("records.json").is_file());
}

#[test]
fn a_second_handle_on_the_same_root_sees_saves() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let original = SampleRecord::numbered(4);

    let writer = dataset_on(store_at(dir.path()), Some(VersionSpec::latest()));
    writer
        .save(&original)
        .unwrap_or_else(|err| panic!("save: {err}"));

    let reader = dataset_on(store_at(dir.path()), Some(VersionSpec::latest()));
    assert_eq!(
        reader.load().unwrap_or_else(|err| panic!("load: {err}")),
        original
    );
}

#[test]
fn repeated_saves_accumulate_versions_and_load_returns_the_latest() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let store = store_at(dir.path());
    let dataset = dataset_on(store, Some(VersionSpec::latest()));

    dataset
        .save(&SampleRecord::numbered(1))
        .unwrap_or_else(|err| panic!("first save: {err}"));
    dataset
        .save(&SampleRecord::numbered(2))
        .unwrap_or_else(|err| panic!("second save: {err}"));

    let container = dir.path().join("artifacts").join(BASE);
    assert_eq!(dir_entries(&container).len(), 2);
    assert_eq!(
        dataset.load().unwrap_or_else(|err| panic!("load: {err}")),
        SampleRecord::numbered(2)
    );
}

#[test]
fn exists_tracks_the_on_disk_lifecycle() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let dataset = dataset_on(store_at(dir.path()), Some(VersionSpec::latest()));

    assert!(!dataset.exists().unwrap_or_else(|err| panic!("{err}")));
    dataset
        .save(&SampleRecord::numbered(1))
        .unwrap_or_else(|err| panic!("save: {err}"));
    assert!(dataset.exists().unwrap_or_else(|err| panic!("{err}")));
}

#[test]
fn unversioned_dataset_writes_a_plain_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let dataset = dataset_on(store_at(dir.path()), None);

    dataset
        .save(&SampleRecord::numbered(1))
        .unwrap_or_else(|err| panic!("save: {err}"));
    dataset
        .save(&SampleRecord::numbered(2))
        .unwrap_or_else(|err| panic!("overwrite: {err}"));

    let file = dir.path().join("artifacts").join(BASE);
    assert!(file.is_file());
    assert_eq!(
        dataset.load().unwrap_or_else(|err| panic!("load: {err}")),
        SampleRecord::numbered(2)
    );
}

#[test]
fn dataset_paths_cannot_leave_the_store_root() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let store = store_at(dir.path());

    // `../escaped.txt` would resolve to a sibling of the store root.
    let result =
        VersionedDataset::new("../escaped.txt", None, JsonCodec::<SampleRecord>::new(), store);
    assert!(result.is_err(), "traversal path must not configure");
    assert!(!dir.path().join("escaped.txt").exists());
}
