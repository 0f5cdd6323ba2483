//! Integration tests for photo loading and the model store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use fitsize_adapters::models::sha256_hex;
use fitsize_adapters::{load_photo, DownloadEvent, ModelSource, ModelStore, MODELS};
use fitsize_core::{Error, ViewSide};
use fitsize_test_support::SyntheticImageBuilder;

// === Photo loading ===

#[test]
fn test_load_png_keeps_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("front.png");
    let raw = SyntheticImageBuilder::silhouette_png(40, 80);
    std::fs::write(&path, raw.as_bytes()).unwrap();

    let loaded = load_photo(&path, ViewSide::Front).unwrap();

    assert_eq!(loaded, raw);
}

#[test]
fn test_load_jpeg_uppercase_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SIDE.JPG");
    let raw = SyntheticImageBuilder::silhouette_jpeg(40, 80);
    std::fs::write(&path, raw.as_bytes()).unwrap();

    assert_eq!(load_photo(&path, ViewSide::Side).unwrap().len(), raw.len());
}

#[test]
fn test_wrong_extension_rejected_before_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("side.webp");

    // The file does not exist; the type check must fire first.
    let err = load_photo(&path, ViewSide::Side).unwrap_err();
    let err = err.downcast_ref::<Error>().expect("typed validation error");

    assert!(err.is_validation());
    assert!(err.to_string().contains("side_image"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_photo(&dir.path().join("front.png"), ViewSide::Front).unwrap_err();

    assert!(err.downcast_ref::<Error>().is_none());
    assert!(err.to_string().contains("front image"));
}

// === Model store ===

#[test]
fn test_empty_store_lists_missing_models() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new(dir.path());

    let status = store.list();

    assert_eq!(status.len(), MODELS.len());
    assert!(status.iter().all(|s| !s.installed));
    assert!(!store.all_installed());
}

#[test]
fn test_ensure_skips_installed_models_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new(dir.path());
    for model in MODELS {
        std::fs::write(store.path(model), b"weights").unwrap();
    }
    // Unroutable source: any download attempt would fail.
    let source = ModelSource::new("http://127.0.0.1:9").with_checksums(BTreeMap::from([(
        "segmentation".to_string(),
        sha256_hex(b"weights"),
    )]));

    let mut events = Vec::new();
    store.ensure(&source, false, |e| events.push(e)).unwrap();

    assert!(store.all_installed());
    assert_eq!(
        events,
        MODELS
            .iter()
            .map(|m| DownloadEvent::Skipped { name: m.name })
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_ensure_reports_download_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new(dir.path().join("nested"));

    let result = store.ensure(&ModelSource::new("http://127.0.0.1:9"), false, |_| {});

    assert!(result.is_err());
    assert!(store.dir().is_dir(), "directory is created before downloading");
}
