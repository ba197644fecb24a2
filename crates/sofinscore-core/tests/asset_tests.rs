use sofinscore_core::model::bundle::{CLASSIFIER_FILE, SCALER_FILE};
use sofinscore_core::model::{load_assets, AssetCache};
use sofinscore_core::ScoringError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Fresh scratch directory holding a copy of the fixture artifacts.
/// Removed when the returned guard drops.
fn scratch_dir() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    for file in [CLASSIFIER_FILE, SCALER_FILE] {
        fs::copy(fixtures_dir().join(file), tmp.path().join(file)).unwrap();
    }
    tmp
}

fn expect_asset_error(dir: &Path, expected_file: &str, needle: &str) {
    match load_assets(dir).unwrap_err() {
        ScoringError::AssetLoad { path, reason } => {
            assert!(path.ends_with(expected_file), "path={}", path.display());
            assert!(reason.contains(needle), "reason={reason}");
        }
        other => panic!("expected AssetLoad, got {other}"),
    }
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn test_fixture_assets_load() {
    let bundle = load_assets(fixtures_dir()).unwrap();
    assert_eq!(bundle.classifier.n_trees(), 2);
    assert_eq!(bundle.scaler.mean.len(), 5);
    assert_eq!(bundle.source, fixtures_dir());
}

#[test]
fn test_missing_directory_is_asset_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("models");
    let err = load_assets(dir).unwrap_err();
    assert!(err.is_asset_failure());
    assert!(err.to_string().contains(CLASSIFIER_FILE));
}

#[test]
fn test_missing_scaler_is_asset_failure() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    fs::remove_file(dir.join(SCALER_FILE)).unwrap();
    let err = load_assets(dir).unwrap_err();
    assert!(err.is_asset_failure());
    assert!(err.to_string().contains(SCALER_FILE));
}

#[test]
fn test_corrupt_classifier_is_asset_failure() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    fs::write(dir.join(CLASSIFIER_FILE), b"\x80\x04\x95 not json").unwrap();
    expect_asset_error(dir, CLASSIFIER_FILE, "unreadable artifact");
}

#[test]
fn test_scaler_width_mismatch_is_asset_failure() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    fs::write(
        dir.join(SCALER_FILE),
        r#"{"mean": [0, 0, 0, 0], "scale": [1, 1, 1, 1]}"#,
    )
    .unwrap();
    expect_asset_error(dir, SCALER_FILE, "expects 5 features");
}

#[test]
fn test_classifier_feature_count_mismatch_is_asset_failure() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    let model = fs::read_to_string(dir.join(CLASSIFIER_FILE))
        .unwrap()
        .replace("\"n_features\": 5", "\"n_features\": 6");
    fs::write(dir.join(CLASSIFIER_FILE), model).unwrap();
    expect_asset_error(dir, CLASSIFIER_FILE, "6 features");
}

// ===========================================================================
// Cache
// ===========================================================================

#[test]
fn test_cache_loads_once() {
    let cache = AssetCache::new();
    assert!(cache.get().is_none());
    let first = cache.get_or_load(fixtures_dir()).unwrap();
    let second = cache.get_or_load(fixtures_dir()).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(cache.get().is_some());
}

#[test]
fn test_cache_keeps_first_bundle_after_files_vanish() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    let cache = AssetCache::new();
    cache.get_or_load(dir).unwrap();
    fs::remove_dir_all(dir).unwrap();
    assert!(cache.get_or_load(dir).is_ok());
}

#[test]
fn test_failed_load_is_not_cached() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    fs::remove_file(dir.join(SCALER_FILE)).unwrap();
    let cache = AssetCache::new();
    assert!(cache.get_or_load(dir).is_err());
    assert!(cache.get().is_none());

    fs::copy(fixtures_dir().join(SCALER_FILE), dir.join(SCALER_FILE)).unwrap();
    assert!(cache.get_or_load(dir).is_ok());
}
