use std::path::Path;

use devpair::{load_config_or_default, resolve_dump_dir};
use devpair_core::FallbackPolicy;
use tempfile::tempdir;

#[test]
fn resolve_dump_dir_defaults_to_debug_dumps() {
    assert_eq!(resolve_dump_dir(None), Path::new("debug_dumps"));
    assert_eq!(resolve_dump_dir(Some("/tmp/dumps")), Path::new("/tmp/dumps"));
}

#[test]
fn load_config_or_default_applies_wait_override() {
    let config = load_config_or_default(None, Some(0)).expect("defaults");
    assert_eq!(config.wait_ms, 0);
    assert_eq!(config.fallback, FallbackPolicy::Unknown);
}

#[test]
fn load_config_or_default_reads_file_then_overrides() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("classifier.json");
    std::fs::write(&path, r#"{"wait_ms": 250, "fallback": "need_friend_request"}"#).unwrap();

    let config = load_config_or_default(Some(&path), None).expect("file config");
    assert_eq!(config.wait_ms, 250);
    assert_eq!(config.fallback, FallbackPolicy::NeedFriendRequest);

    let config = load_config_or_default(Some(&path), Some(5)).expect("override");
    assert_eq!(config.wait_ms, 5);
}

#[test]
fn load_config_or_default_surfaces_missing_file() {
    let dir = tempdir().expect("tempdir");
    assert!(load_config_or_default(Some(&dir.path().join("absent.json")), None).is_err());
}
