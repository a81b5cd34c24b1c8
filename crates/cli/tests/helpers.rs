use std::path::PathBuf;

use symsieve::{canonicalize_or_current, resolve_under};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(canonicalize_or_current(".").expect("canonicalize"), cwd);
}

#[test]
fn canonicalize_or_current_resolves_existing_directory() {
    let tmp = tempdir().expect("tempdir");
    let nested = tmp.path().join("nested");
    std::fs::create_dir_all(&nested).expect("create nested");

    let result = canonicalize_or_current(nested.to_str().unwrap()).expect("canonicalize nested");
    assert_eq!(result, nested.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path_with_cwd() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current("not-created-yet").expect("fallback");
    assert_eq!(result, cwd.join("not-created-yet"));
}

#[test]
fn resolve_under_keeps_absolute_paths() {
    let root = PathBuf::from("/work");
    assert_eq!(resolve_under(&root, &PathBuf::from("a.json")), PathBuf::from("/work/a.json"));
    assert_eq!(resolve_under(&root, &PathBuf::from("/tmp/b.json")), PathBuf::from("/tmp/b.json"));
}
