use pretty_assertions::assert_eq;
use rstest::rstest;
use status_fs::{ConfigStore, Error, NormalizedPath};
use tempfile::TempDir;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    assert_eq!(base.join("baz").as_str(), "foo/bar/baz");
    assert_eq!(NormalizedPath::new("/").join("baz").as_str(), "/baz");
}

#[test]
fn test_join_absolute_segment_replaces_base() {
    let base = NormalizedPath::new("/home/user");
    assert_eq!(base.join("/var/status").as_str(), "/var/status");
}

#[test]
fn test_file_name() {
    assert_eq!(
        NormalizedPath::new("/status/services.json").file_name(),
        Some("services.json")
    );
    assert_eq!(NormalizedPath::new("/status/").file_name(), Some("status"));
    assert_eq!(NormalizedPath::new("/").file_name(), None);
}

#[rstest]
#[case("/a/./b", "/a/b")]
#[case("/a/b/../c", "/a/c")]
#[case("/../a", "/a")]
#[case("a//b/", "a/b")]
#[case("../a", "../a")]
#[case("a/..", ".")]
#[case("C:/x/../y", "C:/y")]
fn test_clean(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).clean().as_str(), expected);
}

#[test]
fn test_resolve_missing_tail_is_appended() {
    let temp = TempDir::new().unwrap();
    let root = NormalizedPath::new(dunce::canonicalize(temp.path()).unwrap());

    let resolved = root.join("not/yet/../created").resolve();

    assert_eq!(resolved, root.join("not/created"));
}

#[cfg(unix)]
#[test]
fn test_resolve_follows_symlinks() {
    let temp = TempDir::new().unwrap();
    let real = temp.path().join("real");
    std::fs::create_dir(&real).unwrap();
    std::os::unix::fs::symlink(&real, temp.path().join("link")).unwrap();

    let resolved = NormalizedPath::new(temp.path().join("link/statuses")).resolve();

    let expected = NormalizedPath::new(dunce::canonicalize(&real).unwrap()).join("statuses");
    assert_eq!(resolved, expected);
}

#[test]
fn test_resolve_path_relative_uses_base() {
    let base_dir = TempDir::new().unwrap();
    let base = NormalizedPath::new(dunce::canonicalize(base_dir.path()).unwrap());
    let mut store = ConfigStore::new();
    store.set("status-dir", "statuses/./nested");

    let resolved = store.resolve_path("status-dir", Some(&base)).unwrap();

    assert!(resolved.is_absolute());
    assert_eq!(resolved, base.join("statuses/nested"));
}

#[test]
fn test_resolve_path_absolute_ignores_base() {
    let target = TempDir::new().unwrap();
    let target_path = dunce::canonicalize(target.path()).unwrap();
    let other = TempDir::new().unwrap();
    let mut store = ConfigStore::new();
    store.set("status-dir", target_path.to_string_lossy().into_owned());

    let resolved = store
        .resolve_path("status-dir", Some(&NormalizedPath::new(other.path())))
        .unwrap();

    assert_eq!(resolved, NormalizedPath::new(&target_path));
}

#[test]
fn test_resolve_path_without_base_is_absolute() {
    let mut store = ConfigStore::new();
    store.set("status-dir", "statuses");

    let resolved = store.resolve_path("status-dir", None).unwrap();

    assert!(resolved.is_absolute());
    assert_eq!(resolved.file_name(), Some("statuses"));
}

#[test]
fn test_resolve_path_missing_key() {
    let store = ConfigStore::new();
    let result = store.resolve_path("status-dir", None);
    assert!(matches!(result, Err(Error::MissingKey { key }) if key == "status-dir"));
}

#[test]
fn test_resolve_path_does_not_create_anything() {
    let temp = TempDir::new().unwrap();
    let mut store = ConfigStore::new();
    store.set("status-dir", "statuses");

    let resolved = store
        .resolve_path("status-dir", Some(&NormalizedPath::new(temp.path())))
        .unwrap();

    assert!(!resolved.to_native().exists());
}
