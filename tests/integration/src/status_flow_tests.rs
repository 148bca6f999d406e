//! End-to-end tests for the reporting flow
//!
//! Exercises config loading -> directory resolution -> status write ->
//! manifest update through the public library API.

use pretty_assertions::assert_eq;
use status_core::{Error, ServiceName, StatusDirectoryResolver, run};
use status_fs::NormalizedPath;
use status_test_utils::TestEnv;
use std::fs;

fn resolver(env: &TestEnv) -> StatusDirectoryResolver {
    StatusDirectoryResolver::for_project_root(&NormalizedPath::new(env.root()))
        .with_home_dir(NormalizedPath::new(env.home()))
}

fn service(name: &str) -> ServiceName {
    ServiceName::new(name).unwrap()
}

#[test]
fn test_build_reported_twice() {
    let env = TestEnv::with_status_dir("statuses");
    let resolver = resolver(&env);

    let first = run(&resolver, &service("build"), 0).unwrap();
    assert!(first.status.is_written());
    assert!(first.manifest.is_written());

    let second = run(&resolver, &service("build"), 1).unwrap();
    assert!(second.status.is_written());
    assert!(!second.manifest.is_written());
    assert!(!second.is_degraded());

    let doc = env.read_json(env.home_path("statuses/build.json"));
    assert_eq!(doc["status"], "error");
    assert_eq!(doc["exit_code"], 1);
    assert_eq!(env.manifest_services(env.home_path("statuses")), vec!["build"]);
}

#[test]
fn test_disjoint_sets_union_across_invocations() {
    let env = TestEnv::with_status_dir("statuses");
    let resolver = resolver(&env);

    for name in ["lint", "build"] {
        run(&resolver, &service(name), 0).unwrap();
    }
    for name in ["deploy", "audit"] {
        run(&resolver, &service(name), 2).unwrap();
    }

    assert_eq!(
        env.manifest_services(env.home_path("statuses")),
        vec!["audit", "build", "deploy", "lint"]
    );
}

#[test]
fn test_manifest_bytes_stable_after_first_registration() {
    let env = TestEnv::with_status_dir("statuses");
    let resolver = resolver(&env);
    let manifest = env.home_path("statuses/services.json");

    run(&resolver, &service("build"), 0).unwrap();
    let before = fs::read(&manifest).unwrap();
    run(&resolver, &service("build"), 0).unwrap();

    assert_eq!(fs::read(&manifest).unwrap(), before);
}

#[test]
fn test_config_error_blocks_all_writes() {
    let env = TestEnv::new();
    env.write_config(r#"{"region": "eu"}"#);

    let err = run(&resolver(&env), &service("build"), 0).unwrap_err();

    assert!(matches!(
        err,
        Error::Fs(status_fs::Error::ConfigValidation { .. })
    ));
    assert_eq!(fs::read_dir(env.home()).unwrap().count(), 0);
}

#[test]
fn test_corrupt_manifest_recovers_on_next_report() {
    let env = TestEnv::with_status_dir("statuses");
    let resolver = resolver(&env);
    fs::create_dir_all(env.home_path("statuses")).unwrap();
    fs::write(env.home_path("statuses/services.json"), "not json at all").unwrap();

    let summary = run(&resolver, &service("build"), 0).unwrap();

    assert!(!summary.is_degraded());
    assert_eq!(env.manifest_services(env.home_path("statuses")), vec!["build"]);
}

#[test]
fn test_status_dir_with_dot_segments() {
    let env = TestEnv::with_status_dir("./a/../statuses/./");

    let summary = run(&resolver(&env), &service("build"), 0).unwrap();

    assert!(summary.status.is_written());
    assert!(env.home_path("statuses/build.json").is_file());
}
