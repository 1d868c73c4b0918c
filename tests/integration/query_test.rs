//! End-to-end ad-hoc query tests.

use super::support::{runner_for, stub_executable};
use pqrunner::{PqError, PrimusQuery};
use pretty_assertions::assert_eq;

fn sample_query() -> PrimusQuery {
    PrimusQuery {
        charset: "UTF-8".to_string(),
        host: "primus.example.edu".to_string(),
        port: "1234".to_string(),
        user: "reader".to_string(),
        pass: "secret".to_string(),
        database: "students".to_string(),
        search: "LastName=Smith".to_string(),
        data: "FirstName\nLastName".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn query_file_reaches_executable_in_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    // The stub is handed the query file path; echo its content back.
    // Index-refresh invocations pass -update and carry no file.
    let exe = stub_executable(&dir, "case \"$2\" in -update) exit 0;; esac\ncat \"$1\"");
    let runner = runner_for(exe);

    let received = runner.run_ad_hoc_query(sample_query(), 10).await.unwrap();

    let directives: Vec<&str> = received
        .lines()
        .filter(|l| l.starts_with('#'))
        .collect();
    assert_eq!(
        directives,
        vec![
            "#CHARSET UTF-8",
            "#HOST primus.example.edu",
            "#PORT 1234",
            "#USER reader",
            "#PASS secret",
            "#OUTPUT ",
            "#DATABASE students",
            "#SEARCH LastName=Smith",
            "#SORT V1",
        ]
    );
    assert!(received.contains("FirstName\nLastName\n"));
}

#[tokio::test]
async fn output_directive_is_cleared_before_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let exe = stub_executable(&dir, "case \"$2\" in -update) exit 0;; esac\ncat \"$1\"");
    let runner = runner_for(exe);

    let mut query = sample_query();
    query.output = "/tmp/result.json".to_string();
    let received = runner.run_ad_hoc_query(query, 10).await.unwrap();

    // Ad-hoc results come back on stdout; the OUTPUT directive is blanked.
    assert!(received.contains("#OUTPUT \n"));
    assert!(!received.contains("/tmp/result.json"));
}

#[tokio::test]
async fn timeout_reports_error_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let seen = dir.path().join("seen-path");
    let exe = stub_executable(
        &dir,
        &format!("case \"$2\" in -update) exit 0;; esac\necho \"$1\" > {}\nsleep 5", seen.display()),
    );
    let runner = runner_for(exe);

    let err = runner.run_ad_hoc_query(sample_query(), 1).await.unwrap_err();
    assert!(matches!(err, PqError::Timeout { seconds: 1 }));

    let query_path = std::fs::read_to_string(&seen).unwrap();
    assert!(!std::path::Path::new(query_path.trim()).exists());
}

#[tokio::test]
async fn concurrent_queries_use_independent_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("paths");
    // Refresh calls pass -update; query calls append their file path.
    let exe = stub_executable(
        &dir,
        &format!("case \"$2\" in -update) exit 0;; esac\necho \"$1\" >> {}", log.display()),
    );
    let runner = runner_for(exe);

    let (a, b) = tokio::join!(
        runner.run_ad_hoc_query(sample_query(), 10),
        runner.run_ad_hoc_query(sample_query(), 10),
    );
    a.unwrap();
    b.unwrap();

    let paths: Vec<String> = std::fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(paths.len(), 2);
    assert_ne!(paths[0], paths[1]);
}

#[tokio::test]
async fn refresh_runs_before_first_query_only() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("argv");
    let exe = stub_executable(&dir, &format!("echo \"$@\" >> {}", log.display()));
    let runner = runner_for(exe);

    runner.run_ad_hoc_query(sample_query(), 10).await.unwrap();
    runner.run_ad_hoc_query(sample_query(), 10).await.unwrap();

    let argv = std::fs::read_to_string(&log).unwrap();
    let updates = argv.lines().filter(|l| l.ends_with("-update")).count();
    assert_eq!(updates, 1);
    // Two query invocations besides the single refresh.
    assert_eq!(argv.lines().count(), 3);
}
