//! End-to-end import tests.

use super::support::{runner_for, stub_executable};
use pqrunner::{ImportOutcome, ImportRequest, PqError};
use pretty_assertions::assert_eq;
use std::fs;

fn sample_request() -> ImportRequest {
    ImportRequest {
        host: "primus.example.edu".to_string(),
        port: "1234".to_string(),
        user: "loader".to_string(),
        pass: "secret".to_string(),
        loader: "cardloader".to_string(),
    }
}

#[tokio::test]
async fn missing_import_file_skips_subprocess() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("argv");
    let exe = stub_executable(&dir, &format!("echo run >> {}", log.display()));
    let runner = runner_for(exe);

    let err = runner
        .run_import(&dir.path().join("missing.json"), &sample_request())
        .await
        .unwrap_err();

    assert!(matches!(err, PqError::FileNotFound { .. }));
    assert!(!log.exists());
}

#[tokio::test]
async fn import_file_is_securely_deleted_after_success() {
    let dir = tempfile::tempdir().unwrap();
    let exe = stub_executable(&dir, "echo 'Errors: 0'");
    let runner = runner_for(exe);

    let import_file = dir.path().join("cards.json");
    fs::write(&import_file, "[{\"card\":1},{\"card\":2}]").unwrap();

    let output = runner
        .run_import(&import_file, &sample_request())
        .await
        .unwrap();

    assert_eq!(output.trim(), "Errors: 0");
    assert!(!import_file.exists());
}

#[tokio::test]
async fn import_file_is_deleted_after_failed_run() {
    let dir = tempfile::tempdir().unwrap();
    let exe = stub_executable(&dir, "echo 'loader rejected' >&2\nexit 1");
    let runner = runner_for(exe);

    let import_file = dir.path().join("cards.json");
    fs::write(&import_file, "[{\"card\":1}]").unwrap();

    let err = runner
        .run_import(&import_file, &sample_request())
        .await
        .unwrap_err();

    match err {
        PqError::Exec(msg) => assert!(msg.contains("loader rejected")),
        other => panic!("expected exec error, got {other:?}"),
    }
    assert!(!import_file.exists());
}

#[tokio::test]
async fn atomic_import_reports_new_record_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let exe = stub_executable(&dir, "echo 'Card loaded'\necho 'NEW: 1001'\necho 'Errors: 2'");
    let runner = runner_for(exe);

    let import_file = dir.path().join("card.json");
    fs::write(&import_file, "{\"card\":1}").unwrap();

    let outcome = runner
        .run_atomic_import(&import_file, &sample_request())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ImportOutcome {
            new_record_id: 1001,
            error_count: 2,
        }
    );
    assert!(!import_file.exists());
}
