//! Repair of truncated JSON output files.
//!
//! Exercises the public entry point, settle interval included, against the
//! exact truncation shape the shim targets.

use pqrunner::output::repair_truncated_json;
use pretty_assertions::assert_eq;
use std::fs;

#[tokio::test]
async fn truncated_multi_record_array_is_repaired_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.json");
    fs::write(&path, "[{\"card\":1},{\"card\":2}]XXXXXX").unwrap();

    repair_truncated_json(&path).await.unwrap();

    let repaired = fs::read_to_string(&path).unwrap();
    assert_eq!(repaired, "[{\"card\":1},{\"card\":2}]\n]");
}

#[tokio::test]
async fn single_record_file_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.json");
    let original = "[{\"card\":1}]";
    fs::write(&path, original).unwrap();

    repair_truncated_json(&path).await.unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}
