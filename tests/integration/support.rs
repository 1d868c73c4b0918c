//! Shared helpers for integration tests.

use pqrunner::{Config, Runner};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes an executable shell script standing in for primusquery.
pub fn stub_executable(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("primusquery");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Builds a runner configured for the given stub executable.
pub fn runner_for(exe: PathBuf) -> Runner {
    Runner::new(Config {
        executable: exe,
        ..Config::default()
    })
}
