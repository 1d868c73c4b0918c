//! Extraction of structured results from primusquery output.
//!
//! The executable reports status as free text on stdout; the fragments this
//! crate consumes are the substrings `Errors: <N>` and `NEW: <N>`. Neither
//! is guaranteed to appear: a missing `Errors:` means zero errors and a
//! missing `NEW:` means no record was created.

use crate::error::{PqError, Result};
use crate::fsio;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Sentinel returned by [`new_record_id`] when the output names no record.
pub const NO_RECORD: i64 = -1;

/// Settle interval before rewriting a repaired JSON file, giving the
/// producing process time to tear down its own file handle.
const REPAIR_SETTLE: Duration = Duration::from_secs(2);

fn errors_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Errors: ([0-9]+)").unwrap())
}

fn new_record_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"NEW: ([0-9]+)").unwrap())
}

/// Extracts the error count from subprocess output.
///
/// Absence of the pattern is not an error and yields zero. A matched digit
/// run that fails to parse (overflow) is a [`PqError::Parse`].
pub fn count_errors(output: &str) -> Result<u32> {
    match errors_pattern().captures(output) {
        Some(caps) => caps[1]
            .parse()
            .map_err(|e| PqError::parse(format!("error count '{}': {}", &caps[1], e))),
        None => Ok(0),
    }
}

/// Extracts the identifier of a newly created record from subprocess output.
///
/// Returns [`NO_RECORD`] when the pattern is absent; "no new record" is a
/// valid outcome, not an error.
pub fn new_record_id(output: &str) -> Result<i64> {
    match new_record_pattern().captures(output) {
        Some(caps) => caps[1]
            .parse()
            .map_err(|e| PqError::parse(format!("record id '{}': {}", &caps[1], e))),
        None => Ok(NO_RECORD),
    }
}

/// Repairs the known truncation defect in multi-record JSON array files
/// generated by the executable.
///
/// The defect only manifests in multi-element arrays, so a comma in the
/// content is the trigger: the file is securely deleted, rewritten with its
/// trailing 6 characters dropped, and closed with `\n]`. Comma-free files
/// are left untouched. This is a shim for one observed defect shape, not a
/// general JSON fixer.
pub async fn repair_truncated_json(path: &Path) -> Result<()> {
    repair_truncated_json_with_settle(path, REPAIR_SETTLE).await
}

async fn repair_truncated_json_with_settle(path: &Path, settle: Duration) -> Result<()> {
    let content = std::fs::read(path).map_err(|e| PqError::io(path, e))?;
    if !content.contains(&b',') {
        return Ok(());
    }

    fsio::secure_delete(path)?;
    tokio::time::sleep(settle).await;

    // Byte-oriented throughout: the cut point is arbitrary and may fall
    // inside a multibyte character in non-ASCII record text.
    let mut repaired = content;
    let end = repaired.len().saturating_sub(6);
    repaired.truncate(end);
    repaired.extend_from_slice(b"\n]");
    fsio::create_file(path, &repaired)
}
