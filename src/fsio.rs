//! Secure file I/O for query and import artifacts.
//!
//! Query files carry credentials, so deletion is an overwrite-then-remove
//! rather than a plain unlink. This is defense against casual forensic
//! recovery, not an adversarial wipe.

use crate::error::{PqError, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Length of the random component in temp filenames. 62 symbols at this
/// length makes collisions across concurrent callers negligible.
pub const TEMP_NAME_LEN: usize = 128;

/// Number of overwrite passes performed by [`secure_delete`].
const OVERWRITE_PASSES: u8 = 10;

/// Generates a random alphanumeric name of the given length.
pub fn random_name(len: usize) -> String {
    random_name_with(&mut rand::thread_rng(), len)
}

/// Generates a random alphanumeric name from a caller-supplied RNG.
///
/// Tests seed the RNG explicitly for deterministic names.
pub fn random_name_with<R: Rng>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Writes content to a file, creating or truncating it. Permissions are
/// restricted to 0644 on unix.
pub fn create_file(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path).map_err(|e| PqError::io(path, e))?;
    file.write_all(content.as_ref())
        .map_err(|e| PqError::io(path, e))?;
    Ok(())
}

/// Allocates a uniquely-named file in the system temp directory, writes the
/// content, closes the handle, and returns the path.
///
/// The handle is scoped so it cannot leak: any failure before `keep` drops
/// the temp file along with its descriptor.
pub fn create_temp_file(name: &str, content: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir();
    let mut tmp = tempfile::Builder::new()
        .prefix(name)
        .tempfile_in(&dir)
        .map_err(|e| PqError::io(&dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| PqError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| PqError::io(tmp.path(), e))?;
    let (_file, path) = tmp.keep().map_err(|e| {
        let path = e.file.path().to_path_buf();
        PqError::io(path, e.error)
    })?;
    Ok(path)
}

/// Returns true iff the path exists and is a regular file.
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Removes a file without overwriting it first.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| PqError::io(path, e))
}

/// Overwrites the file's full length ten times with numeric patterns, then
/// removes it.
///
/// A failure to open is a recoverable [`PqError::Io`]. Failures after a
/// successful open leave the file in an unknown, partially-wiped state and
/// surface as the fatal-class [`PqError::SecureDelete`]; callers decide
/// whether to escalate.
pub fn secure_delete(path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| PqError::io(path, e))?;

    let fatal = |stage: &'static str| {
        move |source: std::io::Error| PqError::SecureDelete {
            path: path.to_path_buf(),
            stage,
            source,
        }
    };

    let len = file.metadata().map_err(fatal("stat"))?.len() as usize;
    for pass in 0..OVERWRITE_PASSES {
        let pattern = vec![b'0' + pass; len];
        file.seek(SeekFrom::Start(0)).map_err(fatal("seek"))?;
        file.write_all(&pattern).map_err(fatal("overwrite"))?;
    }
    file.sync_all().map_err(fatal("sync"))?;
    drop(file);

    fs::remove_file(path).map_err(fatal("remove"))?;
    Ok(())
}
