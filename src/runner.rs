//! Subprocess invocation of the primusquery executable.
//!
//! A [`Runner`] owns the process-wide configuration and the one-shot
//! index-refresh gate. Every call is a direct subprocess invocation, each
//! independently bounded by its own deadline; there is no queuing or
//! batching. Temp artifacts are cleaned up on every path, timeout included.

use crate::config::Config;
use crate::error::{PqError, Result};
use crate::fsio;
use crate::output;
use crate::query::PrimusQuery;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Loader arguments for a bulk import invocation.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: String,
    /// Name of the loader profile the executable applies to the file.
    pub loader: String,
}

/// Summary of an import expected to affect exactly one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Identifier of the created record, or [`output::NO_RECORD`] if none
    /// was reported.
    pub new_record_id: i64,
    /// Error count reported by the executable; zero when unreported.
    pub error_count: u32,
}

/// Drives the primusquery executable.
pub struct Runner {
    config: Config,
    /// One-shot gate for the index refresh. Mutex-guarded so concurrent
    /// first callers issue a single refresh subprocess between them. Flips
    /// after the first attempt regardless of its outcome and is never reset
    /// during normal operation.
    refreshed: Mutex<bool>,
}

impl Runner {
    /// Creates a runner with the given configuration. The refresh gate
    /// starts unset.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            refreshed: Mutex::new(false),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Re-arms the index-refresh gate. Intended for tests and long-lived
    /// callers that know the executable's index has gone stale.
    pub async fn reset_refresh_gate(&self) {
        *self.refreshed.lock().await = false;
    }

    /// Refreshes the executable's internal index, at most once per runner
    /// lifetime.
    ///
    /// Runs `<executable> <host> -update` under the configured deadline.
    /// The gate is held across the subprocess call, so a concurrent first
    /// caller waits instead of issuing a duplicate refresh, and it flips
    /// after the first attempt whether or not that attempt succeeded.
    pub async fn refresh_index(&self, host: &str) -> Result<()> {
        let mut refreshed = self.refreshed.lock().await;
        if *refreshed {
            debug!("index already refreshed, skipping");
            return Ok(());
        }
        *refreshed = true;

        let deadline = Duration::from_secs(self.config.update_timeout_secs);
        let out = self
            .invoke(
                [OsStr::new(host), OsStr::new("-update")],
                Some(deadline),
            )
            .await?;
        debug!(output = %String::from_utf8_lossy(&out.stdout).trim(), "index refresh done");
        Ok(())
    }

    /// Runs an ad-hoc query and returns the executable's raw stdout.
    ///
    /// Triggers the index refresh first, renders the query to a
    /// randomly-named temp file, invokes `<executable> <path>` under the
    /// given deadline, and securely deletes the temp file whatever the
    /// outcome.
    pub async fn run_ad_hoc_query(
        &self,
        query: PrimusQuery,
        timeout_secs: u64,
    ) -> Result<String> {
        self.refresh_index(&query.host).await?;
        self.dispatch_query(query, timeout_secs)
            .await
            .map(|out| String::from_utf8_lossy(&out.stdout).into_owned())
    }

    /// Runs a query for its side effects only, discarding stdout and
    /// skipping the index refresh.
    pub async fn execute(&self, query: PrimusQuery, timeout_secs: u64) -> Result<()> {
        self.dispatch_query(query, timeout_secs).await.map(|_| ())
    }

    /// Renders a query, persists it to a temp file, and invokes the
    /// executable against that file under a deadline.
    async fn dispatch_query(
        &self,
        mut query: PrimusQuery,
        timeout_secs: u64,
    ) -> Result<std::process::Output> {
        // Results come back on stdout; the OUTPUT directive stays empty.
        query.output.clear();
        let text = query.render();

        let name = fsio::random_name(fsio::TEMP_NAME_LEN);
        let path = fsio::create_temp_file(&name, &text)?;
        if self.config.debug {
            // Keep a copy of the rendered query for inspection.
            let _ = fsio::create_file(Path::new("debug.priq"), &text);
        }

        let result = self
            .invoke([path.as_os_str()], Some(Duration::from_secs(timeout_secs)))
            .await;
        let cleanup = fsio::secure_delete(&path);

        let out = match result {
            Ok(out) => out,
            Err(e) => {
                if let Err(cleanup_err) = cleanup {
                    warn!(path = %path.display(), error = %cleanup_err, "temp cleanup failed");
                }
                return Err(e);
            }
        };
        cleanup?;

        debug!(output = %String::from_utf8_lossy(&out.stdout).trim(), "query done");
        Ok(out)
    }

    /// Runs a bulk import against a pre-existing file.
    ///
    /// Invokes `<executable> <host> <port> <user> <pass> <loader> -i <path>`
    /// and securely deletes the import file after the attempt, success or
    /// not. The file must exist before invocation; otherwise
    /// [`PqError::FileNotFound`] is returned and no subprocess is spawned.
    pub async fn run_import(&self, path: &Path, request: &ImportRequest) -> Result<String> {
        if !fsio::file_exists(path) {
            return Err(PqError::not_found(path));
        }

        let result = self
            .invoke(
                [
                    OsStr::new(&request.host),
                    OsStr::new(&request.port),
                    OsStr::new(&request.user),
                    OsStr::new(&request.pass),
                    OsStr::new(&request.loader),
                    OsStr::new("-i"),
                    path.as_os_str(),
                ],
                None,
            )
            .await;
        let cleanup = fsio::secure_delete(path);

        let out = match result {
            Ok(out) => out,
            Err(e) => {
                if let Err(cleanup_err) = cleanup {
                    warn!(path = %path.display(), error = %cleanup_err, "import cleanup failed");
                }
                return Err(e);
            }
        };
        cleanup?;

        let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
        if !stdout.is_empty() {
            debug!(loader = %request.loader, output = %stdout.trim(), "import done");
        }
        Ok(stdout)
    }

    /// Runs an import expected to create exactly one record and summarizes
    /// the executable's report.
    ///
    /// A malformed numeric field in otherwise-matched output propagates as
    /// [`PqError::Parse`].
    pub async fn run_atomic_import(
        &self,
        path: &Path,
        request: &ImportRequest,
    ) -> Result<ImportOutcome> {
        let stdout = self.run_import(path, request).await?;
        Ok(ImportOutcome {
            new_record_id: output::new_record_id(&stdout)?,
            error_count: output::count_errors(&stdout)?,
        })
    }

    /// Spawns the executable with the given arguments, optionally bounded
    /// by a deadline. The child is killed if the deadline elapses.
    async fn invoke<I, S>(&self, args: I, deadline: Option<Duration>) -> Result<std::process::Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let exe = &self.config.executable;
        let mut cmd = Command::new(exe);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let launch_err =
            |e: std::io::Error| PqError::exec(format!("failed to launch {}: {}", exe.display(), e));

        let out = match deadline {
            Some(deadline) => tokio::time::timeout(deadline, cmd.output())
                .await
                .map_err(|_| PqError::Timeout {
                    seconds: deadline.as_secs(),
                })?
                .map_err(launch_err)?,
            None => cmd.output().await.map_err(launch_err)?,
        };

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(PqError::exec(format!(
                "{} exited with {}: {}",
                exe.display(),
                out.status,
                stderr.trim()
            )));
        }
        Ok(out)
    }
}
