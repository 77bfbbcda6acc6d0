//! Subprocess execution and outcome validation.
//!
//! Every variant renders a single shell line (the SQLite variant is a real
//! pipeline with a redirection, so the shell is required anyway) which is run
//! through `sh -c` with optional environment overrides. The call blocks the
//! task until the child exits or the configured timeout fires; an expired
//! child is killed before the timeout is reported.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{RestoreError, Result};

/// Runs a rendered command line through the shell and waits for completion.
///
/// A `limit` of `None` (or zero) waits indefinitely. When the limit elapses
/// the child is terminated and [`RestoreError::Timeout`] is returned.
///
/// # Errors
/// Returns [`RestoreError::Launch`] if the shell cannot be spawned, and
/// [`RestoreError::Io`] if waiting on the child fails.
pub async fn run_shell(
    command_line: &str,
    env: &[(String, String)],
    limit: Option<Duration>,
) -> Result<Output> {
    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg(command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    for (key, value) in env {
        command.env(key, value);
    }

    let child = command
        .spawn()
        .map_err(|e| RestoreError::launch("the shell could not be spawned", e))?;

    let waited = match limit {
        Some(limit) if !limit.is_zero() => {
            match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(waited) => waited,
                // Dropping the future drops the child, which kills it.
                Err(_elapsed) => {
                    debug!(?limit, "restore process timed out");
                    return Err(RestoreError::timeout(limit));
                }
            }
        }
        _ => child.wait_with_output().await,
    };

    waited.map_err(|e| RestoreError::io("failed waiting for the restore process", e))
}

/// Judges a finished restore: exit status first, then the output artifact.
///
/// Success requires all three of: a zero exit status, a readable output
/// file, and a strictly positive output size. The exit status is checked
/// before the file so a stale artifact from an earlier run can never mask a
/// failed process.
///
/// # Errors
/// Returns the matching [`RestoreError`] kind for the first failing check.
pub async fn check_outcome(output: &Output, dump_file: &Path) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(RestoreError::execution_failed(output.status, stderr));
    }

    let metadata = tokio::fs::metadata(dump_file)
        .await
        .map_err(|_| RestoreError::output_unreadable(dump_file))?;

    if metadata.len() == 0 {
        return Err(RestoreError::output_empty(dump_file));
    }

    Ok(())
}
