use crate::error::{ReportError, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Fetch every remote (branches and tags) for the repository at `path`.
/// The git process is killed once `timeout` elapses.
pub fn update_repository(path: &Path, timeout: Duration) -> Result<()> {
    let mut child = Command::new("git")
        .args(["fetch", "--all", "--tags", "--quiet"])
        .current_dir(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drained concurrently so a chatty fetch cannot fill the pipe and stall.
    let reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            if status.success() {
                return Ok(());
            }
            let stderr = reader
                .and_then(|handle| handle.join().ok())
                .unwrap_or_default();
            return Err(ReportError::Fetch(format!(
                "git fetch exited with {status}: {}",
                stderr.trim()
            )));
        }

        // Helpers spawned by git may hold the pipe open, so the reader is not joined here.
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ReportError::Fetch(format!(
                "git fetch timed out after {}",
                humantime::format_duration(timeout)
            )));
        }

        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_git() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    #[test]
    fn fetch_outside_a_repository_fails() {
        if !has_git() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let err = update_repository(dir.path(), Duration::from_secs(30)).unwrap_err();
        assert!(matches!(err, ReportError::Fetch(_)));
    }

    #[test]
    fn failure_message_carries_git_stderr() {
        if !has_git() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let err = update_repository(dir.path(), Duration::from_secs(30)).unwrap_err();
        let ReportError::Fetch(message) = err else {
            panic!("expected a fetch error");
        };
        assert!(message.contains("exited with"));
        assert!(message.to_lowercase().contains("not a git repository"));
    }
}
