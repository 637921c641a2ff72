//! Child process execution
//!
//! [`CommandExecutor`] is the boundary between the engine and the operating system. The default
//! [`ShellExecutor`] hands each case line to a shell (`bash -c <line>`), captures both streams, and
//! enforces the wall-clock budget by killing the child when the budget runs out.
//!
//! On Unix every case runs in its own process group. Once the case is over (exited or out of
//! budget) the whole group is sent `SIGKILL`, so nothing the shell forked outlives its case.
//!
//! Alternative executors (scripted replies in tests, dry runs) implement the same trait.

use std::future::Future;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, warn};

use super::case::Stream;
use super::error::ExecError;

/// Everything the child left behind when it exited within its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, or `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Wall time from launch to exit.
    pub elapsed: Duration,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stream(&self, stream: Stream) -> &str {
        match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        }
    }
}

/// How a launched child ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Exited(CapturedOutput),
    /// The child was killed after exceeding `budget`; its partial output is discarded.
    TimedOut { budget: Duration },
}

/// Runs one case command to completion or until the budget expires.
pub trait CommandExecutor {
    fn execute(&self, command: &str) -> impl Future<Output = Result<Launch, ExecError>>;
}

/// Launches each command through a shell with a hard wall-clock limit.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
    timeout: Duration,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>, timeout: Duration) -> Self {
        Self {
            shell: shell.into(),
            timeout,
        }
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> impl Future<Output = Result<Launch, ExecError>> {
        self.launch(command)
    }
}

impl ShellExecutor {
    async fn launch(&self, command_line: &str) -> Result<Launch, ExecError> {
        debug!(shell = %self.shell, command = command_line, "launching case");

        let mut command = Command::new(&self.shell);
        command
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let start = Instant::now();
        let child = command.spawn().map_err(|source| ExecError::Spawn {
            shell: self.shell.clone(),
            source,
        })?;
        let group = child.id();

        // Dropping the pending future drops the child, and kill_on_drop sends SIGKILL.
        let waited = tokio::time::timeout(self.timeout, child.wait_with_output()).await;
        let elapsed = start.elapsed();
        kill_group(group);
        let output = match waited {
            Ok(result) => result.map_err(ExecError::Wait)?,
            Err(_) => {
                debug!(command = command_line, budget_ms = self.timeout.as_millis() as u64, "case timed out");
                return Ok(Launch::TimedOut { budget: self.timeout });
            }
        };

        let stdout = decode(output.stdout, Stream::Stdout)?;
        let stderr = decode(output.stderr, Stream::Stderr)?;

        Ok(Launch::Exited(CapturedOutput {
            code: output.status.code(),
            stdout,
            stderr,
            elapsed,
        }))
    }
}

/// Kill whatever is left of the process group led by the case shell.
#[cfg(unix)]
fn kill_group(leader: Option<u32>) {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Some(pid) = leader.and_then(|id| i32::try_from(id).ok()) else {
        return;
    };
    match killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        // ESRCH: the group already emptied out
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => warn!(pid, error = %e, "failed to kill case process group"),
    }
}

#[cfg(not(unix))]
fn kill_group(_leader: Option<u32>) {}

fn decode(bytes: Vec<u8>, stream: Stream) -> Result<String, ExecError> {
    String::from_utf8(bytes).map_err(|source| ExecError::Decode { stream, source })
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bash(timeout_ms: u64) -> ShellExecutor {
        ShellExecutor::new("bash", Duration::from_millis(timeout_ms))
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let launch = bash(1000).execute("echo hi").await.unwrap();
        let out = match launch {
            Launch::Exited(out) => out,
            other => panic!("expected the child to exit, got {:?}", other),
        };
        assert!(out.success());
        assert_eq!(out.stdout, "hi\n");
        assert_eq!(out.stderr, "");
    }

    #[tokio::test]
    async fn test_captures_stderr_and_failure_code() {
        let launch = bash(1000).execute("echo err 1>&2; exit 3").await.unwrap();
        let out = match launch {
            Launch::Exited(out) => out,
            other => panic!("expected the child to exit, got {:?}", other),
        };
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stream(Stream::Stderr), "err\n");
    }

    #[tokio::test]
    async fn test_pipes_run_inside_one_case() {
        let launch = bash(1000).execute("printf 'b\\na\\n' | sort | head -n 1").await.unwrap();
        let out = match launch {
            Launch::Exited(out) => out,
            other => panic!("expected the child to exit, got {:?}", other),
        };
        assert_eq!(out.stdout.trim(), "a");
    }

    #[tokio::test]
    async fn test_kills_child_past_budget() {
        let start = Instant::now();
        let launch = bash(200).execute("sleep 5").await.unwrap();
        assert_eq!(
            launch,
            Launch::TimedOut {
                budget: Duration::from_millis(200)
            }
        );
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    /// True while `pid` names a process that has not yet exited.
    #[cfg(target_os = "linux")]
    fn running(pid: &str) -> bool {
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => !stat.rsplit(')').next().unwrap_or("").trim_start().starts_with('Z'),
            Err(_) => false,
        }
    }

    #[cfg(target_os = "linux")]
    async fn assert_reaped(pid: &str) {
        for _ in 0..50 {
            if !running(pid) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("process {} outlived its case", pid);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_timeout_kills_forked_processes() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("sleeper.pid");
        let line = format!("sleep 7 & echo $! > {}; wait; echo done", pid_file.display());

        let launch = bash(300).execute(&line).await.unwrap();
        assert!(matches!(launch, Launch::TimedOut { .. }));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert_reaped(pid.trim()).await;
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_exit_kills_background_jobs() {
        let launch = bash(1000).execute("sleep 7 >/dev/null 2>&1 & echo $!").await.unwrap();
        let out = match launch {
            Launch::Exited(out) => out,
            other => panic!("expected the child to exit, got {:?}", other),
        };
        assert!(out.success());
        assert_reaped(out.stdout.trim()).await;
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_fault() {
        let executor = ShellExecutor::new("/nonexistent/conform-shell", Duration::from_secs(1));
        let err = executor.execute("true").await.unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_fault() {
        let err = bash(1000).execute("printf '\\377\\376'").await.unwrap_err();
        assert!(matches!(
            err,
            ExecError::Decode {
                stream: Stream::Stdout,
                ..
            }
        ));
    }
}
