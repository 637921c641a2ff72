//! Case execution and outcome classification
//!
//! [`classify`] is a pure function of the launch outcome, the expected text, and the mode. The
//! checks run in a fixed priority:
//!
//! | Priority | Correctness                     | Robustness                        |
//! |----------|---------------------------------|-----------------------------------|
//! | 1        | timed out -> `TimedOut`         | timed out -> `TimedOut`           |
//! | 2        | exit != 0 -> `RuntimeError`     | exit == 0 -> `Failed`             |
//! | 3        | stdout == expected -> `Passed`  | stderr == expected -> `Passed`    |
//! | 4        | otherwise `Failed`              | otherwise `Failed`                |
//!
//! A fault inside the harness (spawn, wait, decode) is always `RuntimeError` with a
//! [`RuntimeFault::Harness`] cause, kept distinct from the child's own non-zero exit.

use std::time::Duration;

use tracing::warn;

use super::case::{Expected, Mode, PairedCase, Stream};
use super::error::ExecError;
use super::executor::{CapturedOutput, CommandExecutor, Launch};

/// Terminal outcome of one case.
#[derive(Debug)]
pub enum Verdict {
    Passed,
    Failed(Mismatch),
    RuntimeError(RuntimeFault),
    TimedOut,
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Short label used in the report table.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Passed => "Passed",
            Verdict::Failed(_) => "Failed",
            Verdict::RuntimeError(_) => "Runtime Error",
            Verdict::TimedOut => "TLE",
        }
    }
}

/// The compared stream did not hold the expected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub stream: Stream,
    pub expected: String,
    /// Trimmed text actually found, or `None` when a robustness case exited zero.
    pub actual: Option<String>,
}

/// Why a case ended as `RuntimeError`.
#[derive(Debug)]
pub enum RuntimeFault {
    /// The child exited non-zero where zero was required.
    ChildExit { code: Option<i32>, stderr: String },
    /// The harness could not launch or talk to the child.
    Harness(ExecError),
}

/// Full record of one executed case.
#[derive(Debug)]
pub struct ExecutionResult {
    pub verdict: Verdict,
    /// Captured streams and exit status; absent when the child timed out or never ran.
    pub output: Option<CapturedOutput>,
}

impl ExecutionResult {
    /// Launch-to-exit wall time, when the child exited on its own.
    pub fn elapsed(&self) -> Option<Duration> {
        self.output.as_ref().map(|out| out.elapsed)
    }
}

/// Classify a launch outcome against the expected text for `mode`.
pub fn classify(mode: Mode, launch: Result<Launch, ExecError>, expected: &Expected) -> ExecutionResult {
    let output = match launch {
        Ok(Launch::Exited(output)) => output,
        Ok(Launch::TimedOut { .. }) => {
            return ExecutionResult {
                verdict: Verdict::TimedOut,
                output: None,
            };
        }
        Err(fault) => {
            return ExecutionResult {
                verdict: Verdict::RuntimeError(RuntimeFault::Harness(fault)),
                output: None,
            };
        }
    };

    let stream = mode.compared_stream();
    let actual = output.stream(stream).trim();

    let verdict = match mode {
        Mode::Correctness if !output.success() => Verdict::RuntimeError(RuntimeFault::ChildExit {
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        }),
        Mode::Robustness if output.success() => Verdict::Failed(Mismatch {
            stream,
            expected: expected.as_str().to_string(),
            actual: None,
        }),
        _ if actual == expected.as_str() => Verdict::Passed,
        _ => Verdict::Failed(Mismatch {
            stream,
            expected: expected.as_str().to_string(),
            actual: Some(actual.to_string()),
        }),
    };

    ExecutionResult {
        verdict,
        output: Some(output),
    }
}

/// Run one paired case through `executor` and classify it.
///
/// Never fails: harness faults come back as a `RuntimeError` verdict.
pub async fn run_case<E: CommandExecutor>(executor: &E, mode: Mode, paired: &PairedCase) -> ExecutionResult {
    let launch = executor.execute(paired.case.command()).await;
    if let Err(fault) = &launch {
        warn!(mode = %mode, index = paired.index, command = paired.case.command(), error = %fault, "harness fault");
    }
    classify(mode, launch, &paired.expected)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn exited(code: i32, stdout: &str, stderr: &str) -> Result<Launch, ExecError> {
        Ok(Launch::Exited(CapturedOutput {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            elapsed: Duration::from_millis(3),
        }))
    }

    fn timed_out() -> Result<Launch, ExecError> {
        Ok(Launch::TimedOut {
            budget: Duration::from_secs(1),
        })
    }

    fn spawn_fault() -> Result<Launch, ExecError> {
        Err(ExecError::Spawn {
            shell: "bash".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }

    // ========================================
    // Correctness
    // ========================================

    #[test]
    fn test_correctness_pass_on_trimmed_match() {
        let result = classify(Mode::Correctness, exited(0, "hi\n", ""), &Expected::new(" hi "));
        assert!(result.verdict.is_pass());
        assert_eq!(result.elapsed(), Some(Duration::from_millis(3)));
    }

    #[test]
    fn test_correctness_nonzero_exit_is_runtime_error() {
        let result = classify(Mode::Correctness, exited(1, "hi", " boom \n"), &Expected::new("hi"));
        match result.verdict {
            Verdict::RuntimeError(RuntimeFault::ChildExit { code, stderr }) => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected child runtime error, got {:?}", other),
        }
    }

    #[test]
    fn test_correctness_signal_is_runtime_error() {
        let launch = Ok(Launch::Exited(CapturedOutput {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
            elapsed: Duration::ZERO,
        }));
        let result = classify(Mode::Correctness, launch, &Expected::new(""));
        assert!(matches!(
            result.verdict,
            Verdict::RuntimeError(RuntimeFault::ChildExit { code: None, .. })
        ));
    }

    #[test]
    fn test_correctness_mismatch_reports_both_sides() {
        let result = classify(Mode::Correctness, exited(0, "false\n", ""), &Expected::new("true"));
        match result.verdict {
            Verdict::Failed(mismatch) => {
                assert_eq!(mismatch.stream, Stream::Stdout);
                assert_eq!(mismatch.expected, "true");
                assert_eq!(mismatch.actual.as_deref(), Some("false"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_correctness_requires_exact_equality() {
        let result = classify(Mode::Correctness, exited(0, "hi there", ""), &Expected::new("hi"));
        assert_eq!(result.verdict.label(), "Failed");
    }

    // ========================================
    // Robustness
    // ========================================

    #[test]
    fn test_robustness_pass_on_expected_stderr() {
        let result = classify(Mode::Robustness, exited(1, "", "err\n"), &Expected::new("err"));
        assert!(result.verdict.is_pass());
    }

    #[test]
    fn test_robustness_zero_exit_never_produced_message() {
        let result = classify(Mode::Robustness, exited(0, "", "boom"), &Expected::new("boom"));
        match result.verdict {
            Verdict::Failed(mismatch) => {
                assert_eq!(mismatch.stream, Stream::Stderr);
                assert_eq!(mismatch.actual, None);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_robustness_wrong_message_fails() {
        let result = classify(Mode::Robustness, exited(2, "", "syntax error"), &Expected::new("illegal input"));
        match result.verdict {
            Verdict::Failed(mismatch) => assert_eq!(mismatch.actual.as_deref(), Some("syntax error")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    // ========================================
    // Shared priorities
    // ========================================

    #[test]
    fn test_timeout_wins_in_both_modes() {
        for mode in Mode::ALL {
            let result = classify(mode, timed_out(), &Expected::new("anything"));
            assert!(matches!(result.verdict, Verdict::TimedOut));
            assert!(result.output.is_none());
        }
    }

    #[test]
    fn test_harness_fault_is_distinct_runtime_error() {
        for mode in Mode::ALL {
            let result = classify(mode, spawn_fault(), &Expected::new("x"));
            assert!(matches!(
                result.verdict,
                Verdict::RuntimeError(RuntimeFault::Harness(ExecError::Spawn { .. }))
            ));
            assert_eq!(result.elapsed(), None);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Verdict::Passed.label(), "Passed");
        assert_eq!(Verdict::TimedOut.label(), "TLE");
    }
}
