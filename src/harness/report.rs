//! Result reporting
//!
//! ## SuiteReporter Trait
//!
//! The driver reports through [`SuiteReporter`] so the table format can be swapped (plain text,
//! colored terminal, recording fakes in tests) without touching execution.
//!
//! The default [`ConsoleReporter`] prints one banner per mode, one row per case, and a two-line
//! summary:
//!
//! ```text
//! =================== Correctness Test ====================
//! Case                             Target Result
//!    1                                hi: Passed
//! Passed 1/1
//! Total Time for Passed Cases: 2.4 ms
//! ```

use std::io::{self, Write};

use super::case::{Case, Mode, Stream};
use super::engine::{ExecutionResult, Mismatch, RuntimeFault, Verdict};
use super::totals::RunTotals;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Receives progress events from the suite driver.
pub trait SuiteReporter {
    /// Called before the first case of a mode runs
    fn on_mode_start(&mut self, mode: Mode) -> io::Result<()>;

    /// Called right before a case is launched
    fn on_case_start(&mut self, _index: usize, _case: &Case) -> io::Result<()> {
        Ok(())
    }

    /// Called once a case has been classified
    fn on_case_complete(&mut self, index: usize, case: &Case, result: &ExecutionResult) -> io::Result<()>;

    /// Called after every mode has finished
    fn on_run_complete(&mut self, totals: &RunTotals) -> io::Result<()>;
}

/// Plain or ANSI-colored table writer.
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }
}

impl<W: Write> SuiteReporter for ConsoleReporter<W> {
    fn on_mode_start(&mut self, mode: Mode) -> io::Result<()> {
        writeln!(self.out, "{}", banner(mode))?;
        writeln!(self.out, "{:>4} {:>34} {:>6}", "Case", "Target", "Result")
    }

    fn on_case_start(&mut self, index: usize, case: &Case) -> io::Result<()> {
        write!(self.out, "{}", row_prefix(index, case))?;
        self.out.flush()
    }

    fn on_case_complete(&mut self, _index: usize, _case: &Case, result: &ExecutionResult) -> io::Result<()> {
        let verdict = &result.verdict;
        let code = if verdict.is_pass() { GREEN } else { RED };
        let label = self.paint(code, verdict.label());
        match describe(verdict) {
            Some(detail) => writeln!(self.out, "{} {}", label, detail),
            None => writeln!(self.out, "{}", label),
        }
    }

    fn on_run_complete(&mut self, totals: &RunTotals) -> io::Result<()> {
        for line in summary_lines(totals) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}

/// Mode banner, e.g. `=================== Correctness Test ====================`.
pub fn banner(mode: Mode) -> String {
    format!("{:=^57}", format!(" {} ", mode.title()))
}

/// Index and target columns of a case row, up to and including `": "`.
pub fn row_prefix(index: usize, case: &Case) -> String {
    format!("{:>4} {:>33}: ", index, case.target())
}

/// Diagnostic text printed after the label of a non-passing verdict.
pub fn describe(verdict: &Verdict) -> Option<String> {
    match verdict {
        Verdict::Passed | Verdict::TimedOut => None,
        Verdict::RuntimeError(RuntimeFault::ChildExit { stderr, .. }) => Some(format!("stderr: {}", stderr)),
        Verdict::RuntimeError(RuntimeFault::Harness(fault)) => Some(fault.to_string()),
        Verdict::Failed(mismatch) => Some(describe_mismatch(mismatch)),
    }
}

fn describe_mismatch(mismatch: &Mismatch) -> String {
    match mismatch.stream {
        Stream::Stdout => format!(
            "ans: {} stdout: {}",
            mismatch.expected,
            mismatch.actual.as_deref().unwrap_or("")
        ),
        Stream::Stderr => format!(
            "Expected \"{}\" in stderr but got {}",
            mismatch.expected,
            mismatch.actual.as_deref().unwrap_or("nothing")
        ),
    }
}

/// `Passed {ac}/{total}` followed by the passed-time line.
pub fn summary_lines(totals: &RunTotals) -> [String; 2] {
    [
        format!("Passed {}/{}", totals.passed, totals.total),
        format!("Total Time for Passed Cases: {:.1} ms", totals.passed_millis()),
    ]
}
