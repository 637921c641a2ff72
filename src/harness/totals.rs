//! Run-wide counters

use std::time::Duration;

use super::case::Mode;
use super::engine::ExecutionResult;

/// Counters accumulated across both modes of a run.
///
/// Owned by the driver and updated once per case; the counters never decrease.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub total: usize,
    pub passed: usize,
    /// Summed wall time of passed correctness cases.
    pub passed_time: Duration,
}

impl RunTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mode: Mode, result: &ExecutionResult) {
        self.total += 1;
        if !result.verdict.is_pass() {
            return;
        }
        self.passed += 1;
        if mode == Mode::Correctness {
            if let Some(elapsed) = result.elapsed() {
                self.passed_time += elapsed;
            }
        }
    }

    /// Passed correctness time in milliseconds.
    pub fn passed_millis(&self) -> f64 {
        self.passed_time.as_secs_f64() * 1000.0
    }
}
