//! Harness error types
//!
//! Two layers:
//! - [`ExecError`] is a fault inside the harness while launching or talking to one child. It never
//!   escapes a case; the engine folds it into a `RuntimeError` classification.
//! - [`HarnessError`] is a run-level fault (an unreadable source, unbalanced sources under strict
//!   pairing, a broken report stream). These stop the run and surface at the CLI boundary.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

use super::case::Stream;

/// Faults raised by the harness itself while running a single case.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch `{shell}`: {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to collect child output: {0}")]
    Wait(#[source] std::io::Error),

    #[error("{stream} is not valid UTF-8: {source}")]
    Decode {
        stream: Stream,
        #[source]
        source: FromUtf8Error,
    },
}

/// Faults that abort the whole run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("cannot read case source {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{} has {cases} line(s) but {} has {answers}",
        cases_path.display(),
        answers_path.display()
    )]
    Unbalanced {
        cases_path: PathBuf,
        cases: usize,
        answers_path: PathBuf,
        answers: usize,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
