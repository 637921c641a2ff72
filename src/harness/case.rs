//! Cases, expected results, and the ordinal pairing of case and answer sources

use std::fmt;

/// Which phase of the suite a case belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Mode {
    /// The program must exit zero and print the expected text on stdout.
    Correctness,
    /// The program must exit non-zero and print the expected text on stderr.
    Robustness,
}

impl Mode {
    /// Both modes in the order a full run executes them.
    pub const ALL: [Mode; 2] = [Mode::Correctness, Mode::Robustness];

    /// The stream whose trimmed text is compared against the expected result.
    pub fn compared_stream(self) -> Stream {
        match self {
            Mode::Correctness => Stream::Stdout,
            Mode::Robustness => Stream::Stderr,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Correctness => "Correctness Test",
            Mode::Robustness => "Robustness Test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Correctness => write!(f, "correctness"),
            Mode::Robustness => write!(f, "robustness"),
        }
    }
}

/// A captured output stream of the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => write!(f, "stdout"),
            Stream::Stderr => write!(f, "stderr"),
        }
    }
}

/// One command line to run against the program under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    command: String,
    target: String,
}

impl Case {
    pub fn new(line: impl Into<String>) -> Self {
        let mut command = line.into();
        let trimmed_len = command.trim_end_matches(['\r', '\n']).len();
        command.truncate(trimmed_len);
        let target = target_label(&command).to_string();
        Self { command, target }
    }

    /// The invocation text, passed verbatim to the shell.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Display label for the report table.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Extract the display label from a command line.
///
/// By convention the second whitespace-separated token names the target
/// (`./fla case.tm input` -> `case.tm`). Shorter lines fall back to the first
/// token, and a blank line yields an empty label.
pub fn target_label(command: &str) -> &str {
    let mut tokens = command.split_whitespace();
    let first = tokens.next();
    tokens.next().or(first).unwrap_or("")
}

/// The expected text for one case, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected(String);

impl Expected {
    pub fn new(line: impl AsRef<str>) -> Self {
        Self(line.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A case together with its answer and 1-based position in the sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedCase {
    pub index: usize,
    pub case: Case,
    pub expected: Expected,
}

/// Which source had lines left over once the other ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surplus {
    Cases(usize),
    Answers(usize),
}

/// Lazily pairs case lines with answer lines by position.
///
/// Iteration ends as soon as either source is exhausted. Lines left in the
/// longer source are counted (draining it) and exposed via [`CasePairs::surplus`].
pub struct CasePairs<C, A> {
    cases: C,
    answers: A,
    next_index: usize,
    surplus: Option<Surplus>,
    done: bool,
}

impl<C, A> CasePairs<C, A>
where
    C: Iterator<Item = String>,
    A: Iterator<Item = String>,
{
    pub fn new(cases: impl IntoIterator<IntoIter = C>, answers: impl IntoIterator<IntoIter = A>) -> Self {
        Self {
            cases: cases.into_iter(),
            answers: answers.into_iter(),
            next_index: 1,
            surplus: None,
            done: false,
        }
    }

    /// Lines dropped from the longer source. Only meaningful after iteration has finished.
    pub fn surplus(&self) -> Option<Surplus> {
        self.surplus
    }
}

impl<C, A> Iterator for CasePairs<C, A>
where
    C: Iterator<Item = String>,
    A: Iterator<Item = String>,
{
    type Item = PairedCase;

    fn next(&mut self) -> Option<PairedCase> {
        if self.done {
            return None;
        }

        match (self.cases.next(), self.answers.next()) {
            (Some(line), Some(answer)) => {
                let paired = PairedCase {
                    index: self.next_index,
                    case: Case::new(line),
                    expected: Expected::new(answer),
                };
                self.next_index += 1;
                Some(paired)
            }
            (Some(_), None) => {
                self.done = true;
                self.surplus = Some(Surplus::Cases(1 + self.cases.by_ref().count()));
                None
            }
            (None, Some(_)) => {
                self.done = true;
                self.surplus = Some(Surplus::Answers(1 + self.answers.by_ref().count()));
                None
            }
            (None, None) => {
                self.done = true;
                None
            }
        }
    }
}
