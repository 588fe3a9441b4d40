//! Progress and log reporting seam.
//!
//! The pipeline reports through this trait so commands and tests can choose
//! their own surface: `ConsoleUi` writes to stderr, `SilentUi` discards
//! everything.

/// Pipeline phases reported while a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Checking,
    Downloading,
    Importing,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Checking => write!(f, "Checking"),
            Phase::Downloading => write!(f, "Downloading"),
            Phase::Importing => write!(f, "Importing"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn log(&mut self, message: impl Into<String>);
    fn warn(&mut self, message: impl Into<String>);
}

/// Writes progress to stderr, keeping stdout free for command output.
#[derive(Default)]
pub struct ConsoleUi {
    last_percent: Option<u64>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        self.last_percent = None;
        eprintln!("== {} ==", phase);
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        if total == 0 {
            return;
        }
        let percent = current * 100 / total;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            eprintln!("  {}% {}", percent, label.into());
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        eprintln!("{}", message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        eprintln!("WARNING: {}", message.into());
    }
}

/// Discards all output. Used by tests and non-interactive callers.
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn log(&mut self, _message: impl Into<String>) {}
    fn warn(&mut self, _message: impl Into<String>) {}
}
