//! Diagnostic sinks
//!
//! The resolver never prints on its own. Every validation failure and every
//! override warning goes through a [`Reporter`], so the same logic can run
//! under the CLI, inside an editor host, or in tests.

use colored::Colorize;
use std::cell::RefCell;

/// Severity of a reported diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Resolution aborts
    Error,
    /// Resolution continues
    Warning,
}

/// Receives resolver diagnostics
pub trait Reporter {
    /// Report a failure that aborts the current resolution
    fn report_error(&self, message: &str);

    /// Report an advisory condition; resolution proceeds
    fn report_warning(&self, message: &str);
}

/// Reporter for the command line
///
/// Prints each diagnostic to stderr for the user and records it as a
/// tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn report_error(&self, message: &str) {
        tracing::debug!(severity = "error", "{message}");
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    fn report_warning(&self, message: &str) {
        tracing::debug!(severity = "warning", "{message}");
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
}

/// Reporter that keeps every diagnostic in memory
///
/// Used by hosts that render diagnostics themselves and by tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    entries: RefCell<Vec<(Severity, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics in the order they were reported
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report_error(&self, message: &str) {
        self.entries
            .borrow_mut()
            .push((Severity::Error, message.to_string()));
    }

    fn report_warning(&self, message: &str) {
        self.entries
            .borrow_mut()
            .push((Severity::Warning, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_reporter_keeps_order_and_severity() {
        let reporter = RecordingReporter::new();
        reporter.report_warning("first");
        reporter.report_error("second");
        reporter.report_warning("third");

        assert_eq!(reporter.errors(), vec!["second".to_string()]);
        assert_eq!(
            reporter.warnings(),
            vec!["first".to_string(), "third".to_string()]
        );
        assert_eq!(reporter.entries()[1].0, Severity::Error);
    }
}
