//! # Reporter Capability
//!
//! Every check in this crate reports through a [`Reporter`]: a caller-owned
//! object that records non-fatal failures, fatal failures and helper marks.
//! The checks never inspect or mutate a reporter beyond those three calls.

use std::fmt;
use std::panic::Location;

use serde::Serialize;

/// The minimal interface every assertion needs.
///
/// Implement it for whatever the test suite reports through. The crate ships
/// two implementations: [`Recorder`](crate::Recorder), which captures calls
/// for inspection, and [`TestReporter`](crate::TestReporter), which prints to
/// stderr and fails the current `#[test]`.
pub trait Reporter {
    /// Records a failure and lets the test continue.
    fn record_failure(&mut self, message: fmt::Arguments<'_>);

    /// Records a failure after which the test must not continue.
    fn record_fatal(&mut self, message: fmt::Arguments<'_>);

    /// Marks the calling check as a helper frame. `caller` is the line in the
    /// test that invoked the check, so failures can be attributed to it.
    fn mark_helper(&mut self, caller: &'static Location<'static>);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record_failure(&mut self, message: fmt::Arguments<'_>) {
        (**self).record_failure(message)
    }

    fn record_fatal(&mut self, message: fmt::Arguments<'_>) {
        (**self).record_fatal(message)
    }

    fn mark_helper(&mut self, caller: &'static Location<'static>) {
        (**self).mark_helper(caller)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn record_failure(&mut self, message: fmt::Arguments<'_>) {
        (**self).record_failure(message)
    }

    fn record_fatal(&mut self, message: fmt::Arguments<'_>) {
        (**self).record_fatal(message)
    }

    fn mark_helper(&mut self, caller: &'static Location<'static>) {
        (**self).mark_helper(caller)
    }
}

// ============================================================================
// FAILURE RECORDS
// ============================================================================

/// How a failure affects the rest of the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported through [`Reporter::record_failure`].
    Error,
    /// Reported through [`Reporter::record_fatal`].
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "FAIL",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source position of the test line a failure is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl From<&Location<'_>> for CallSite {
    fn from(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A single recorded failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub severity: Severity,
    pub message: String,
    pub location: Option<CallSite>,
}

impl Failure {
    pub fn new(severity: Severity, message: fmt::Arguments<'_>, caller: Option<&Location<'_>>) -> Self {
        Self {
            severity,
            message: message.to_string(),
            location: caller.map(CallSite::from),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} [{}]: {}", self.severity, location, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}
