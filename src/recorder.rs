//! A reporter that only remembers what it was told.
//!
//! Useful when the outcome of a check is itself under test, or when failures
//! should be collected and turned into a `Result` at the end.

use std::fmt;
use std::panic::Location;

use crate::error::AssertionError;
use crate::reporter::{CallSite, Failure, Reporter, Severity};

/// Captures every reporter call in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    failures: Vec<Failure>,
    caller: Option<&'static Location<'static>>,
    helper_calls: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Messages of the non-fatal failures.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.failures
            .iter()
            .filter(|f| !f.is_fatal())
            .map(|f| f.message.as_str())
    }

    /// Message of the last non-fatal failure.
    pub fn last_error(&self) -> Option<&str> {
        self.errors().last()
    }

    /// Message of the first fatal failure.
    pub fn fatal(&self) -> Option<&str> {
        self.failures
            .iter()
            .find(|f| f.is_fatal())
            .map(|f| f.message.as_str())
    }

    /// Location passed to the most recent `mark_helper`.
    pub fn caller(&self) -> Option<CallSite> {
        self.caller.map(CallSite::from)
    }

    pub fn helper_calls(&self) -> usize {
        self.helper_calls
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn clear(&mut self) {
        self.failures.clear();
        self.caller = None;
        self.helper_calls = 0;
    }

    pub fn into_result(self) -> Result<(), AssertionError> {
        match AssertionError::from_failures(&self.failures) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The recorded failures as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.failures)
    }

    fn push(&mut self, severity: Severity, message: fmt::Arguments<'_>) {
        self.failures.push(Failure::new(severity, message, self.caller));
    }
}

impl Reporter for Recorder {
    fn record_failure(&mut self, message: fmt::Arguments<'_>) {
        self.push(Severity::Error, message);
    }

    fn record_fatal(&mut self, message: fmt::Arguments<'_>) {
        self.push(Severity::Fatal, message);
    }

    fn mark_helper(&mut self, caller: &'static Location<'static>) {
        self.caller = Some(caller);
        self.helper_calls += 1;
    }
}
