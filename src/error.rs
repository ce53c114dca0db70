//! Errors produced when a reporter's record is turned into a `Result`.

use miette::Diagnostic;
use thiserror::Error;

use crate::reporter::Failure;

/// One recorded failure, as a diagnostic.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(assert::failure))]
pub struct FailureReport {
    pub message: String,
    /// Where the failing check was called from.
    #[help]
    pub location: Option<String>,
}

impl From<&Failure> for FailureReport {
    fn from(failure: &Failure) -> Self {
        Self {
            message: failure.message.clone(),
            location: failure
                .location
                .as_ref()
                .map(|site| format!("called from {}", site)),
        }
    }
}

/// The outcome of a test whose reporter recorded failures.
#[derive(Debug, Error, Diagnostic)]
pub enum AssertionError {
    #[error("{} assertion(s) failed", .failures.len())]
    #[diagnostic(code(assert::failed))]
    Failed {
        #[related]
        failures: Vec<FailureReport>,
    },

    #[error("fatal: {message}")]
    #[diagnostic(
        code(assert::fatal),
        help("a setup step failed, so the rest of the test did not run")
    )]
    Fatal {
        message: String,
        #[related]
        failures: Vec<FailureReport>,
    },
}

impl AssertionError {
    /// Builds the error for a non-empty list of failures. The first fatal
    /// failure, if any, decides the variant.
    pub fn from_failures(failures: &[Failure]) -> Option<Self> {
        if failures.is_empty() {
            return None;
        }
        let reports = failures.iter().map(FailureReport::from).collect();
        Some(match failures.iter().find(|f| f.is_fatal()) {
            Some(fatal) => AssertionError::Fatal {
                message: fatal.message.clone(),
                failures: reports,
            },
            None => AssertionError::Failed { failures: reports },
        })
    }

    pub fn failures(&self) -> &[FailureReport] {
        match self {
            AssertionError::Failed { failures } | AssertionError::Fatal { failures, .. } => failures,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, AssertionError::Fatal { .. })
    }
}

#[cfg(test)]
mod tests {
    use miette::Report;

    use super::*;
    use crate::reporter::{CallSite, Severity};

    fn failure(severity: Severity, message: &str) -> Failure {
        Failure {
            severity,
            message: message.to_string(),
            location: Some(CallSite {
                file: "tests/t.rs".to_string(),
                line: 12,
                column: 5,
            }),
        }
    }

    #[test]
    fn no_failures_no_error() {
        assert!(AssertionError::from_failures(&[]).is_none());
    }

    #[test]
    fn non_fatal_failures_are_counted() {
        let err = AssertionError::from_failures(&[
            failure(Severity::Error, "first"),
            failure(Severity::Error, "second"),
        ])
        .unwrap();
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "2 assertion(s) failed");
        assert_eq!(err.failures().len(), 2);
    }

    #[test]
    fn fatal_failure_wins() {
        let err = AssertionError::from_failures(&[
            failure(Severity::Error, "first"),
            failure(Severity::Fatal, "unexpected error: abc"),
        ])
        .unwrap();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "fatal: unexpected error: abc");
    }

    #[test]
    fn report_lists_related_failures() {
        let err = AssertionError::from_failures(&[failure(Severity::Error, "assert.Nil failed")]).unwrap();
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("assert.Nil failed"));
        assert!(output.contains("called from tests/t.rs:12:5"));
    }
}
