//! # Test Harness Reporter
//!
//! [`TestReporter`] connects the checks to a plain `#[test]` function:
//! non-fatal failures are printed and remembered, fatal failures end the test
//! with a panic, and a reporter that goes out of scope with failures on record
//! fails the test.
//!
//! ```should_panic
//! use assert::{equals, TestReporter};
//!
//! let mut t = TestReporter::new();
//! equals(&mut t, &"left", &"right");
//! // `t` is dropped here and the test fails.
//! ```
//!
//! Output goes through `eprint!` so the std harness captures it like any
//! other test output.

use std::env;
use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::thread;

use difference::{Changeset, Difference};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::error::AssertionError;
use crate::recorder::Recorder;
use crate::reporter::{Failure, Reporter, Severity};

const NO_COLOR_ENV: &str = "NO_COLOR";
const NO_DIFF_ENV: &str = "ASSERT_NO_DIFF";

/// Output settings for [`TestReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterConfig {
    pub use_colors: bool,
    /// Print a character diff under failures that carry `want:` and ` got:`
    /// lines.
    pub show_diff: bool,
}

impl ReporterConfig {
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    fn buffer(&self) -> Buffer {
        if self.use_colors {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        }
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr) && env::var_os(NO_COLOR_ENV).is_none(),
            show_diff: env::var_os(NO_DIFF_ENV).is_none(),
        }
    }
}

/// Reporter for use inside `#[test]` functions.
#[derive(Debug, Default)]
pub struct TestReporter {
    config: ReporterConfig,
    recorder: Recorder,
}

impl TestReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReporterConfig) -> Self {
        Self {
            config,
            recorder: Recorder::new(),
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    pub fn failures(&self) -> &[Failure] {
        self.recorder.failures()
    }

    /// Ends the test without panicking, handing back what was recorded.
    pub fn finish(mut self) -> Result<(), AssertionError> {
        std::mem::take(&mut self.recorder).into_result()
    }

    /// Renders a failure the way it is printed.
    pub fn render(&self, failure: &Failure) -> String {
        let mut out = self.config.buffer();
        write_failure(&mut out, failure, self.config.show_diff);
        String::from_utf8_lossy(out.as_slice()).into_owned()
    }

    fn print_last(&self) {
        if let Some(failure) = self.recorder.failures().last() {
            eprint!("{}", self.render(failure));
        }
    }
}

impl Reporter for TestReporter {
    fn record_failure(&mut self, message: fmt::Arguments<'_>) {
        self.recorder.record_failure(message);
        self.print_last();
    }

    fn record_fatal(&mut self, message: fmt::Arguments<'_>) {
        self.recorder.record_fatal(message);
        self.print_last();
        panic!("{}", message);
    }

    fn mark_helper(&mut self, caller: &'static Location<'static>) {
        self.recorder.mark_helper(caller);
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.recorder.is_clean() || thread::panicking() {
            return;
        }
        if let Some(err) = AssertionError::from_failures(self.recorder.failures()) {
            tracing::debug!(failures = err.failures().len(), "failing test on drop");
            panic!("{}", err);
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn write_failure(out: &mut Buffer, failure: &Failure, show_diff: bool) {
    let tag_color = match failure.severity {
        Severity::Error => Color::Red,
        Severity::Fatal => Color::Magenta,
    };
    let _ = out.set_color(ColorSpec::new().set_fg(Some(tag_color)).set_bold(true));
    let _ = write!(out, "{}", failure.severity);
    let _ = out.reset();
    match &failure.location {
        Some(location) => {
            let _ = writeln!(out, ": {}", location);
        }
        None => {
            let _ = writeln!(out, ":");
        }
    }
    for line in failure.message.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    if !show_diff {
        return;
    }
    if let Some((want, got)) = want_got(&failure.message) {
        let changeset = Changeset::new(want, got, "");
        let _ = write!(out, "    diff: ");
        write_diff(out, &changeset.diffs);
        let _ = writeln!(out);
    }
}

/// Pulls the `want:` and ` got:` values out of a failure message, when both
/// are present and differ.
fn want_got(message: &str) -> Option<(&str, &str)> {
    let want = message.lines().find_map(|l| l.strip_prefix("want: "))?;
    let got = message.lines().find_map(|l| l.strip_prefix(" got: "))?;
    (want != got).then_some((want, got))
}

fn write_diff(out: &mut Buffer, diffs: &[Difference]) {
    for diff in diffs {
        match diff {
            Difference::Same(x) => {
                let _ = out.reset();
                let _ = write!(out, "{}", x);
            }
            Difference::Add(x) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = write!(out, "[+{}]", x);
            }
            Difference::Rem(x) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = write!(out, "[-{}]", x);
            }
        }
    }
    let _ = out.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CallSite;

    fn plain() -> ReporterConfig {
        ReporterConfig {
            use_colors: false,
            show_diff: true,
        }
    }

    #[test]
    fn want_got_needs_both_lines() {
        assert_eq!(
            want_got("assert.Equals failed\nwant: i32(24)\n got: i32(42)"),
            Some(("i32(24)", "i32(42)"))
        );
        assert_eq!(want_got("unexpected error: abc"), None);
        assert_eq!(want_got("x\nwant: a\n got: a"), None);
    }

    #[test]
    fn render_without_colors() {
        let t = TestReporter::with_config(plain());
        let failure = Failure {
            severity: Severity::Error,
            message: "assert.Equals failed\nwant: i32(24)\n got: i32(42)".to_string(),
            location: Some(CallSite {
                file: "tests/x.rs".to_string(),
                line: 4,
                column: 1,
            }),
        };
        let rendered = t.render(&failure);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "FAIL: tests/x.rs:4:1");
        assert_eq!(lines[1], "    assert.Equals failed");
        assert_eq!(lines[2], "    want: i32(24)");
        assert_eq!(lines[3], "     got: i32(42)");
        assert!(lines[4].starts_with("    diff: i32("));
        assert!(lines[4].contains("[-"));
        assert!(lines[4].contains("[+"));
        t.finish().unwrap();
    }

    #[test]
    fn render_skips_diff_when_disabled() {
        let t = TestReporter::with_config(plain().with_diff(false));
        let failure = Failure {
            severity: Severity::Fatal,
            message: "unexpected error: abc".to_string(),
            location: None,
        };
        assert_eq!(t.render(&failure), "FATAL:\n    unexpected error: abc\n");
    }

    #[test]
    fn finish_returns_recorded_failures() {
        let mut t = TestReporter::with_config(plain());
        t.record_failure(format_args!("first"));
        t.record_failure(format_args!("second"));
        let err = t.finish().unwrap_err();
        assert_eq!(err.failures().len(), 2);
    }

    #[test]
    #[should_panic(expected = "1 assertion(s) failed")]
    fn drop_with_failures_panics() {
        let mut t = TestReporter::with_config(plain());
        t.record_failure(format_args!("boom"));
    }

    #[test]
    #[should_panic(expected = "unexpected error: abc")]
    fn fatal_panics_immediately() {
        let mut t = TestReporter::with_config(plain());
        t.record_fatal(format_args!("unexpected error: {}", "abc"));
    }
}
