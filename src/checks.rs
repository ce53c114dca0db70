//! # Checks
//!
//! The five assertions, plus `is_error_in` and `as_error_in` for errors that
//! may be absent. Each one marks itself as a helper with the caller's
//! location first, then performs a single comparison and makes at most one
//! call into the reporter.
//!
//! ```
//! use assert::{equals, nil, Recorder};
//!
//! let mut r = Recorder::new();
//! equals(&mut r, &3, &3);
//! nil(&mut r, &None::<u8>);
//! assert!(r.is_clean());
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::Location;

use crate::chain::{chain_contains, chain_find, AsDynError, ErrorIs, Target};
use crate::format::{type_name_of, Typed, TypedError};
use crate::nil::{is_nil, Inspect};
use crate::reporter::Reporter;

/// Something that may carry an error: an `Option` or a `Result`.
pub trait MaybeError {
    type Error: fmt::Display + ?Sized;

    fn error(&self) -> Option<&Self::Error>;
}

impl<E: fmt::Display> MaybeError for Option<E> {
    type Error = E;

    fn error(&self) -> Option<&E> {
        self.as_ref()
    }
}

impl<T, E: fmt::Display> MaybeError for Result<T, E> {
    type Error = E;

    fn error(&self) -> Option<&E> {
        self.as_ref().err()
    }
}

/// Fails the test immediately when `err` holds an error.
///
/// Meant for setup steps the rest of the test depends on.
#[track_caller]
pub fn fail_on_error<R, M>(reporter: &mut R, err: &M)
where
    R: Reporter + ?Sized,
    M: MaybeError + ?Sized,
{
    reporter.mark_helper(Location::caller());
    match err.error() {
        Some(err) => fatal(
            reporter,
            "fail_on_error",
            format_args!("unexpected error: {}", err),
        ),
        None => passed("fail_on_error"),
    }
}

/// Asserts that `value` is nil.
///
/// This is not a plain `None` check: a container holding a null pointer is
/// nil too. See [`crate::nil`](mod@crate::nil) for the rules.
#[track_caller]
pub fn nil<R, V>(reporter: &mut R, value: &V)
where
    R: Reporter + ?Sized,
    V: Inspect + fmt::Debug + ?Sized,
{
    reporter.mark_helper(Location::caller());
    if is_nil(value) {
        return passed("nil");
    }
    failed(
        reporter,
        "nil",
        format_args!("assert.Nil failed\nwant: nil\n got: {}", Typed(value)),
    );
}

/// Asserts that `got` and `want` have the same type and are equal.
///
/// Equal values of different types fail: `42i32` is not `42i64`.
#[track_caller]
pub fn equals<R, G, W>(reporter: &mut R, got: &G, want: &W)
where
    R: Reporter + ?Sized,
    G: Any + PartialEq + fmt::Debug,
    W: Any + fmt::Debug,
{
    reporter.mark_helper(Location::caller());
    let same = (want as &dyn Any)
        .downcast_ref::<G>()
        .is_some_and(|want| got == want);
    if same {
        return passed("equals");
    }
    failed(
        reporter,
        "equals",
        format_args!(
            "assert.Equals failed\nwant: {}\n got: {}",
            Typed(want),
            Typed(got)
        ),
    );
}

/// Asserts that `want` is in `got`'s wrap-chain.
///
/// A link matches as decided by [`ErrorIs`]: for `PartialEq` errors that is
/// the very same error or an equal error of the same type.
#[track_caller]
pub fn is_error<R, G, W>(reporter: &mut R, got: &G, want: &W)
where
    R: Reporter + ?Sized,
    G: AsDynError + ?Sized,
    W: ErrorIs,
{
    reporter.mark_helper(Location::caller());
    check_is_error(reporter, Some((got.as_dyn_error(), type_name_of::<G>())), want);
}

/// [`is_error`] for an `Option` or `Result` that may hold no error at all.
///
/// No error is an ordinary failure, reported as `got: nil`.
#[track_caller]
pub fn is_error_in<R, M, W>(reporter: &mut R, got: &M, want: &W)
where
    R: Reporter + ?Sized,
    M: MaybeError + ?Sized,
    M::Error: AsDynError,
    W: ErrorIs,
{
    reporter.mark_helper(Location::caller());
    let got = got
        .error()
        .map(|err| (err.as_dyn_error(), type_name_of::<M::Error>()));
    check_is_error(reporter, got, want);
}

/// Asserts that some error in `got`'s wrap-chain fits `target`, and stores
/// the first one that does in it.
///
/// # Panics
///
/// Misusing the target is a bug in the test rather than a failed assertion:
/// a `None` target panics with `errors: target must be a non-nil pointer`,
/// and a target that cannot hold errors panics with
/// `errors: *target must be interface or implement error`.
#[track_caller]
pub fn as_error<'a, R, G, S>(reporter: &mut R, got: &'a G, target: Option<&mut S>)
where
    R: Reporter + ?Sized,
    G: AsDynError + ?Sized,
    S: Target<'a> + ?Sized,
{
    reporter.mark_helper(Location::caller());
    check_as_error(reporter, Some((got.as_dyn_error(), type_name_of::<G>())), target);
}

/// [`as_error`] for an `Option` or `Result` that may hold no error at all.
///
/// The target is validated first, so the same misuse panics here too. No
/// error is an ordinary failure and leaves the target untouched.
#[track_caller]
pub fn as_error_in<'a, R, M, S>(reporter: &mut R, got: &'a M, target: Option<&mut S>)
where
    R: Reporter + ?Sized,
    M: MaybeError + ?Sized,
    M::Error: AsDynError,
    S: Target<'a> + ?Sized,
{
    reporter.mark_helper(Location::caller());
    let got = got
        .error()
        .map(|err| (err.as_dyn_error(), type_name_of::<M::Error>()));
    check_as_error(reporter, got, target);
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

type GotError<'a> = Option<(&'a (dyn Error + 'static), String)>;

fn check_is_error<R, W>(reporter: &mut R, got: GotError<'_>, want: &W)
where
    R: Reporter + ?Sized,
    W: ErrorIs,
{
    let want = TypedError {
        type_name: type_name_of::<W>(),
        error: want,
    };
    match got {
        Some((error, _)) if chain_contains(error, want.error) => passed("is_error"),
        Some((error, type_name)) => failed(
            reporter,
            "is_error",
            format_args!(
                "assert.IsError failed\nwant: {}\n got: {}",
                want,
                TypedError { type_name, error }
            ),
        ),
        None => failed(
            reporter,
            "is_error",
            format_args!("assert.IsError failed\nwant: {}\n got: nil", want),
        ),
    }
}

#[track_caller]
fn check_as_error<'a, R, S>(reporter: &mut R, got: GotError<'a>, target: Option<&mut S>)
where
    R: Reporter + ?Sized,
    S: Target<'a> + ?Sized,
{
    let Some(target) = target else {
        panic!("errors: target must be a non-nil pointer");
    };
    if !target.holds_errors() {
        panic!("errors: *target must be interface or implement error");
    }
    let got_type = match got {
        Some((error, type_name)) => {
            if chain_find(error, &mut *target) {
                return passed("as_error");
            }
            type_name
        }
        None => "nil".to_string(),
    };
    failed(
        reporter,
        "as_error",
        format_args!(
            "assert.AsError failed\nwant: {}\n got: {}",
            target.target_type(),
            got_type
        ),
    );
}

fn passed(check: &'static str) {
    tracing::trace!(check, "assertion passed");
}

fn fatal<R: Reporter + ?Sized>(reporter: &mut R, check: &'static str, message: fmt::Arguments<'_>) {
    tracing::debug!(check, %message, "setup failed");
    reporter.record_fatal(message);
}

fn failed<R: Reporter + ?Sized>(reporter: &mut R, check: &'static str, message: fmt::Arguments<'_>) {
    tracing::debug!(check, %message, "assertion failed");
    reporter.record_failure(message);
}
