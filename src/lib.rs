//! # Assert
//!
//! Small assertion helpers for unit tests. Each check compares its inputs and
//! reports a failure through a caller-supplied [`Reporter`]; it never decides
//! on its own how a test fails.
//!
//! - [`fail_on_error`]: fatal failure when a setup step returned an error
//! - [`nil`](fn@nil): the value is nil (see [`nil`](mod@nil) for what counts)
//! - [`equals`]: same type, equal value
//! - [`is_error`]: an error's wrap-chain contains a given error
//! - [`as_error`]: an error's wrap-chain contains an error of a given type
//!
//! [`is_error_in`] and [`as_error_in`] take an `Option` or `Result` whose
//! error may be missing.
//!
//! ```
//! use assert::{equals, Recorder};
//!
//! let mut r = Recorder::new();
//! equals(&mut r, &42, &24);
//! assert_eq!(
//!     r.last_error(),
//!     Some("assert.Equals failed\nwant: i32(24)\n got: i32(42)")
//! );
//! ```

pub use crate::chain::{AsDynError, Chain, ErrorIs, Target};
pub use crate::checks::{
    as_error, as_error_in, equals, fail_on_error, is_error, is_error_in, nil, MaybeError,
};
pub use crate::error::{AssertionError, FailureReport};
pub use crate::harness::{ReporterConfig, TestReporter};
pub use crate::nil::{is_nil, Inspect, Kind};
pub use crate::recorder::Recorder;
pub use crate::reporter::{CallSite, Failure, Reporter, Severity};

pub mod chain;
pub mod checks;
pub mod error;
pub mod format;
pub mod harness;
pub mod nil;
pub mod recorder;
pub mod reporter;
