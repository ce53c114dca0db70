//! Rendering helpers for failure messages.

use std::any::type_name;
use std::fmt;

/// Strips module paths from a type name as produced by
/// [`std::any::type_name`], keeping generic structure intact.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    // Start of the path segment currently being written to `out`.
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}

/// Short name of `T`.
pub fn type_name_of<T: ?Sized>() -> String {
    short_type_name(type_name::<T>())
}

/// Renders `<type>(<value>)` using the value's `Debug` form.
pub struct Typed<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Debug + ?Sized> fmt::Display for Typed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", type_name_of::<T>(), self.0)
    }
}

/// Renders `<type>(<message>)` for an error, using its `Display` form.
pub struct TypedError<'a, E: ?Sized> {
    pub type_name: String,
    pub error: &'a E,
}

impl<E: fmt::Display + ?Sized> fmt::Display for TypedError<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name, self.error)
    }
}
