//! # Error Wrap-Chains
//!
//! An error together with the errors it wraps, reached through
//! [`Error::source`], forms its wrap-chain. `is_error` and `as_error` search
//! that chain: the first by identity or equality, the second by type.

use std::error::Error;
use std::ptr;

use crate::format::type_name_of;

/// Uniform `&dyn Error` view over concrete and boxed-out error types.
pub trait AsDynError {
    fn as_dyn_error(&self) -> &(dyn Error + 'static);
}

impl<E: Error + 'static> AsDynError for E {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

impl AsDynError for dyn Error + 'static {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

impl AsDynError for dyn Error + Send + Sync + 'static {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

/// Iterator over an error and every error it wraps, outermost first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Chain<'a> {
    pub fn new(head: &'a (dyn Error + 'static)) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Decides whether a link of a wrap-chain is a given error.
///
/// Every `PartialEq` error gets the default rule: the link has the same
/// type and is either the very same object or compares equal. Error types
/// without `PartialEq` can implement it themselves, which also lets them
/// match links of other types.
pub trait ErrorIs: Error + 'static {
    fn is_match(&self, link: &(dyn Error + 'static)) -> bool;
}

impl<E: Error + PartialEq + 'static> ErrorIs for E {
    fn is_match(&self, link: &(dyn Error + 'static)) -> bool {
        link.downcast_ref::<E>()
            .is_some_and(|found| ptr::eq(found, self) || found == self)
    }
}

/// Whether some link of `got`'s chain is `want`.
pub fn chain_contains<W>(got: &(dyn Error + 'static), want: &W) -> bool
where
    W: ErrorIs + ?Sized,
{
    Chain::new(got).any(|link| want.is_match(link))
}

// ============================================================================
// AS_ERROR TARGETS
// ============================================================================

/// An output slot for [`as_error`](crate::as_error).
///
/// A target accepts chain links it can hold and keeps the first one
/// assigned. Slots whose [`holds_errors`](Target::holds_errors) is false can
/// never hold an error; passing one to `as_error` is a contract violation.
pub trait Target<'a> {
    /// Name of the type a match is stored as, for failure messages.
    fn target_type(&self) -> String;

    fn holds_errors(&self) -> bool {
        true
    }

    /// Stores `link` if the slot can hold it. Returns whether it did.
    fn try_assign(&mut self, link: &'a (dyn Error + 'static)) -> bool;
}

impl<'a, T: Error + 'static> Target<'a> for Option<&'a T> {
    fn target_type(&self) -> String {
        format!("&{}", type_name_of::<T>())
    }

    fn try_assign(&mut self, link: &'a (dyn Error + 'static)) -> bool {
        match link.downcast_ref::<T>() {
            Some(found) => {
                *self = Some(found);
                true
            }
            None => false,
        }
    }
}

/// The generic container: holds whichever error it is offered first.
impl<'a> Target<'a> for Option<&'a (dyn Error + 'static)> {
    fn target_type(&self) -> String {
        "&dyn Error".to_string()
    }

    fn try_assign(&mut self, link: &'a (dyn Error + 'static)) -> bool {
        *self = Some(link);
        true
    }
}

/// Stores the first link of `got`'s chain that `target` can hold.
pub fn chain_find<'a, S>(got: &'a (dyn Error + 'static), target: &mut S) -> bool
where
    S: Target<'a> + ?Sized,
{
    Chain::new(got).any(|link| target.try_assign(link))
}
