//! # Semantic Nil
//!
//! Rust has no universal `nil`, so "is this value nil" is answered by the
//! value's runtime category. Each type reports its [`Kind`] through
//! [`Inspect`]; only the nil-able kinds are ever nil, and only when their
//! underlying reference is.
//!
//! `Option` plays the role of the generic container: `None` is the untyped
//! nil, and `Some(inner)` is nil exactly when `inner` is. That keeps a typed
//! null pointer nil even after it has been wrapped.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ptr::NonNull;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;

/// Runtime category of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Interface,
    Chan,
    Slice,
    Map,
    Func,
    Pointer,
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    Struct,
    Unit,
}

impl Kind {
    /// Whether values of this kind can hold a nil reference at all.
    pub fn is_nilable(self) -> bool {
        matches!(
            self,
            Kind::Interface | Kind::Chan | Kind::Slice | Kind::Map | Kind::Func | Kind::Pointer
        )
    }
}

/// Category introspection used by [`is_nil`].
///
/// The defaults describe a plain struct, which is never nil, so user types can
/// opt in with an empty `impl Inspect for MyType {}`.
pub trait Inspect {
    fn kind(&self) -> Kind {
        Kind::Struct
    }

    /// Whether the underlying reference is nil. Only consulted for nil-able
    /// kinds.
    fn is_nil_ref(&self) -> bool {
        false
    }
}

/// Semantic nil check.
pub fn is_nil<V: Inspect + ?Sized>(value: &V) -> bool {
    value.kind().is_nilable() && value.is_nil_ref()
}

// ============================================================================
// GENERIC CONTAINER
// ============================================================================

impl<T: Inspect> Inspect for Option<T> {
    fn kind(&self) -> Kind {
        Kind::Interface
    }

    fn is_nil_ref(&self) -> bool {
        match self {
            None => true,
            Some(inner) => is_nil(inner),
        }
    }
}

// ============================================================================
// POINTERS
// ============================================================================

impl<T: ?Sized> Inspect for *const T {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn is_nil_ref(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Inspect for *mut T {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn is_nil_ref(&self) -> bool {
        self.is_null()
    }
}

macro_rules! never_null_pointer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: ?Sized> Inspect for $ty {
                fn kind(&self) -> Kind {
                    Kind::Pointer
                }
            }
        )*
    };
}

never_null_pointer!(NonNull<T>, Box<T>, Rc<T>, Arc<T>);

impl<T: ?Sized> Inspect for &T {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }
}

impl<T: ?Sized> Inspect for &mut T {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }
}

// ============================================================================
// COLLECTIONS AND CHANNELS
// ============================================================================

macro_rules! kind_of {
    ($kind:expr => $($ty:ty),* $(,)?) => {
        $(
            impl<T> Inspect for $ty {
                fn kind(&self) -> Kind {
                    $kind
                }
            }
        )*
    };
}

kind_of!(Kind::Slice => Vec<T>, VecDeque<T>, [T]);
kind_of!(Kind::Map => HashSet<T>, BTreeSet<T>);
kind_of!(Kind::Chan => Sender<T>, SyncSender<T>, Receiver<T>);

impl<T, const N: usize> Inspect for [T; N] {
    fn kind(&self) -> Kind {
        Kind::Slice
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    fn kind(&self) -> Kind {
        Kind::Map
    }
}

impl<K, V> Inspect for BTreeMap<K, V> {
    fn kind(&self) -> Kind {
        Kind::Map
    }
}

// ============================================================================
// FUNCTIONS
// ============================================================================

macro_rules! fn_pointer {
    ($($arg:ident),*) => {
        impl<Ret, $($arg),*> Inspect for fn($($arg),*) -> Ret {
            fn kind(&self) -> Kind {
                Kind::Func
            }
        }
    };
}

fn_pointer!();
fn_pointer!(A);
fn_pointer!(A, B);
fn_pointer!(A, B, C);
fn_pointer!(A, B, C, D);

// ============================================================================
// NEVER-NIL SCALARS
// ============================================================================

macro_rules! scalar {
    ($kind:expr => $($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn kind(&self) -> Kind {
                    $kind
                }
            }
        )*
    };
}

scalar!(Kind::Bool => bool);
scalar!(Kind::Int => i8, i16, i32, i64, i128, isize);
scalar!(Kind::Uint => u8, u16, u32, u64, u128, usize);
scalar!(Kind::Float => f32, f64);
scalar!(Kind::Char => char);
scalar!(Kind::String => String, str);
scalar!(Kind::Unit => ());

// ============================================================================
// ERRORS
// ============================================================================

// An error value is never nil; an absent one is `None`.
scalar!(Kind::Struct =>
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::char::ParseCharError,
    std::net::AddrParseError,
    std::sync::mpsc::RecvError,
);

impl Inspect for dyn std::error::Error + 'static {
    fn kind(&self) -> Kind {
        Kind::Interface
    }
}

impl Inspect for dyn std::error::Error + Send + Sync + 'static {
    fn kind(&self) -> Kind {
        Kind::Interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn none_is_nil() {
        assert!(is_nil(&None::<i32>));
    }

    #[test]
    fn null_pointers_are_nil() {
        assert!(is_nil(&ptr::null::<u8>()));
        assert!(is_nil(&ptr::null_mut::<String>()));
    }

    #[test]
    fn wrapped_null_pointer_is_nil() {
        let reader: *const dyn std::io::Read = ptr::null::<std::io::Empty>();
        let boxed = Some(reader);
        assert!(is_nil(&boxed));
        assert!(is_nil(&Some(Some(ptr::null::<u8>()))));
    }

    #[test]
    fn live_references_are_not_nil() {
        let value = 5;
        assert!(!is_nil(&&value));
        assert!(!is_nil(&(&value as *const i32)));
        assert!(!is_nil(&Box::new(1)));
        assert!(!is_nil(&Some(Arc::new(1))));
    }

    #[test]
    fn errors_are_nil_only_when_absent() {
        use std::error::Error;
        use std::io;

        assert!(is_nil(&None::<io::Error>));
        assert!(is_nil(&None::<Box<dyn Error + Send + Sync>>));
        assert!(!is_nil(&Some(io::Error::new(io::ErrorKind::Other, "boom"))));
        assert!(!is_nil(&Some(std::fmt::Error)));

        let boxed: Box<dyn Error> = Box::new(std::fmt::Error);
        assert_eq!((*boxed).kind(), Kind::Interface);
        assert!(!is_nil(&*boxed));
    }

    #[test]
    fn scalars_are_never_nil() {
        assert!(!is_nil(&0));
        assert!(!is_nil(&0.0f64));
        assert!(!is_nil(""));
        assert!(!is_nil(&String::new()));
        assert!(!is_nil(&()));
        assert!(!is_nil(&false));
    }

    #[test]
    fn empty_collections_are_not_nil() {
        assert!(!is_nil(&Vec::<u8>::new()));
        assert!(!is_nil(&HashMap::<u8, u8>::new()));
        assert!(!is_nil(&[0u8; 0]));
    }

    #[test]
    fn function_pointers_are_not_nil() {
        fn f(x: i32) -> i32 {
            x
        }
        let g: fn(i32) -> i32 = f;
        assert_eq!(g.kind(), Kind::Func);
        assert!(!is_nil(&g));
        assert!(is_nil(&None::<fn(i32) -> i32>));
    }

    #[test]
    fn user_types_default_to_struct() {
        struct Point;
        impl Inspect for Point {}
        assert_eq!(Point.kind(), Kind::Struct);
        assert!(!is_nil(&Point));
    }
}
