//! Comparison keys used by [`Distinct`](crate::distinct::Distinct)
//!
//! A fingerprint decides when two elements count as "the same":
//!
//! - scalars (strings, chars, integers, floats, booleans) compare by their
//!   literal value tagged with their kind, so the integer `1`, the float
//!   `1.0` and the string `"1"` are three different elements;
//! - shared objects (`Rc`, `Arc`) compare by identity;
//! - structured values (arrays, `Vec`, tuples, `Option`, maps) compare by the
//!   fingerprints of their parts. A present `Option` is tagged, so `None`,
//!   `Some(None)` and `Some(())` all differ.
//!
//! Owned structures cannot be cyclic, and the shared pointers that could close
//! a cycle stop recursion at their identity, so fingerprinting always
//! terminates.
//!
//! An identity fingerprint holds a clone of its pointer. While it sits in a
//! seen-set the allocation stays alive, so its address cannot be handed to a
//! different object during the same pass.

use std::any::Any;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    /// `()` and `None`
    Null,
    Bool(bool),
    /// Every integer width shares this tag
    Int(i128),
    /// Raw bits, so `0.0` and `-0.0` differ and `NaN` equals itself
    Float(u64),
    Char(char),
    Str(Box<str>),
    Identity(SharedIdentity),
    /// Payload of a `Some`
    Present(Box<Fingerprint>),
    Seq(Box<[Fingerprint]>),
    Map(Box<[(Fingerprint, Fingerprint)]>),
}

/// Address of a shared allocation, owning a reference that keeps it alive
///
/// Equality and hashing look at the address only.
#[derive(Clone)]
pub struct SharedIdentity {
    address: usize,
    _owner: Rc<dyn Any>,
}

impl SharedIdentity {
    fn new(address: *const (), owner: Rc<dyn Any>) -> Self {
        SharedIdentity {
            address: address as usize,
            _owner: owner,
        }
    }

    pub fn address(&self) -> usize {
        self.address
    }
}

impl PartialEq for SharedIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for SharedIdentity {}

impl Hash for SharedIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Debug for SharedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedIdentity({:#x})", self.address)
    }
}

/// Types that can produce a [`Fingerprint`]
///
/// Implement this for your own element types to use them with `distinct()`.
/// Enums holding mixed kinds usually delegate to the payload:
///
/// ```
/// use fluentseq::fingerprint::{Fingerprint, Fingerprinted};
///
/// enum Cell {
///     Number(i64),
///     Text(String),
/// }
///
/// impl Fingerprinted for Cell {
///     fn fingerprint(&self) -> Fingerprint {
///         match self {
///             Cell::Number(n) => n.fingerprint(),
///             Cell::Text(s) => s.fingerprint(),
///         }
///     }
/// }
///
/// assert_ne!(Cell::Number(1).fingerprint(), Cell::Text("1".into()).fingerprint());
/// ```
pub trait Fingerprinted {
    fn fingerprint(&self) -> Fingerprint;
}

macro_rules! int_fingerprint {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Fingerprinted for $ty {
                fn fingerprint(&self) -> Fingerprint {
                    Fingerprint::Int(i128::from(*self))
                }
            }
        )*
    };
}

int_fingerprint!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl Fingerprinted for isize {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Int(*self as i128)
    }
}

impl Fingerprinted for usize {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Int(*self as i128)
    }
}

impl Fingerprinted for f64 {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Float(self.to_bits())
    }
}

impl Fingerprinted for f32 {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Float(f64::from(*self).to_bits())
    }
}

impl Fingerprinted for bool {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Bool(*self)
    }
}

impl Fingerprinted for char {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Char(*self)
    }
}

impl Fingerprinted for str {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Str(self.into())
    }
}

impl Fingerprinted for String {
    fn fingerprint(&self) -> Fingerprint {
        self.as_str().fingerprint()
    }
}

impl Fingerprinted for () {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Null
    }
}

impl<T: Fingerprinted + ?Sized> Fingerprinted for &T {
    fn fingerprint(&self) -> Fingerprint {
        (**self).fingerprint()
    }
}

impl<T: Fingerprinted + ?Sized> Fingerprinted for Box<T> {
    fn fingerprint(&self) -> Fingerprint {
        (**self).fingerprint()
    }
}

impl<T: ?Sized + 'static> Fingerprinted for Rc<T> {
    fn fingerprint(&self) -> Fingerprint {
        let owner: Rc<dyn Any> = Rc::new(Rc::clone(self));
        Fingerprint::Identity(SharedIdentity::new(Rc::as_ptr(self).cast(), owner))
    }
}

impl<T: ?Sized + 'static> Fingerprinted for Arc<T> {
    fn fingerprint(&self) -> Fingerprint {
        let owner: Rc<dyn Any> = Rc::new(Arc::clone(self));
        Fingerprint::Identity(SharedIdentity::new(Arc::as_ptr(self).cast(), owner))
    }
}

impl<T: Fingerprinted> Fingerprinted for Option<T> {
    fn fingerprint(&self) -> Fingerprint {
        match self {
            Some(value) => Fingerprint::Present(Box::new(value.fingerprint())),
            None => Fingerprint::Null,
        }
    }
}

fn seq<'t, T: Fingerprinted + 't>(items: impl IntoIterator<Item = &'t T>) -> Fingerprint {
    Fingerprint::Seq(items.into_iter().map(Fingerprinted::fingerprint).collect())
}

impl<T: Fingerprinted> Fingerprinted for [T] {
    fn fingerprint(&self) -> Fingerprint {
        seq(self)
    }
}

impl<T: Fingerprinted, const N: usize> Fingerprinted for [T; N] {
    fn fingerprint(&self) -> Fingerprint {
        seq(self)
    }
}

impl<T: Fingerprinted> Fingerprinted for Vec<T> {
    fn fingerprint(&self) -> Fingerprint {
        seq(self)
    }
}

impl<T: Fingerprinted> Fingerprinted for VecDeque<T> {
    fn fingerprint(&self) -> Fingerprint {
        seq(self)
    }
}

impl<K: Fingerprinted, V: Fingerprinted> Fingerprinted for BTreeMap<K, V> {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::Map(
            self.iter()
                .map(|(key, value)| (key.fingerprint(), value.fingerprint()))
                .collect(),
        )
    }
}

macro_rules! tuple_fingerprint {
    ($($name:ident),+) => {
        impl<$($name: Fingerprinted),+> Fingerprinted for ($($name,)+) {
            #[allow(non_snake_case)]
            fn fingerprint(&self) -> Fingerprint {
                let ($($name,)+) = self;
                Fingerprint::Seq(Box::new([$($name.fingerprint()),+]))
            }
        }
    };
}

tuple_fingerprint!(A);
tuple_fingerprint!(A, B);
tuple_fingerprint!(A, B, C);
tuple_fingerprint!(A, B, C, D);
tuple_fingerprint!(A, B, C, D, E);
tuple_fingerprint!(A, B, C, D, E, F);
