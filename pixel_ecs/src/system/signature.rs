//! Utilities for signatures of *entities* and *systems* in ECS.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::component::{Component, ComponentId, MAX_COMPONENTS};

const _: () = assert!(MAX_COMPONENTS <= u32::BITS as usize);

/// Fixed-width set of component types.
///
/// For an entity bit *i* is set if the entity has component with id *i*.
/// For a system bit *i* is set if the system requires component with id *i*.
///
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Signature(u32);

impl Signature {
    /// Signature without any component type.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty signature.
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a signature holding every type of the set `C`.
    pub fn of<C>() -> Self
    where
        C: ComponentSet,
    {
        C::signature()
    }

    /// Turns on the bit of component type `id`.
    pub fn set(&mut self, id: ComponentId) {
        self.0 |= 1 << id.index();
    }

    /// Turns off the bit of component type `id`.
    pub fn unset(&mut self, id: ComponentId) {
        self.0 &= !(1 << id.index());
    }

    /// Turns off all bits.
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Returns `true` if the bit of component type `id` is on.
    pub const fn test(self, id: ComponentId) -> bool {
        self.0 & (1 << id.index()) != 0
    }

    /// Returns a copy with the bit of component type `T` turned on.
    pub fn with<T>(mut self) -> Self
    where
        T: Component,
    {
        self.set(ComponentId::of::<T>());
        self
    }

    /// Returns `true` if every bit of `other` is on in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no bit is on.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count of component types in this signature.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = MAX_COMPONENTS)
    }
}

/// Set of component types which can be turned into [`Signature`].
///
/// Implemented for the unit type and for tuples of components
/// up to 8 elements.
///
pub trait ComponentSet {
    fn signature() -> Signature;
}

// Generate implementations of ComponentSet for empty tuple (unit type)
// and for tuples up to 8 elements.

impl ComponentSet for () {
    fn signature() -> Signature {
        Signature::EMPTY
    }
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name),+> ComponentSet for ($($name,)+)
        where
            $($name: Component,)+
        {
            fn signature() -> Signature {
                Signature::EMPTY $(.with::<$name>())+
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);
