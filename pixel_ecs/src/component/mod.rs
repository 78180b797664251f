//! Utilities for *components* in ECS.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};

pub use pool::*;
pub(crate) use pool::AnyPool;

mod pool;

/// Maximum count of distinct component types in one process.
///
/// Equals the width of [`Signature`](crate::Signature).
///
pub const MAX_COMPONENTS: usize = 32;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be just POD (plain old data).
///
pub trait Component: Any {}

impl<T> Component for T where T: Any {}

lazy_static::lazy_static! {
    static ref REGISTRY: Mutex<HashMap<TypeId, ComponentId>> = Mutex::new(HashMap::new());
}

/// Unique identifier of the *component type* of ECS.
///
/// Identifiers are assigned on first use of each type, in increasing order,
/// and are never reused while the process is running.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Returns identifier of component type `T`, assigning a new one if needed.
    ///
    /// # Errors
    ///
    /// An error is returned if `T` is not registered yet
    /// and [`MAX_COMPONENTS`] types are registered already.
    ///
    pub fn try_of<T>() -> Result<Self>
    where
        T: Component,
    {
        let type_id = TypeId::of::<T>();
        let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(&id) = registry.get(&type_id) {
            return Ok(id);
        }

        let next = registry.len();
        if next >= MAX_COMPONENTS {
            return Err(Error::ComponentLimit {
                component: type_name::<T>(),
                max: MAX_COMPONENTS,
            });
        }
        let id = Self(next);
        registry.insert(type_id, id);
        log::info!("component `{}` registered with id {}", type_name::<T>(), next);
        Ok(id)
    }

    /// Returns identifier of component type `T` if it was assigned already.
    ///
    /// Unlike [`ComponentId::of`], never registers the type.
    ///
    pub fn get<T>() -> Option<Self>
    where
        T: Component,
    {
        let registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
        registry.get(&TypeId::of::<T>()).copied()
    }

    /// Returns identifier of component type `T`, assigning a new one if needed.
    ///
    /// # Panics
    ///
    /// Panics if there is no room for one more component type.
    /// This is a configuration error: use [`ComponentId::try_of`]
    /// at startup to detect it early.
    ///
    pub fn of<T>() -> Self
    where
        T: Component,
    {
        match Self::try_of::<T>() {
            Ok(id) => id,
            Err(error) => panic!("{}", error),
        }
    }

    /// Bit position of this component type inside of signature.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
