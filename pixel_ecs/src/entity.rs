//! Utilities for *entities* in ECS.

use std::fmt;

/// Unique identifier of the *entity* of ECS.
///
/// Entity carries no data on its own: it is only a key into the storages
/// owned by [`Coordinator`](crate::Coordinator). Identifiers of destroyed
/// entities are recycled.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(usize);

impl Entity {
    /// Creates an entity handle from a raw identifier.
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Raw identifier of this entity.
    pub const fn id(self) -> usize {
        self.0
    }
}

impl From<usize> for Entity {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl From<Entity> for usize {
    fn from(entity: Entity) -> Self {
        entity.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
