//! Utilities for *systems* in ECS.

use std::any::Any;
use std::error::Error;
use std::time::Duration;

use crate::{Component, ComponentId, Coordinator, Entity};

pub use signature::*;

mod signature;

/// Type which represents duration of one simulation tick.
pub type DeltaTime = Duration;

/// Result of one processing pass of the system.
pub type SystemResult = Result<(), Box<dyn Error + Send + Sync + 'static>>;

/// Required components of the system and entities which currently have them.
///
/// Membership is maintained by [`Coordinator`]: entities are added
/// when their creation is flushed and removed when their destruction is flushed.
///
#[derive(Debug, Default, Clone)]
pub struct Subscription {
    signature: Signature,
    entities: Vec<Entity>,
}

impl Subscription {
    /// Creates a subscription which requires nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a subscription which requires every type of the set `C`.
    pub fn of<C>() -> Self
    where
        C: ComponentSet,
    {
        Self {
            signature: C::signature(),
            entities: Vec::new(),
        }
    }

    /// Adds component type `T` to requirements.
    pub fn require_component<T>(&mut self) -> &mut Self
    where
        T: Component,
    {
        self.signature.set(ComponentId::of::<T>());
        self
    }

    /// Signature of components required by the system.
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Entities currently handled by the system.
    ///
    /// Order of entities is not stable across removals.
    ///
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns `true` if an entity with given signature should be handled.
    pub fn is_interested(&self, signature: Signature) -> bool {
        signature.contains(self.signature)
    }

    /// Returns `true` if the entity is handled by the system.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Starts handling the entity.
    ///
    /// The entity must not be handled already.
    ///
    pub fn add_entity(&mut self, entity: Entity) {
        debug_assert!(!self.contains(entity), "entity {} is handled already", entity);
        self.entities.push(entity);
    }

    /// Stops handling the entity.
    pub fn remove_entity(&mut self, entity: Entity) {
        self.entities.retain(|&other| other != entity);
    }
}

/// Helper trait to get `&dyn Any` out of the system object.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> AsAny for T
where
    T: Any,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Objects of this trait represent *system* of ECS.
///
/// At most one instance of each system type is registered in [`Coordinator`].
///
pub trait System: AsAny + 'static {
    /// Requirements and current entities of the system.
    fn subscription(&self) -> &Subscription;

    fn subscription_mut(&mut self) -> &mut Subscription;

    /// Handles state of the current system.
    ///
    /// Do something useful with components of [`Self::system_entities`].
    /// The system is detached from the coordinator while this runs, so it
    /// cannot be looked up through the coordinator. Structural changes
    /// requested here are applied on the next [`Coordinator::update`].
    ///
    fn update(&mut self, coordinator: &mut Coordinator, delta_time: DeltaTime) -> SystemResult;

    /// Entities currently handled by the system.
    fn system_entities(&self) -> &[Entity] {
        self.subscription().entities()
    }

    /// Signature of components required by the system.
    fn signature(&self) -> Signature {
        self.subscription().signature()
    }
}
