//! Entity Component System (ECS) runtime for small real-time simulations.
//!
//! All state is owned by the [`Coordinator`]. Entity creation and destruction
//! are deferred until [`Coordinator::update`] is called, which should happen
//! once per tick before any system runs.

pub use component::{Component, ComponentId, Pool, MAX_COMPONENTS};
pub use coordinator::Coordinator;
pub use entity::Entity;
pub use error::{Error, Result};
pub use system::{ComponentSet, DeltaTime, Signature, Subscription, System, SystemResult};

pub mod component;
pub mod error;
pub mod index;
pub mod system;

mod coordinator;
mod entity;
