//! Utilities for ECS error handling.

use thiserror::Error;

use crate::Entity;

/// Result of any ECS operation which can return an error.
pub type Result<T> = std::result::Result<T, Error>;

/// General error type of ECS.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("entity {entity} has no component of type `{component}`")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("system of type `{0}` is not registered")]
    MissingSystem(&'static str),

    #[error("cannot register component `{component}`: at most {max} component types are supported")]
    ComponentLimit {
        component: &'static str,
        max: usize,
    },
}
