//! Components of the demo simulation.

use ultraviolet::Vec2;

/// Placement of an object in the world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f64,
}

impl Transform {
    pub fn new(position: Vec2, scale: Vec2, rotation: f64) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::one(), 0.0)
    }
}

/// Physical properties of a moving object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub mass: f64,
}

impl RigidBody {
    pub fn new(velocity: Vec2, acceleration: Vec2, mass: f64) -> Self {
        Self {
            velocity,
            acceleration,
            mass,
        }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::zero(), 0.0)
    }
}
