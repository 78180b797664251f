//! Systems of the demo simulation.

use pixel_ecs::{Coordinator, DeltaTime, Subscription, System, SystemResult};

use crate::components::{RigidBody, Transform};

/// Standard gravity, in m/s².
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// Moves every entity with [`Transform`] and [`RigidBody`] by its velocity.
pub struct PhysicsSystem {
    subscription: Subscription,
    gravity: f64,
}

impl PhysicsSystem {
    pub fn new(gravity: f64) -> Self {
        let mut subscription = Subscription::new();
        subscription
            .require_component::<Transform>()
            .require_component::<RigidBody>();
        Self {
            subscription,
            gravity,
        }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl System for PhysicsSystem {
    fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    fn subscription_mut(&mut self) -> &mut Subscription {
        &mut self.subscription
    }

    fn update(&mut self, coordinator: &mut Coordinator, delta_time: DeltaTime) -> SystemResult {
        let dt = delta_time.as_secs_f32();
        for &entity in self.subscription.entities() {
            let velocity = coordinator.get_component::<RigidBody>(entity)?.velocity;
            let transform = coordinator.get_component_mut::<Transform>(entity)?;
            transform.position += velocity * dt;

            log::trace!(
                "entity {} moved to ({}, {})",
                entity,
                transform.position.x,
                transform.position.y,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ultraviolet::Vec2;

    use super::*;

    #[test]
    fn test_requirements() {
        let system = PhysicsSystem::default();
        assert_eq!(system.gravity(), DEFAULT_GRAVITY);
        assert_eq!(system.signature().len(), 2);
    }

    #[test]
    fn test_integration() {
        let mut coordinator = Coordinator::new();
        coordinator.add_system(PhysicsSystem::default());

        let moving = coordinator.create();
        coordinator.add_component(moving, Transform::default());
        coordinator.add_component(
            moving,
            RigidBody::new(Vec2::new(2.0, -4.0), Vec2::zero(), 1.0),
        );
        let still = coordinator.create();
        coordinator.add_component(still, Transform::default());
        coordinator.update();

        coordinator
            .run_system::<PhysicsSystem>(Duration::from_millis(250))
            .unwrap();

        let transform = coordinator.get_component::<Transform>(moving).unwrap();
        assert_eq!(transform.position, Vec2::new(0.5, -1.0));
        let transform = coordinator.get_component::<Transform>(still).unwrap();
        assert_eq!(transform.position, Vec2::zero());
    }
}
