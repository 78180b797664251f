//! Fixed-timestep simulation loop.

use std::thread;
use std::time::{Duration, Instant};

use pixel_ecs::{Coordinator, DeltaTime, SystemResult};
use ultraviolet::Vec2;

use crate::components::{RigidBody, Transform};
use crate::config::Config;
use crate::systems::PhysicsSystem;

/// Tag of the entity controlled by the player.
pub const PLAYER_TAG: &str = "player";

/// Owner of the ECS state which drives it tick by tick.
pub struct Game {
    config: Config,
    coordinator: Coordinator,
    ticks: u64,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            coordinator: Coordinator::new(),
            ticks: 0,
        }
    }

    /// Registers systems and spawns initial entities.
    pub fn setup(&mut self) {
        self.coordinator.add_system(PhysicsSystem::default());

        let player = self.coordinator.create();
        self.coordinator.add_component(
            player,
            Transform::new(Vec2::new(100.0, 100.0), Vec2::one(), 0.0),
        );
        self.coordinator.add_component(
            player,
            RigidBody::new(Vec2::new(30.0, 0.0), Vec2::zero(), 0.0),
        );
        self.coordinator.tag_entity(player, PLAYER_TAG);
    }

    /// Advances the simulation by one tick.
    ///
    /// Pending entity changes are flushed before any system runs.
    ///
    pub fn update(&mut self, delta_time: DeltaTime) -> SystemResult {
        self.coordinator.update();
        self.coordinator.run_system::<PhysicsSystem>(delta_time)?;
        self.ticks += 1;
        Ok(())
    }

    /// Runs the configured count of ticks in real time,
    /// each one exactly [`Config::frame_duration`] long.
    pub fn run(&mut self) -> SystemResult {
        let frame = self.config.frame_duration();
        let target = self.ticks + self.config.ticks();
        log::info!(
            "running {} ticks at {} updates per second",
            self.config.ticks(),
            self.config.fps(),
        );

        let mut previous = Instant::now();
        let mut lag = Duration::ZERO;
        while self.ticks < target {
            let current = Instant::now();
            lag += current - previous;
            previous = current;

            while lag >= frame && self.ticks < target {
                self.update(frame)?;
                lag -= frame;
            }
            thread::sleep(frame.saturating_sub(lag));
        }

        if let Some(position) = self.player_position() {
            log::info!("player stopped at ({}, {})", position.x, position.y);
        }
        Ok(())
    }

    /// Count of ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Current position of the player entity, if it exists.
    pub fn player_position(&self) -> Option<Vec2> {
        let player = self.coordinator.get_entity_by_tag(PLAYER_TAG)?;
        let transform = self.coordinator.get_component::<Transform>(player).ok()?;
        Some(transform.position)
    }
}
