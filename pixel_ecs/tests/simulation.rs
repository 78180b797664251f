use std::time::Duration;

use pixel_ecs::{Coordinator, DeltaTime, Entity, Subscription, System, SystemResult};

#[derive(Debug, Copy, Clone, PartialEq)]
struct Position {
    x: f64,
    y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Velocity {
    x: f64,
    y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Sprite;

struct MovementSystem {
    subscription: Subscription,
    passes: usize,
}

impl MovementSystem {
    fn new() -> Self {
        Self {
            subscription: Subscription::of::<(Position, Velocity)>(),
            passes: 0,
        }
    }
}

impl System for MovementSystem {
    fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    fn subscription_mut(&mut self) -> &mut Subscription {
        &mut self.subscription
    }

    fn update(&mut self, coordinator: &mut Coordinator, delta_time: DeltaTime) -> SystemResult {
        let dt = delta_time.as_secs_f64();
        for &entity in self.subscription.entities() {
            let velocity = *coordinator.get_component::<Velocity>(entity)?;
            let position = coordinator.get_component_mut::<Position>(entity)?;
            position.x += velocity.x * dt;
            position.y += velocity.y * dt;
        }
        self.passes += 1;
        Ok(())
    }
}

fn spawn(coordinator: &mut Coordinator, position: Position, velocity: Velocity) -> Entity {
    let entity = coordinator.create();
    coordinator.add_component(entity, position);
    coordinator.add_component(entity, velocity);
    entity
}

#[test]
fn test_single_entity_moves() {
    let mut coordinator = Coordinator::new();
    let entity = spawn(
        &mut coordinator,
        Position { x: 100.0, y: 100.0 },
        Velocity { x: 30.0, y: 0.0 },
    );
    coordinator.add_system(MovementSystem::new());
    coordinator.update();

    let system = coordinator.get_system::<MovementSystem>().unwrap();
    assert_eq!(system.system_entities(), &[entity]);

    coordinator
        .run_system::<MovementSystem>(Duration::from_secs_f64(1.0))
        .unwrap();

    let position = coordinator.get_component::<Position>(entity).unwrap();
    assert_eq!(position.x, 130.0);
    assert_eq!(position.y, 100.0);
    assert_eq!(coordinator.get_system::<MovementSystem>().unwrap().passes, 1);
}

#[test]
fn test_many_ticks_with_churn() {
    let mut coordinator = Coordinator::new();
    coordinator.add_system(MovementSystem::new());
    let dt = Duration::from_millis(500);

    let mut movers = Vec::new();
    for i in 0..4 {
        let entity = spawn(
            &mut coordinator,
            Position { x: 0.0, y: 0.0 },
            Velocity { x: i as f64, y: 1.0 },
        );
        movers.push(entity);
    }
    let decoration = coordinator.create();
    coordinator.add_component(decoration, Position { x: 5.0, y: 5.0 });
    coordinator.add_component(decoration, Sprite);

    for _ in 0..2 {
        coordinator.update();
        coordinator.run_system::<MovementSystem>(dt).unwrap();
    }

    coordinator.destroy(movers[1]);
    coordinator.update();
    coordinator.run_system::<MovementSystem>(dt).unwrap();

    let system = coordinator.get_system::<MovementSystem>().unwrap();
    let mut handled = system.system_entities().to_vec();
    handled.sort();
    assert_eq!(handled, vec![movers[0], movers[2], movers[3]]);

    assert_eq!(
        coordinator.get_component::<Position>(movers[3]).unwrap(),
        &Position { x: 4.5, y: 1.5 },
    );
    assert_eq!(
        coordinator.get_component::<Position>(decoration).unwrap(),
        &Position { x: 5.0, y: 5.0 },
    );
    assert!(coordinator.get_component::<Position>(movers[1]).is_err());

    let pool = coordinator.pool::<Position>().unwrap();
    assert_eq!(pool.len(), 4);

    let recycled = coordinator.create();
    assert_eq!(recycled, movers[1]);
    assert!(!coordinator.has_component::<Velocity>(recycled));
}
