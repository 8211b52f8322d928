//! Flock systems (rebuild → steering → integration).

use bevy::prelude::*;
use super::components::{Boid, FlockSettings};
use super::coordinator::FlockCoordinator;
use super::steering::{flocking_acceleration, integrate, BoidSnapshot, SteeringAgent};

/// Система: rebuild spatial index (ПЕРВАЯ во flock chain)
pub fn rebuild_flock_index(
    mut coordinator: ResMut<FlockCoordinator>,
    boids: Query<(Entity, &Transform, &Boid)>,
) {
    coordinator.rebuild(boids.iter().map(|(entity, transform, boid)| BoidSnapshot {
        entity,
        position: transform.translation,
        velocity: boid.velocity,
    }));
}

/// Система: flocking силы → Boid.acceleration
///
/// Соседи читаются из снимка тика (не из живых компонентов),
/// каждый боид пишет только свою acceleration → безопасно параллелить.
pub fn apply_flocking(
    coordinator: Res<FlockCoordinator>,
    settings: Res<FlockSettings>,
    mut boids: Query<(Entity, &Transform, &mut Boid)>,
) {
    boids.par_iter_mut().for_each(|(entity, transform, mut boid)| {
        let agent = SteeringAgent::from_boid(transform.translation, &boid);
        let neighbors = coordinator.neighbors(entity, agent.position, agent.perception_radius);

        boid.acceleration += flocking_acceleration(&agent, &neighbors, &settings);
    });
}

/// Система: интеграция velocity → Transform
///
/// Acceleration обнуляется каждый тик (силы мгновенные, не копятся).
pub fn integrate_boids(
    mut boids: Query<(&mut Transform, &mut Boid)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut boid) in boids.iter_mut() {
        let step = integrate(
            transform.translation,
            boid.velocity,
            boid.acceleration,
            boid.max_speed,
            delta,
        );

        transform.translation = step.position;
        boid.velocity = step.velocity;
        boid.acceleration = Vec3::ZERO;

        if let Some(heading) = step.heading {
            transform.look_to(heading, Vec3::Y);
        }
    }
}
