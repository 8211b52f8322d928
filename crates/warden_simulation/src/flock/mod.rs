//! Flocking (boids): separation / alignment / cohesion + bounds
//!
//! Популяция = entities с `Boid` + Transform.
//! FlockCoordinator держит spatial index текущего тика.
//!
//! ⚠️ Порядок — инвариант корректности, не оптимизация:
//! index полностью перестраивается ДО первого neighbor query этого тика.
//! Частично заполненный index молча недосчитывает соседей.

use bevy::prelude::*;
use crate::config::SimulationConfig;

pub mod components;
pub mod coordinator;
pub mod spawn;
pub mod steering;
pub mod systems;

#[cfg(test)]
mod coordinator_tests;

pub use components::{Boid, FlockSettings, SteeringWeights};
pub use coordinator::FlockCoordinator;
pub use spawn::{spawn_flock, spawn_flock_seeded, FlockSpawn};
pub use steering::{BoidSnapshot, SteeringAgent, HEADING_EPSILON};
pub use systems::{apply_flocking, integrate_boids, rebuild_flock_index};

/// System set flock-фазы
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlockSet;

/// Flock Plugin
///
/// Порядок выполнения (FixedUpdate, chain):
/// 1. rebuild_flock_index — clear + register всех боидов
/// 2. apply_flocking — силы от соседей (каждый боид пишет только себя)
/// 3. integrate_boids — velocity/position/heading, acceleration = 0
pub struct FlockPlugin;

impl Plugin for FlockPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(FlockCoordinator::new(config.flock.cell_size))
            .insert_resource(FlockSettings::from_config(&config))
            .add_systems(
                FixedUpdate,
                (rebuild_flock_index, apply_flocking, integrate_boids)
                    .chain()
                    .in_set(FlockSet),
            );
    }
}
