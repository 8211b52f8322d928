//! Flock components & settings.

use bevy::prelude::*;
use crate::config::{SimulationConfig, SteeringConfig};

/// Boid — агент флока
///
/// Position/heading живут в Transform, здесь только кинематика и лимиты.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Boid {
    pub velocity: Vec3,
    /// Сумма сил текущего тика (сбрасывается после интеграции)
    pub acceleration: Vec3,
    /// m/s
    pub max_speed: f32,
    /// Максимальная длина одной steering силы
    pub max_force: f32,
    /// Радиус поиска соседей (метры)
    pub perception_radius: f32,
}

impl Default for Boid {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            max_speed: 5.0,
            max_force: 3.0,
            perception_radius: 2.5,
        }
    }
}

impl Boid {
    pub fn from_config(config: &SteeringConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            max_force: config.max_force,
            perception_radius: config.perception_radius,
            ..default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Веса сил (суммарное ускорение = взвешенная сумма)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SteeringWeights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
    pub bounds: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            separation: 1.5,
            alignment: 1.0,
            cohesion: 1.0,
            bounds: 1.0,
        }
    }
}

/// Resource: зона флока + веса
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct FlockSettings {
    pub center: Vec3,
    pub radius: f32,
    /// Bounds avoidance включается после `radius - bounds_margin`
    pub bounds_margin: f32,
    pub weights: SteeringWeights,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 20.0,
            bounds_margin: 2.0,
            weights: SteeringWeights::default(),
        }
    }
}

impl FlockSettings {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            center: config.flock_center(),
            radius: config.flock.radius,
            bounds_margin: config.flock.bounds_margin,
            weights: SteeringWeights {
                separation: config.steering.separation_weight,
                alignment: config.steering.alignment_weight,
                cohesion: config.steering.cohesion_weight,
                bounds: config.steering.bounds_weight,
            },
        }
    }
}
