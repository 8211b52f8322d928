//! Flock spawn: N боидов равномерно внутри сферы

use bevy::prelude::*;
use rand::Rng;
use crate::DeterministicRng;
use super::components::Boid;

/// Параметры спавна популяции
#[derive(Debug, Clone)]
pub struct FlockSpawn {
    pub count: usize,
    pub center: Vec3,
    pub radius: f32,
    /// Фиксированная высота (Y) для всех боидов
    pub height_offset: f32,
    /// Шаблон лимитов (velocity генерируется)
    pub boid: Boid,
}

impl Default for FlockSpawn {
    fn default() -> Self {
        Self {
            count: 50,
            center: Vec3::ZERO,
            radius: 20.0,
            height_offset: 1.0,
            boid: Boid::default(),
        }
    }
}

impl FlockSpawn {
    pub fn from_config(config: &crate::config::SimulationConfig) -> Self {
        Self {
            count: config.flock.boid_count,
            center: config.flock_center(),
            radius: config.flock.radius,
            height_offset: config.flock.height_offset,
            boid: Boid::from_config(&config.steering),
        }
    }
}

/// Равномерная точка внутри единичной сферы (rejection sampling)
fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

/// Случайное горизонтальное направление (XZ)
fn random_heading(rng: &mut impl Rng) -> Vec3 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

/// Spawn популяции
///
/// Позиция = center + random_in_sphere × radius, затем Y = height_offset.
/// Начальная скорость: случайное горизонтальное направление × max_speed × 0.5.
pub fn spawn_flock(world: &mut World, spawn: &FlockSpawn, rng: &mut impl Rng) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(spawn.count);

    for _ in 0..spawn.count {
        let mut position = spawn.center + random_in_unit_sphere(rng) * spawn.radius;
        position.y = spawn.height_offset;

        let velocity = random_heading(rng) * spawn.boid.max_speed * 0.5;

        let entity = world
            .spawn((
                Transform::from_translation(position),
                spawn.boid.with_velocity(velocity),
            ))
            .id();
        entities.push(entity);
    }

    crate::log_info(&format!(
        "🐦 Spawned flock: {} boids around {:?} (radius {:.1})",
        spawn.count, spawn.center, spawn.radius
    ));

    entities
}

/// Spawn через DeterministicRng resource (seeded прогоны)
pub fn spawn_flock_seeded(world: &mut World, spawn: &FlockSpawn) -> Vec<Entity> {
    if !world.contains_resource::<DeterministicRng>() {
        crate::log_warning("spawn_flock_seeded: DeterministicRng отсутствует, использую seed 0");
        world.insert_resource(DeterministicRng::new(0));
    }

    world.resource_scope(|world, mut rng: Mut<DeterministicRng>| {
        spawn_flock(world, spawn, &mut rng.rng)
    })
}
