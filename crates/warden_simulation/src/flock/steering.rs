//! Steering forces (чистые функции, без ECS)
//!
//! Все силы ограничены `max_force`. Соседи приходят уже отфильтрованными
//! по perception radius (FlockCoordinator::neighbors).

use bevy::prelude::*;
use super::components::{Boid, FlockSettings, SteeringWeights};

/// Ниже этой скорости heading не трогаем (иначе дрожит около нуля)
pub const HEADING_EPSILON: f32 = 0.1;

/// Read-only снимок боида на тик (то, что видят соседи)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidSnapshot {
    pub entity: Entity,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Агент, для которого считаем силы
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringAgent {
    pub position: Vec3,
    pub velocity: Vec3,
    pub max_speed: f32,
    pub max_force: f32,
    pub perception_radius: f32,
}

impl SteeringAgent {
    pub fn from_boid(position: Vec3, boid: &Boid) -> Self {
        Self {
            position,
            velocity: boid.velocity,
            max_speed: boid.max_speed,
            max_force: boid.max_force,
            perception_radius: boid.perception_radius,
        }
    }
}

/// desired velocity → steering сила (desired - velocity, clamp max_force)
fn steer(agent: &SteeringAgent, desired: Vec3) -> Vec3 {
    (desired - agent.velocity).clamp_length_max(agent.max_force)
}

/// Seek: к точке на max_speed
pub fn seek(agent: &SteeringAgent, target: Vec3) -> Vec3 {
    let desired = (target - agent.position).normalize_or_zero() * agent.max_speed;
    steer(agent, desired)
}

/// Separation: от соседей, ближние толкают сильнее (вес 1/distance)
///
/// Desired velocity = среднее `dir / distance` × max_speed, поэтому чем ближе
/// сосед, тем сильнее сила (до лимита max_force).
/// Соседи на distance 0 (та же точка) направления не дают — пропускаем.
pub fn separation(agent: &SteeringAgent, neighbors: &[BoidSnapshot]) -> Vec3 {
    let mut push = Vec3::ZERO;
    let mut count = 0;

    for other in neighbors {
        let diff = agent.position - other.position;
        let distance = diff.length();

        if distance > 0.0 && distance <= agent.perception_radius {
            push += diff.normalize() / distance;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::ZERO;
    }

    push /= count as f32;
    steer(agent, push * agent.max_speed)
}

/// Alignment: к средней скорости соседей
pub fn alignment(agent: &SteeringAgent, neighbors: &[BoidSnapshot]) -> Vec3 {
    if neighbors.is_empty() {
        return Vec3::ZERO;
    }

    let average = neighbors.iter().map(|n| n.velocity).sum::<Vec3>() / neighbors.len() as f32;
    steer(agent, average.normalize_or_zero() * agent.max_speed)
}

/// Cohesion: seek к центроиду соседей
pub fn cohesion(agent: &SteeringAgent, neighbors: &[BoidSnapshot]) -> Vec3 {
    if neighbors.is_empty() {
        return Vec3::ZERO;
    }

    let centroid = neighbors.iter().map(|n| n.position).sum::<Vec3>() / neighbors.len() as f32;
    seek(agent, centroid)
}

/// Bounds: вышли за `radius - margin` от центра → seek к центру ×2
pub fn bounds_avoidance(agent: &SteeringAgent, center: Vec3, radius: f32, margin: f32) -> Vec3 {
    if agent.position.distance(center) > radius - margin {
        seek(agent, center) * 2.0
    } else {
        Vec3::ZERO
    }
}

/// Итоговое ускорение тика: взвешенная сумма четырёх сил
pub fn flocking_acceleration(
    agent: &SteeringAgent,
    neighbors: &[BoidSnapshot],
    settings: &FlockSettings,
) -> Vec3 {
    let SteeringWeights {
        separation: w_separation,
        alignment: w_alignment,
        cohesion: w_cohesion,
        bounds: w_bounds,
    } = settings.weights;

    separation(agent, neighbors) * w_separation
        + alignment(agent, neighbors) * w_alignment
        + cohesion(agent, neighbors) * w_cohesion
        + bounds_avoidance(agent, settings.center, settings.radius, settings.bounds_margin) * w_bounds
}

/// Результат интеграции одного тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integration {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Новое направление взгляда (None → оставить как есть)
    pub heading: Option<Vec3>,
}

/// Semi-implicit Euler: v += a·dt (clamp max_speed), p += v·dt
pub fn integrate(position: Vec3, velocity: Vec3, acceleration: Vec3, max_speed: f32, delta: f32) -> Integration {
    let velocity = (velocity + acceleration * delta).clamp_length_max(max_speed);
    let position = position + velocity * delta;

    let heading = if velocity.length() > HEADING_EPSILON {
        Some(velocity.normalize())
    } else {
        None
    };

    Integration {
        position,
        velocity,
        heading,
    }
}
