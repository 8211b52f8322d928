//! FlockCoordinator — spatial index популяции на текущий тик

use bevy::prelude::*;
use crate::spatial::SpatialIndex;
use super::steering::BoidSnapshot;

/// Resource: index + снимки боидов (живут один тик)
#[derive(Resource, Debug, Clone)]
pub struct FlockCoordinator {
    index: SpatialIndex<BoidSnapshot>,
}

impl Default for FlockCoordinator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CELL_SIZE)
    }
}

impl FlockCoordinator {
    pub fn new(cell_size: f32) -> Self {
        Self {
            index: SpatialIndex::new(cell_size),
        }
    }

    /// Полный rebuild: clear + register каждого боида
    ///
    /// Без инкрементального обновления — stale entries невозможны.
    pub fn rebuild(&mut self, boids: impl IntoIterator<Item = BoidSnapshot>) {
        self.index.clear();
        for boid in boids {
            self.index.register(boid.position, boid);
        }
    }

    /// Соседи агента: grid query → без себя → точная distance ≤ radius
    pub fn neighbors(&self, agent: Entity, position: Vec3, radius: f32) -> Vec<BoidSnapshot> {
        self.index
            .nearby_iter(position, radius)
            .filter(|other| other.entity != agent && other.position.distance(position) <= radius)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &SpatialIndex<BoidSnapshot> {
        &self.index
    }
}
