//! Perception — vision cone, attenuated hearing, noise broadcast
//!
//! Сенсоры — чистые функции (без кеша, безопасно звать каждый тик).
//! Результаты складываются в `Perception` компонент, дальше их читает AI.
//!
//! Raycast абстрагирован через `RayCaster`:
//! - `ObstacleField` — headless сферы (тесты, сервер без физики)
//! - `RapierRayCaster` — bevy_rapier3d query pipeline, если Rapier world есть

use bevy::prelude::*;

pub mod hearing;
pub mod noise;
pub mod raycast;
pub mod systems;
pub mod vision;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod perception_tests;

pub use hearing::HearingSensor;
pub use noise::{make_noise, NoiseEmitter, NoiseEvent};
pub use raycast::{BodyCollider, ObstacleField, RapierRayCaster, RayCaster, RayHit, SphereCollider};
pub use systems::{listen_for_noise, update_vision};
pub use vision::VisionSensor;

/// Что агент воспринял на текущем тике
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Perception {
    /// Цель в конусе зрения и не перекрыта
    pub target_visible: bool,
    /// Последний услышанный шум (позиция)
    pub last_heard: Option<Vec3>,
}

/// System sets perception-фазы (AI читает после них)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PerceptionSet;

/// Perception Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. update_vision — vision cone + occlusion raycast
/// 2. listen_for_noise — NoiseEvent → Perception.last_heard + Investigate point
pub struct PerceptionPlugin;

impl Plugin for PerceptionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<NoiseEvent>()
            .init_resource::<ObstacleField>()
            .add_systems(
                FixedUpdate,
                (update_vision, listen_for_noise)
                    .chain()
                    .in_set(PerceptionSet),
            );
    }
}
