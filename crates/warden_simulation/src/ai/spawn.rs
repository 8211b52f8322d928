//! Spawn охранника (FSM + сенсоры + policy)

use bevy::prelude::*;
use crate::config::WardenConfig;
use crate::perception::{BodyCollider, HearingSensor, Perception, VisionSensor};
use super::components::{BehaviorMachine, BehaviorOutbox, BehaviorTarget};
use super::policy::TransitionPolicy;

#[derive(Debug, Clone, Default)]
pub struct WardenSpawn {
    pub position: Vec3,
    /// Маршрут патруля (пустой → Patrol отключится с ошибкой конфигурации)
    pub waypoints: Vec<Vec3>,
    pub target: Option<Entity>,
}

pub fn spawn_warden(world: &mut World, spawn: WardenSpawn, config: &WardenConfig) -> Entity {
    let entity = world
        .spawn((
            Transform::from_translation(spawn.position),
            BehaviorMachine::new(spawn.waypoints, config),
            BehaviorTarget(spawn.target),
            BehaviorOutbox::default(),
            TransitionPolicy::from_config(config),
            VisionSensor::new(config.vision_range, config.vision_angle),
            HearingSensor::new(config.hearing_range, config.minimum_noise_level),
            Perception::default(),
            BodyCollider::default(),
        ))
        .id();

    crate::log_info(&format!(
        "🛡️ Spawned warden {:?} at {:?} (target {:?})",
        entity, spawn.position, spawn.target
    ));

    entity
}
