//! Perception systems (vision poll + noise listeners).

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;
use crate::ai::{BehaviorMachine, BehaviorTarget};
use super::{
    BodyCollider, HearingSensor, NoiseEvent, ObstacleField, Perception, RapierRayCaster,
    SphereCollider, VisionSensor,
};

/// Система: vision cone → Perception.target_visible
///
/// Backend raycast:
/// - Rapier context есть (host подключил физику) → RapierRayCaster
/// - иначе ObstacleField (static obstacles + BodyCollider всех агентов этого тика)
pub fn update_vision(
    mut observers: Query<(Entity, &Transform, &VisionSensor, &BehaviorTarget, &mut Perception)>,
    targets: Query<&Transform>,
    bodies: Query<(Entity, &Transform, &BodyCollider)>,
    mut field: ResMut<ObstacleField>,
    rapier: ReadRapierContext,
) {
    field.set_bodies(bodies.iter().map(|(entity, transform, body)| SphereCollider {
        center: transform.translation,
        radius: body.radius,
        owner: Some(entity),
    }));

    let rapier_context = rapier.single().ok();

    for (entity, transform, sensor, target, mut perception) in observers.iter_mut() {
        // Цель без Transform (despawned) = "ничего не видим"
        let target = target
            .entity()
            .and_then(|t| targets.get(t).ok().map(|tt| (t, tt.translation)));
        let forward = transform.forward().as_vec3();

        let visible = match rapier_context.as_ref() {
            Some(context) => sensor.can_see(
                entity,
                transform.translation,
                forward,
                target,
                &RapierRayCaster::new(context),
            ),
            None => sensor.can_see(entity, transform.translation, forward, target, &*field),
        };

        if perception.target_visible != visible {
            crate::log(&format!(
                "👁️ {:?} target {}",
                entity,
                if visible { "spotted" } else { "lost" }
            ));
            perception.target_visible = visible;
        }
    }
}

/// Система: NoiseEvent → слушатели с HearingSensor
///
/// Услышал → Perception.last_heard + point of interest для Investigate.
/// Переход в Investigate здесь НЕ делается (это решение TransitionPolicy).
pub fn listen_for_noise(
    mut noise_events: EventReader<NoiseEvent>,
    mut listeners: Query<(
        Entity,
        &Transform,
        &HearingSensor,
        &mut Perception,
        Option<&mut BehaviorMachine>,
    )>,
) {
    let noises: Vec<NoiseEvent> = noise_events.read().copied().collect();
    if noises.is_empty() {
        return;
    }

    for (entity, transform, hearing, mut perception, mut machine) in listeners.iter_mut() {
        for noise in &noises {
            if !hearing.can_hear(transform.translation, noise.position, noise.level) {
                continue;
            }

            perception.last_heard = Some(noise.position);
            if let Some(machine) = machine.as_mut() {
                machine.set_investigation_point(noise.position);
            }

            crate::log(&format!(
                "🔊 {:?} heard noise at {:?} (attenuated {:.1})",
                entity,
                noise.position,
                hearing.attenuated_level(transform.translation, noise.position, noise.level)
            ));
        }
    }
}
