//! Vision cone sensor

use bevy::prelude::*;
use super::raycast::RayCaster;

/// Зрение: дистанция + угол + occlusion
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct VisionSensor {
    /// Дальность зрения (метры)
    pub vision_range: f32,
    /// Полный угол конуса (градусы, 0..360)
    pub vision_angle: f32,
}

impl Default for VisionSensor {
    fn default() -> Self {
        Self {
            vision_range: 10.0,
            vision_angle: 120.0,
        }
    }
}

impl VisionSensor {
    pub fn new(vision_range: f32, vision_angle: f32) -> Self {
        Self {
            vision_range,
            vision_angle,
        }
    }

    /// Видит ли observer цель
    ///
    /// false если:
    /// - target отсутствует
    /// - дальше vision_range
    /// - угол от forward > vision_angle / 2
    /// - первый hit луча observer → target НЕ сама цель (препятствие ближе)
    ///
    /// Collider самого observer исключается из raycast.
    pub fn can_see(
        &self,
        observer: Entity,
        origin: Vec3,
        forward: Vec3,
        target: Option<(Entity, Vec3)>,
        caster: &dyn RayCaster,
    ) -> bool {
        let Some((target_entity, target_position)) = target else {
            return false;
        };

        let to_target = target_position - origin;
        let distance = to_target.length();

        // 1. Дистанция
        if distance > self.vision_range {
            return false;
        }

        // 2. Угол (нулевые векторы → направление не определено)
        let direction = to_target.normalize_or_zero();
        let forward = forward.normalize_or_zero();
        if direction == Vec3::ZERO || forward == Vec3::ZERO {
            return false;
        }

        let angle = forward.angle_between(direction).to_degrees();
        if angle > self.vision_angle / 2.0 {
            return false;
        }

        // 3. Occlusion: один луч, первый hit должен быть целью
        match caster.cast(origin, direction, self.vision_range, Some(observer)) {
            Some(hit) => hit.entity == Some(target_entity),
            None => false,
        }
    }
}
