//! Locomotion seam: поведение решает КУДА, тело решает КАК
//!
//! Headless: `TransformLocomotion` пишет Transform напрямую.
//! Host с физикой может подставить свой impl (collision-aware move).

use bevy::prelude::*;

pub trait Locomotion {
    fn position(&self) -> Vec3;

    /// Forward тела (Bevy: -Z)
    fn forward(&self) -> Vec3;

    /// Переместить тело в точку (шаг уже посчитан поведением)
    fn move_to(&mut self, point: Vec3);

    /// Плавный горизонтальный поворот к direction
    ///
    /// Slerp фактор = turn_rate × delta (clamp до 1).
    fn turn_towards(&mut self, direction: Vec3, turn_rate: f32, delta: f32);
}

/// Horizontal-only look rotation (None для нулевого/вертикального direction)
pub fn horizontal_look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }

    Some(Transform::IDENTITY.looking_to(flat, Vec3::Y).rotation)
}

pub struct TransformLocomotion<'a> {
    transform: &'a mut Transform,
}

impl<'a> TransformLocomotion<'a> {
    pub fn new(transform: &'a mut Transform) -> Self {
        Self { transform }
    }
}

impl Locomotion for TransformLocomotion<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn forward(&self) -> Vec3 {
        self.transform.forward().as_vec3()
    }

    fn move_to(&mut self, point: Vec3) {
        self.transform.translation = point;
    }

    fn turn_towards(&mut self, direction: Vec3, turn_rate: f32, delta: f32) {
        let Some(target) = horizontal_look_rotation(direction) else {
            return;
        };

        let t = (turn_rate * delta).clamp(0.0, 1.0);
        self.transform.rotation = self.transform.rotation.slerp(target, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_turn_faces_direction() {
        let mut transform = Transform::default();
        let mut body = TransformLocomotion::new(&mut transform);

        // rate × delta ≥ 1 → мгновенный поворот
        body.turn_towards(Vec3::new(1.0, 0.5, 0.0), 10.0, 0.5);

        assert!((body.forward() - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_partial_turn() {
        let mut transform = Transform::default();
        let mut body = TransformLocomotion::new(&mut transform);

        body.turn_towards(Vec3::X, 5.0, 0.1);

        let forward = body.forward();
        // Повернулись частично: между -Z и +X
        assert!(forward.x > 0.0 && forward.z < 0.0);
    }

    #[test]
    fn test_zero_direction_keeps_rotation() {
        let mut transform = Transform::default();
        let mut body = TransformLocomotion::new(&mut transform);

        body.turn_towards(Vec3::Y, 10.0, 1.0);
        body.move_to(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(body.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }
}
