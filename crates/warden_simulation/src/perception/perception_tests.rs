//! Tests for vision/hearing sensors and headless raycast.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::perception::{HearingSensor, ObstacleField, RayCaster, SphereCollider, VisionSensor};

    fn observer() -> Entity {
        Entity::from_raw(1)
    }

    fn target() -> Entity {
        Entity::from_raw(2)
    }

    /// Поле с телом цели (радиус 0.5)
    fn field_with_target(target_pos: Vec3) -> ObstacleField {
        let mut field = ObstacleField::default();
        field.set_bodies([
            SphereCollider {
                center: Vec3::ZERO,
                radius: 0.5,
                owner: Some(observer()),
            },
            SphereCollider {
                center: target_pos,
                radius: 0.5,
                owner: Some(target()),
            },
        ]);
        field
    }

    // Bevy forward = -Z
    const FORWARD: Vec3 = Vec3::NEG_Z;

    #[test]
    fn test_can_see_target_in_front() {
        let sensor = VisionSensor::default();
        let target_pos = Vec3::new(0.0, 0.0, -5.0);
        let field = field_with_target(target_pos);

        assert!(sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), target_pos)), &field));
    }

    #[test]
    fn test_absent_target_is_not_seen() {
        let sensor = VisionSensor::default();
        let field = ObstacleField::default();
        assert!(!sensor.can_see(observer(), Vec3::ZERO, FORWARD, None, &field));
    }

    #[test]
    fn test_target_beyond_range() {
        let sensor = VisionSensor::new(10.0, 120.0);
        let target_pos = Vec3::new(0.0, 0.0, -10.5);
        let field = field_with_target(target_pos);

        assert!(!sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), target_pos)), &field));
    }

    #[test]
    fn test_target_outside_half_angle() {
        let sensor = VisionSensor::new(10.0, 120.0);

        // 90° вправо — за пределами 60° полуугла
        let side = Vec3::new(5.0, 0.0, 0.0);
        assert!(!sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), side)), &field_with_target(side)));

        // 45° — внутри
        let diagonal = Vec3::new(3.0, 0.0, -3.0);
        assert!(sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), diagonal)), &field_with_target(diagonal)));

        // Сзади
        let behind = Vec3::new(0.0, 0.0, 5.0);
        assert!(!sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), behind)), &field_with_target(behind)));
    }

    #[test]
    fn test_obstacle_blocks_line_of_sight() {
        let sensor = VisionSensor::default();
        let target_pos = Vec3::new(0.0, 0.0, -8.0);
        let mut field = field_with_target(target_pos);
        field.add_obstacle(Vec3::new(0.0, 0.0, -4.0), 1.0);

        assert!(!sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), target_pos)), &field));
    }

    #[test]
    fn test_obstacle_behind_target_does_not_block() {
        let sensor = VisionSensor::default();
        let target_pos = Vec3::new(0.0, 0.0, -4.0);
        let mut field = field_with_target(target_pos);
        field.add_obstacle(Vec3::new(0.0, 0.0, -8.0), 1.0);

        assert!(sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), target_pos)), &field));
    }

    #[test]
    fn test_target_without_collider_is_not_seen() {
        // Луч ни во что не попал → цель не подтверждена
        let sensor = VisionSensor::default();
        let field = ObstacleField::default();
        let target_pos = Vec3::new(0.0, 0.0, -3.0);

        assert!(!sensor.can_see(observer(), Vec3::ZERO, FORWARD, Some((target(), target_pos)), &field));
    }

    #[test]
    fn test_raycast_returns_nearest_hit() {
        let field = ObstacleField::with_obstacles(vec![
            SphereCollider::obstacle(Vec3::new(0.0, 0.0, -9.0), 1.0),
            SphereCollider::obstacle(Vec3::new(0.0, 0.0, -5.0), 1.0),
        ]);

        let hit = field.cast(Vec3::ZERO, FORWARD, 20.0, None).expect("hit");
        assert!((hit.distance - 4.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);
        assert_eq!(hit.entity, None);

        // max_distance короче первого препятствия
        assert!(field.cast(Vec3::ZERO, FORWARD, 3.0, None).is_none());
    }

    #[test]
    fn test_raycast_excludes_observer_body() {
        let field = field_with_target(Vec3::new(0.0, 0.0, -5.0));
        // Старт вне тела observer (сбоку) — без exclude луч бы в него попал
        let origin = Vec3::new(0.0, 0.0, 3.0);
        let hit = field.cast(origin, FORWARD, 20.0, Some(observer())).expect("hit");
        assert_eq!(hit.entity, Some(target()));

        let hit = field.cast(origin, FORWARD, 20.0, None).expect("hit");
        assert_eq!(hit.entity, Some(observer()));
    }

    #[test]
    fn test_can_hear_inclusive_boundary() {
        // distance == range → attenuated == 0 == minimum → слышит
        let sensor = HearingSensor::new(15.0, 0.0);
        assert!(sensor.can_hear(Vec3::ZERO, Vec3::new(15.0, 0.0, 0.0), 50.0));

        // Чуть дальше range → не слышит
        assert!(!sensor.can_hear(Vec3::ZERO, Vec3::new(15.01, 0.0, 0.0), 50.0));
    }

    #[test]
    fn test_can_hear_attenuation_threshold() {
        let sensor = HearingSensor::new(10.0, 10.0);

        // d=5 → 40 * 0.5 = 20 ≥ 10
        assert!(sensor.can_hear(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), 40.0));
        // d=5 → 20 * 0.5 = 10 == 10 (граница включительно)
        assert!(sensor.can_hear(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), 20.0));
        // d=5 → 19 * 0.5 = 9.5 < 10
        assert!(!sensor.can_hear(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), 19.0));
    }

    #[test]
    fn test_zero_range_never_hears() {
        let sensor = HearingSensor::new(0.0, 0.0);
        assert!(!sensor.can_hear(Vec3::ZERO, Vec3::ZERO, 100.0));
    }
}
