//! Ray-intersection seam для vision occlusion
//!
//! Симуляция сама коллизии не резолвит — только спрашивает
//! "что первое на луче". Два backend'а:
//! - ObstacleField: сферы (static obstacles + BodyCollider агентов)
//! - RapierRayCaster: bevy_rapier3d (когда физика подключена хостом)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{QueryFilter, RapierContext};

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Entity владельца collider (None для static геометрии)
    pub entity: Option<Entity>,
    pub distance: f32,
}

pub trait RayCaster {
    /// Ближайший hit на луче `origin + direction * t`, `t ∈ [0, max_distance]`
    ///
    /// `direction` должен быть нормализован. `exclude` — collider, который игнорируем
    /// (обычно сам observer).
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit>;
}

/// Сферический collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: f32,
    pub owner: Option<Entity>,
}

impl SphereCollider {
    pub fn obstacle(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            owner: None,
        }
    }

    /// Distance до входа луча в сферу
    ///
    /// Луч, стартующий ВНУТРИ сферы, её не видит (как physics raycast).
    pub fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let oc = origin - self.center;
        let c = oc.length_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return None;
        }

        let b = oc.dot(direction);
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let t = -b - discriminant.sqrt();
        if t < 0.0 || t > max_distance {
            return None;
        }
        Some(t)
    }
}

/// Тело агента для headless raycast (радиус вокруг Transform)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BodyCollider {
    pub radius: f32,
}

impl Default for BodyCollider {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Resource: статические препятствия + тела агентов текущего тика
#[derive(Resource, Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<SphereCollider>,
    bodies: Vec<SphereCollider>,
}

impl ObstacleField {
    pub fn with_obstacles(obstacles: Vec<SphereCollider>) -> Self {
        Self {
            obstacles,
            bodies: Vec::new(),
        }
    }

    pub fn add_obstacle(&mut self, center: Vec3, radius: f32) {
        self.obstacles.push(SphereCollider::obstacle(center, radius));
    }

    /// Заменить тела агентов (каждый тик, до vision)
    pub fn set_bodies(&mut self, bodies: impl IntoIterator<Item = SphereCollider>) {
        self.bodies.clear();
        self.bodies.extend(bodies);
    }
}

impl RayCaster for ObstacleField {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        self.obstacles
            .iter()
            .chain(self.bodies.iter())
            .filter(|collider| exclude.is_none() || collider.owner != exclude)
            .filter_map(|collider| {
                collider
                    .intersect(origin, direction, max_distance)
                    .map(|t| (t, collider.owner))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, entity)| RayHit {
                point: origin + direction * distance,
                entity,
                distance,
            })
    }
}

/// Adapter: bevy_rapier3d query pipeline → RayCaster
///
/// Collider должен висеть на самой entity цели, иначе hit вернёт child entity
/// и vision посчитает цель перекрытой.
pub struct RapierRayCaster<'a> {
    context: &'a RapierContext<'a>,
}

impl<'a> RapierRayCaster<'a> {
    pub fn new(context: &'a RapierContext<'a>) -> Self {
        Self { context }
    }
}

impl RayCaster for RapierRayCaster<'_> {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let mut filter = QueryFilter::default();
        if let Some(entity) = exclude {
            filter = filter.exclude_collider(entity);
        }

        self.context
            .cast_ray(origin, direction, max_distance, true, filter)
            .map(|(entity, distance)| RayHit {
                point: origin + direction * distance,
                entity: Some(entity),
                distance,
            })
    }
}
