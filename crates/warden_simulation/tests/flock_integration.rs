//! Интеграционные тесты flock pipeline (rebuild → steering → integration)

use bevy::prelude::*;
use warden_simulation::flock::FlockCoordinator;
use warden_simulation::{advance, create_headless_app, spawn_flock_seeded, Boid, FlockSpawn};

const DT: f32 = 1.0 / 60.0;

fn spawn_boid(world: &mut World, position: Vec3, velocity: Vec3) -> Entity {
    world
        .spawn((Transform::from_translation(position), Boid::default().with_velocity(velocity)))
        .id()
}

#[test]
fn test_spawn_flock_respects_radius_and_height() {
    let mut app = create_headless_app(7);
    let spawn = FlockSpawn {
        count: 80,
        center: Vec3::new(10.0, 0.0, -4.0),
        radius: 6.0,
        height_offset: 1.5,
        ..Default::default()
    };

    let entities = spawn_flock_seeded(app.world_mut(), &spawn);
    assert_eq!(entities.len(), 80);

    let world = app.world();
    for entity in entities {
        let transform = world.get::<Transform>(entity).unwrap();
        let boid = world.get::<Boid>(entity).unwrap();

        assert_eq!(transform.translation.y, 1.5);
        let flat_offset = (transform.translation - spawn.center).with_y(0.0);
        assert!(flat_offset.length() <= spawn.radius + 1e-4);

        // Горизонтальная скорость = max_speed × 0.5
        assert_eq!(boid.velocity.y, 0.0);
        assert!((boid.velocity.length() - boid.max_speed * 0.5).abs() < 1e-4);
    }
}

#[test]
fn test_tick_rebuilds_index_and_resets_acceleration() {
    let mut app = create_headless_app(3);
    let world = app.world_mut();
    spawn_flock_seeded(
        world,
        &FlockSpawn {
            count: 25,
            radius: 4.0,
            ..Default::default()
        },
    );

    advance(world, DT);

    assert_eq!(world.resource::<FlockCoordinator>().len(), 25);
    let mut boids = world.query::<&Boid>();
    for boid in boids.iter(world) {
        assert_eq!(boid.acceleration, Vec3::ZERO);
        assert!(boid.velocity.length() <= boid.max_speed + 1e-4);
    }
}

#[test]
fn test_close_pair_separates() {
    let mut app = create_headless_app(1);
    let world = app.world_mut();
    let a = spawn_boid(world, Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO);
    let b = spawn_boid(world, Vec3::new(0.5, 1.0, 0.0), Vec3::ZERO);

    for _ in 0..10 {
        advance(world, DT);
    }

    let pa = world.get::<Transform>(a).unwrap().translation;
    let pb = world.get::<Transform>(b).unwrap().translation;
    assert!(pa.distance(pb) > 0.5, "distance {}", pa.distance(pb));
}

#[test]
fn test_heading_follows_velocity() {
    let mut app = create_headless_app(1);
    let world = app.world_mut();
    let lone = spawn_boid(world, Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0));

    advance(world, DT);

    let transform = world.get::<Transform>(lone).unwrap();
    assert!((transform.forward().as_vec3() - Vec3::X).length() < 1e-3);
    assert!(transform.translation.x > 0.0);
}

#[test]
fn test_bounds_pull_back_lone_boid() {
    let mut app = create_headless_app(1);
    let world = app.world_mut();
    // Далеко за radius - margin (20 - 2), без соседей
    let stray = spawn_boid(world, Vec3::new(30.0, 0.0, 0.0), Vec3::ZERO);

    for _ in 0..30 {
        advance(world, DT);
    }

    let boid = world.get::<Boid>(stray).unwrap();
    assert!(boid.velocity.x < 0.0);
    assert!(world.get::<Transform>(stray).unwrap().translation.x < 30.0);
}

#[test]
fn test_unbounded_perception_does_not_halt_tick() {
    let mut app = create_headless_app(3);
    let world = app.world_mut();

    let mut boids = Vec::new();
    for i in 0..6 {
        boids.push(spawn_boid(world, Vec3::new(i as f32 * 3.0, 0.0, -5.0), Vec3::X));
    }
    // Один "битый" боид: бесконечный радиус восприятия
    world.get_mut::<Boid>(boids[0]).unwrap().perception_radius = f32::INFINITY;

    for _ in 0..10 {
        advance(world, DT);
    }

    for boid in boids {
        let position = world.get::<Transform>(boid).unwrap().translation;
        assert!(position.is_finite(), "boid {:?} ушёл в {:?}", boid, position);
    }
}

#[test]
fn test_unrepresentable_dt_skips_tick() {
    let mut app = create_headless_app(5);
    let world = app.world_mut();
    let boid = spawn_boid(world, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));

    let before = world.get::<Transform>(boid).unwrap().translation;
    let elapsed = world.resource::<Time<Fixed>>().elapsed();

    advance(world, f32::INFINITY);
    advance(world, f32::NAN);

    assert_eq!(world.get::<Transform>(boid).unwrap().translation, before);
    assert_eq!(world.resource::<Time<Fixed>>().elapsed(), elapsed);

    // Обычный dt после этого работает
    advance(world, DT);
    assert!(world.get::<Transform>(boid).unwrap().translation.x > before.x);
}
