//! Headless симуляция WARDEN
//!
//! Флок + охранник с патрулём + цель, которая подходит, шумит и убегает.
//! Опционально: путь к JSON config первым аргументом.

use bevy::prelude::*;
use warden_simulation::{
    advance, create_headless_app_with_config, flock::FlockSpawn, log_error, log_info, make_noise,
    spawn_flock_seeded, spawn_warden, telemetry::LogTelemetry, BehaviorMachine, SimulationConfig, Telemetry,
    WardenSpawn,
};

const TICKS: u32 = 1000;

fn load_config() -> SimulationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimulationConfig::default();
    };

    let parsed = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| SimulationConfig::from_json_str(&json).map_err(|err| err.to_string()));

    match parsed {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Config {} rejected: {}, using defaults", path, err));
            SimulationConfig::default()
        }
    }
}

fn main() {
    let config = load_config();
    let dt = (1.0 / config.tick_rate) as f32;
    println!("Starting WARDEN headless simulation (seed: {})", config.seed);

    let mut app = create_headless_app_with_config(config.clone());
    // Переходы состояний охранника → лог (вместо debug overlay)
    app.insert_resource(Telemetry::new(LogTelemetry::default()));
    let world = app.world_mut();

    spawn_flock_seeded(world, &FlockSpawn::from_config(&config));

    let intruder = world.spawn(Transform::from_xyz(30.0, 0.0, 0.0)).id();
    let warden = spawn_warden(
        world,
        WardenSpawn {
            position: Vec3::ZERO,
            waypoints: vec![
                Vec3::new(-5.0, 0.0, -5.0),
                Vec3::new(5.0, 0.0, -5.0),
                Vec3::new(5.0, 0.0, 5.0),
                Vec3::new(-5.0, 0.0, 5.0),
            ],
            target: Some(intruder),
        },
        &config.warden,
    );

    for tick in 0..TICKS {
        // Цель: подходит к охраннику (0..400), шумит, потом убегает
        if let Some(mut transform) = world.get_mut::<Transform>(intruder) {
            let step = if tick < 400 { -0.05 } else { 0.12 };
            transform.translation.x = (transform.translation.x + step).max(0.5);
        }
        if tick == 200 {
            make_noise(world, Vec3::new(8.0, 0.0, 2.0), 40.0);
        }

        advance(world, dt);

        if tick % 100 == 0 {
            let state = world
                .get::<BehaviorMachine>(warden)
                .map(|machine| machine.current_state_name())
                .unwrap_or("None");
            log_info(&format!(
                "Tick {}: {} entities, warden {}",
                tick,
                world.entities().len(),
                state
            ));
        }
    }

    println!("Simulation complete!");
}
