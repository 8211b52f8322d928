//! WARDEN Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: flocking, perception, behavior FSM.
//!
//! Слои:
//! - flock — боиды (spatial grid → steering → интеграция)
//! - perception — vision cone + hearing + noise events
//! - ai — generic FSM + поведения охранника + transition policy
//!
//! Рендер, физика коллизий, ввод — на стороне host (не здесь).

use std::time::Duration;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod config;
pub mod flock;
pub mod logger;
pub mod perception;
pub mod spatial;
pub mod telemetry;

// Re-export базовых типов для удобства
pub use ai::{spawn_warden, AIPlugin, AttackPerformed, BehaviorId, BehaviorMachine, BehaviorTarget, WardenSpawn};
pub use config::{ConfigError, SimulationConfig};
pub use flock::{spawn_flock, spawn_flock_seeded, Boid, FlockPlugin, FlockSpawn};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
};
pub use perception::{make_noise, NoiseEvent, Perception, PerceptionPlugin};
pub use telemetry::{Telemetry, TelemetrySink};

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: SimulationConfig::with_seed(seed),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(err) => {
                log_error(&format!("SimulationConfig rejected ({}), using defaults", err));
                SimulationConfig::with_seed(self.config.seed)
            }
        };

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(config.tick_rate))
            // Детерминистичный RNG
            .insert_resource(DeterministicRng::new(config.seed))
            .init_resource::<Telemetry>()
            .insert_resource(config)
            // Подсистемы (порядок: flock, perception, ai)
            .add_plugins((FlockPlugin, PerceptionPlugin, AIPlugin))
            // Фазы тика строго последовательны: AI читает Transform после интеграции боидов
            .configure_sets(
                FixedUpdate,
                (flock::FlockSet, perception::PerceptionSet, ai::AISet).chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(SimulationConfig::with_seed(seed))
}

pub fn create_headless_app_with_config(config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin { config });

    app
}

/// Один тик симуляции с явным dt
///
/// Двигает `Time<Fixed>` ровно на dt и прогоняет FixedUpdate один раз
/// (без accumulator, без wall clock), затем ротирует буферы событий.
/// dt, не представимый как Duration (inf/NaN), пропускает тик целиком.
pub fn advance(world: &mut World, dt: f32) {
    let step = match Duration::try_from_secs_f32(if dt < 0.0 { 0.0 } else { dt }) {
        Ok(step) => step,
        Err(err) => {
            log_error(&format!("advance: dt {} отклонён ({}), тик пропущен", dt, err));
            return;
        }
    };
    let Some(mut time) = world.get_resource_mut::<Time<Fixed>>() else {
        log_error("advance: Time<Fixed> отсутствует (нет SimulationPlugin)");
        return;
    };
    time.advance_by(step);

    if let Err(err) = world.try_run_schedule(FixedUpdate) {
        log_error(&format!("advance: {}", err));
        return;
    }

    update_events::<NoiseEvent>(world);
    update_events::<AttackPerformed>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия через Debug)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
