//! Noise broadcast (шаги, выстрелы, ...)
//!
//! Вместо глобального singleton — обычный Bevy Event, которым владеет App.
//! Подписчиков сколько угодно (каждый со своим EventReader),
//! порядок доставки между подписчиками не определён.

use bevy::ecs::system::SystemState;
use bevy::prelude::*;

/// Эфемерный шум: позиция + громкость
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct NoiseEvent {
    pub position: Vec3,
    pub level: f32,
}

/// Entry point для систем: `mut noise: NoiseEmitter` → `noise.write(NoiseEvent { .. })`
pub type NoiseEmitter<'w> = EventWriter<'w, NoiseEvent>;

/// Entry point для внешнего кода (host engine, тесты) с доступом к World
pub fn make_noise(world: &mut World, position: Vec3, level: f32) {
    if !world.contains_resource::<Events<NoiseEvent>>() {
        crate::logger::log_warning("make_noise: NoiseEvent не зарегистрирован (нет PerceptionPlugin)");
        return;
    }

    let mut state: SystemState<NoiseEmitter> = SystemState::new(world);
    state.get_mut(world).write(NoiseEvent { position, level });
    state.apply(world);

    crate::logger::log(&format!(
        "🔊 Noise at {:?}, level {:.1}",
        position, level
    ));
}
