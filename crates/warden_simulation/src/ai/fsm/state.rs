//! State trait + debug shapes (generic, без привязки к ECS)

use std::fmt::Debug;
use std::hash::Hash;
use bevy::prelude::*;

/// Ключ состояния в StateMachine
///
/// Обычно fieldless enum (см. `BehaviorId`).
pub trait StateKey: Copy + Eq + Hash + Debug {
    /// Имя для логов и telemetry
    fn name(&self) -> &'static str;
}

/// Единица поведения FSM
///
/// `C` — per-call контекст: агент, цель, время. State им НЕ владеет,
/// получает на время вызова хука. Все хуки опциональны.
/// Переходы state сам не делает — это решает внешний policy.
pub trait State<C> {
    fn on_enter(&mut self, _ctx: &mut C) {}

    fn on_update(&mut self, _ctx: &mut C) {}

    fn on_fixed_update(&mut self, _ctx: &mut C) {}

    fn on_exit(&mut self, _ctx: &mut C) {}

    fn draw_debug(&self, _ctx: &C, _shapes: &mut DebugShapes) {}
}

/// Цвет примитива (host маппит на свою палитру)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugColor {
    Cyan,
    Red,
    Yellow,
}

/// Примитив debug-оверлея
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    Line { from: Vec3, to: Vec3, color: DebugColor },
    WireSphere { center: Vec3, radius: f32, color: DebugColor },
}

/// Сборщик debug-примитивов
///
/// Headless симуляция ничего не рисует: host (client) забирает shapes
/// и отдаёт в свой renderer (gizmos и т.п.).
#[derive(Debug, Clone, Default)]
pub struct DebugShapes {
    shapes: Vec<DebugShape>,
}

impl DebugShapes {
    pub fn line(&mut self, from: Vec3, to: Vec3, color: DebugColor) {
        self.shapes.push(DebugShape::Line { from, to, color });
    }

    pub fn wire_sphere(&mut self, center: Vec3, radius: f32, color: DebugColor) {
        self.shapes.push(DebugShape::WireSphere {
            center,
            radius,
            color,
        });
    }

    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
