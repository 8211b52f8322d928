//! AI Events — исходящие события поведения
//!
//! FSM не знает про урон/анимации: Attack state кладёт action в outbox,
//! dispatch система превращает его в событие для внешних систем.

use bevy::prelude::*;

/// Атака выполнена (cooldown прошёл)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackPerformed {
    pub attacker: Entity,
    /// Entity цели (None, если BehaviorTarget уже пустой)
    pub target: Option<Entity>,
    pub origin: Vec3,
    pub target_position: Vec3,
}
