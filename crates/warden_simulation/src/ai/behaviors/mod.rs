//! Behavior states охранника (Patrol / Chase / Attack / Investigate)
//!
//! Состояния не владеют ни агентом, ни целью: всё приходит через
//! `BehaviorContext` на время вызова хука. Побочные эффекты наружу
//! (атака) — через `ctx.actions`, их разбирает ECS система.

use bevy::prelude::*;
use thiserror::Error;
use super::fsm::{DebugShapes, State, StateKey};
use super::locomotion::Locomotion;

pub mod attack;
pub mod chase;
pub mod investigate;
pub mod patrol;


pub use attack::AttackState;
pub use chase::ChaseState;
pub use investigate::InvestigateState;
pub use patrol::PatrolState;

/// Ключ поведения в StateMachine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BehaviorId {
    Patrol,
    Chase,
    Attack,
    Investigate,
}

impl StateKey for BehaviorId {
    fn name(&self) -> &'static str {
        match self {
            BehaviorId::Patrol => "Patrol",
            BehaviorId::Chase => "Chase",
            BehaviorId::Attack => "Attack",
            BehaviorId::Investigate => "Investigate",
        }
    }
}

/// Side effect поведения (исполняется вне FSM)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorAction {
    Attack { origin: Vec3, target: Vec3 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BehaviorError {
    #[error("{behavior} misconfigured: {reason}")]
    Configuration {
        behavior: &'static str,
        reason: &'static str,
    },
}

/// Per-call контекст хуков
pub struct BehaviorContext<'a> {
    pub body: &'a mut dyn Locomotion,
    /// Позиция цели (None = цели нет / despawned)
    pub target: Option<Vec3>,
    pub delta: f32,
    /// Накопленное fixed-время (секунды)
    pub elapsed: f64,
    pub actions: Vec<BehaviorAction>,
}

impl<'a> BehaviorContext<'a> {
    pub fn new(body: &'a mut dyn Locomotion, target: Option<Vec3>, delta: f32, elapsed: f64) -> Self {
        Self {
            body,
            target,
            delta,
            elapsed,
            actions: Vec::new(),
        }
    }
}

/// Однократный report configuration error (флаг хранит сам state)
pub(crate) fn report_once(reported: &mut bool, error: BehaviorError) {
    if !*reported {
        crate::log_error(&format!("⚠️ {}", error));
        *reported = true;
    }
}

/// Шаг к точке: не дальше, чем осталось (без overshoot)
pub(crate) fn step_towards(body: &mut dyn Locomotion, point: Vec3, speed: f32, delta: f32) -> Vec3 {
    let position = body.position();
    let offset = point - position;
    let distance = offset.length();
    let direction = offset.normalize_or_zero();

    let step = (speed * delta).min(distance);
    body.move_to(position + direction * step);
    direction
}

/// Закрытый набор поведений (один match на хук)
#[derive(Debug, Clone)]
pub enum BehaviorState {
    Patrol(PatrolState),
    Chase(ChaseState),
    Attack(AttackState),
    Investigate(InvestigateState),
}

impl BehaviorState {
    pub fn id(&self) -> BehaviorId {
        match self {
            BehaviorState::Patrol(_) => BehaviorId::Patrol,
            BehaviorState::Chase(_) => BehaviorId::Chase,
            BehaviorState::Attack(_) => BehaviorId::Attack,
            BehaviorState::Investigate(_) => BehaviorId::Investigate,
        }
    }

    fn as_state_mut<'s, 'a>(&'s mut self) -> &'s mut dyn State<BehaviorContext<'a>> {
        match self {
            BehaviorState::Patrol(state) => state,
            BehaviorState::Chase(state) => state,
            BehaviorState::Attack(state) => state,
            BehaviorState::Investigate(state) => state,
        }
    }

    fn as_state<'s, 'a>(&'s self) -> &'s dyn State<BehaviorContext<'a>> {
        match self {
            BehaviorState::Patrol(state) => state,
            BehaviorState::Chase(state) => state,
            BehaviorState::Attack(state) => state,
            BehaviorState::Investigate(state) => state,
        }
    }
}

impl<'a> State<BehaviorContext<'a>> for BehaviorState {
    fn on_enter(&mut self, ctx: &mut BehaviorContext<'a>) {
        self.as_state_mut().on_enter(ctx);
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'a>) {
        self.as_state_mut().on_update(ctx);
    }

    fn on_fixed_update(&mut self, ctx: &mut BehaviorContext<'a>) {
        self.as_state_mut().on_fixed_update(ctx);
    }

    fn on_exit(&mut self, ctx: &mut BehaviorContext<'a>) {
        self.as_state_mut().on_exit(ctx);
    }

    fn draw_debug(&self, ctx: &BehaviorContext<'a>, shapes: &mut DebugShapes) {
        self.as_state().draw_debug(ctx, shapes);
    }
}
