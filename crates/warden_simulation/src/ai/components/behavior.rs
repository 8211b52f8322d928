//! Behavior components (FSM агента, цель, исходящие actions).

use bevy::prelude::*;
use crate::ai::behaviors::{
    AttackState, BehaviorAction, BehaviorContext, BehaviorId, BehaviorState, ChaseState,
    InvestigateState, PatrolState,
};
use crate::ai::fsm::{DebugShapes, FsmError, StateMachine};
use crate::config::WardenConfig;

/// Component: FSM охранника
///
/// Создаётся один раз при спавне, все четыре поведения зарегистрированы.
/// Активация (Patrol) — на первом тике, когда есть контекст для on_enter.
#[derive(Component, Debug, Clone)]
pub struct BehaviorMachine {
    machine: StateMachine<BehaviorId, BehaviorState>,
}

impl BehaviorMachine {
    pub const INITIAL_STATE: BehaviorId = BehaviorId::Patrol;

    pub fn new(waypoints: Vec<Vec3>, config: &WardenConfig) -> Self {
        let mut machine = StateMachine::new();
        let states = [
            BehaviorState::Patrol(PatrolState::new(waypoints, config.move_speed)),
            BehaviorState::Chase(ChaseState::new(config.move_speed, config.chase_speed_multiplier)),
            BehaviorState::Attack(AttackState::new(config.attack_cooldown, config.attack_range)),
            BehaviorState::Investigate(InvestigateState::new(config.move_speed)),
        ];

        for state in states {
            // Ключи уникальны, дубликата тут быть не может
            let _ = machine.add_state(state.id(), state);
        }

        Self { machine }
    }

    pub fn machine(&self) -> &StateMachine<BehaviorId, BehaviorState> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut StateMachine<BehaviorId, BehaviorState> {
        &mut self.machine
    }

    pub fn current(&self) -> Option<BehaviorId> {
        self.machine.current()
    }

    pub fn current_state_name(&self) -> &'static str {
        self.machine.current_state_name()
    }

    pub fn is_active(&self) -> bool {
        self.machine.current().is_some()
    }

    /// Первичная активация (Patrol)
    pub fn activate(&mut self, ctx: &mut BehaviorContext) -> Result<(), FsmError> {
        self.machine.set_initial_state(Self::INITIAL_STATE, ctx)
    }

    pub fn change_state(&mut self, key: BehaviorId, ctx: &mut BehaviorContext) -> Result<(), FsmError> {
        self.machine.change_state(key, ctx)
    }

    pub fn update(&mut self, ctx: &mut BehaviorContext) {
        self.machine.update(ctx);
    }

    pub fn fixed_update(&mut self, ctx: &mut BehaviorContext) {
        self.machine.fixed_update(ctx);
    }

    pub fn draw_debug(&self, ctx: &BehaviorContext, shapes: &mut DebugShapes) {
        self.machine.draw_debug(ctx, shapes);
    }

    /// Новая точка интереса для Investigate (сбрасывает флаг прибытия)
    pub fn set_investigation_point(&mut self, point: Vec3) {
        if let Some(BehaviorState::Investigate(state)) = self.machine.state_mut(BehaviorId::Investigate) {
            state.set_investigation_point(point);
        }
    }

    pub fn investigation(&self) -> Option<&InvestigateState> {
        match self.machine.state(BehaviorId::Investigate) {
            Some(BehaviorState::Investigate(state)) => Some(state),
            _ => None,
        }
    }

    pub fn patrol(&self) -> Option<&PatrolState> {
        match self.machine.state(BehaviorId::Patrol) {
            Some(BehaviorState::Patrol(state)) => Some(state),
            _ => None,
        }
    }

    pub fn attack(&self) -> Option<&AttackState> {
        match self.machine.state(BehaviorId::Attack) {
            Some(BehaviorState::Attack(state)) => Some(state),
            _ => None,
        }
    }
}

/// Component: за кем охотимся (None = цели нет)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorTarget(pub Option<Entity>);

impl BehaviorTarget {
    pub fn new(target: Entity) -> Self {
        Self(Some(target))
    }

    pub fn entity(&self) -> Option<Entity> {
        self.0
    }
}

/// Component: actions тика, ждут dispatch в events
#[derive(Component, Debug, Clone, Default)]
pub struct BehaviorOutbox {
    pub actions: Vec<BehaviorAction>,
}
