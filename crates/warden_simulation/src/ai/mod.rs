//! AI decision-making module
//!
//! Generic FSM (`fsm`) + поведения охранника (`behaviors`) + пороговый
//! policy переходов (`policy`). Движение идёт через `Locomotion` seam.

use bevy::prelude::*;

pub mod behaviors;
pub mod components;
pub mod events;
pub mod fsm;
pub mod locomotion;
pub mod policy;
pub mod spawn;
pub mod systems;

// Re-export основных типов
pub use behaviors::{BehaviorAction, BehaviorContext, BehaviorError, BehaviorId, BehaviorState};
pub use components::*;
pub use events::AttackPerformed;
pub use fsm::{FsmError, StateMachine};
pub use locomotion::{Locomotion, TransformLocomotion};
pub use policy::TransitionPolicy;
pub use spawn::{spawn_warden, WardenSpawn};
pub use systems::*;

/// System set AI-фазы (после perception)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AISet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения (после PerceptionSet):
/// 1. update_behaviors — policy переход + update активного состояния
/// 2. fixed_update_behaviors — fixed_update хук
/// 3. dispatch_behavior_actions — outbox → AttackPerformed
/// 4. publish_behavior_telemetry — "Enemy State" → Telemetry
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackPerformed>()
            .init_resource::<crate::telemetry::Telemetry>()
            .add_systems(
                FixedUpdate,
                (
                    update_behaviors,
                    fixed_update_behaviors,
                    dispatch_behavior_actions,
                    publish_behavior_telemetry,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(AISet)
                    .after(crate::perception::PerceptionSet),
            );
    }
}
