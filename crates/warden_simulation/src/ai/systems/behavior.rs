//! Behavior systems (transitions + update, fixed update, dispatch, telemetry).

use bevy::prelude::*;
use crate::ai::behaviors::{BehaviorAction, BehaviorContext};
use crate::ai::fsm::StateKey;
use crate::ai::locomotion::TransformLocomotion;
use crate::ai::{AttackPerformed, BehaviorMachine, BehaviorOutbox, BehaviorTarget, TransitionPolicy};
use crate::perception::Perception;
use crate::telemetry::Telemetry;

/// Key для telemetry (значение — имя активного состояния)
pub const ENEMY_STATE_KEY: &str = "Enemy State";

/// Цели — не охранники (иначе конфликт &mut Transform в одной системе)
type TargetQuery<'w, 's> = Query<'w, 's, &'static Transform, Without<BehaviorMachine>>;

fn resolve_target(target: &BehaviorTarget, targets: &TargetQuery) -> Option<Vec3> {
    target
        .entity()
        .and_then(|entity| targets.get(entity).ok())
        .map(|transform| transform.translation)
}

/// Система: policy check → (переход) → update активного состояния
///
/// Один переход за тик максимум. Неактивная FSM сначала активируется (Patrol).
/// Цель отсутствует/despawned → перехода нет, состояние работает с target = None.
pub fn update_behaviors(
    mut agents: Query<(
        Entity,
        &mut Transform,
        &mut BehaviorMachine,
        &TransitionPolicy,
        &BehaviorTarget,
        Option<&Perception>,
        &mut BehaviorOutbox,
    )>,
    targets: TargetQuery,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs_f64();

    for (entity, mut transform, mut machine, policy, target, perception, mut outbox) in agents.iter_mut() {
        let target_position = resolve_target(target, &targets);
        let target_visible = perception.is_some_and(|p| p.target_visible);

        let mut body = TransformLocomotion::new(&mut transform);
        let mut ctx = BehaviorContext::new(&mut body, target_position, delta, elapsed);

        if !machine.is_active() && machine.activate(&mut ctx).is_err() {
            continue;
        }

        let distance = target_position.map(|p| ctx.body.position().distance(p));
        if let Some(next) = policy.evaluate(machine.current(), distance, target_visible) {
            crate::log(&format!(
                "🤖 {:?}: {} → {} (distance {:.2})",
                entity,
                machine.current_state_name(),
                next.name(),
                distance.unwrap_or_default()
            ));
            // Ошибка уже залогирована FSM, состояние не меняется
            let _ = machine.change_state(next, &mut ctx);
        }

        machine.update(&mut ctx);
        outbox.actions.append(&mut ctx.actions);
    }
}

/// Система: fixed_update хук активного состояния
pub fn fixed_update_behaviors(
    mut agents: Query<(&mut Transform, &mut BehaviorMachine, &BehaviorTarget, &mut BehaviorOutbox)>,
    targets: TargetQuery,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs_f64();

    for (mut transform, mut machine, target, mut outbox) in agents.iter_mut() {
        if !machine.is_active() {
            continue;
        }

        let target_position = resolve_target(target, &targets);
        let mut body = TransformLocomotion::new(&mut transform);
        let mut ctx = BehaviorContext::new(&mut body, target_position, delta, elapsed);

        machine.fixed_update(&mut ctx);
        outbox.actions.append(&mut ctx.actions);
    }
}

/// Система: outbox → AttackPerformed events
pub fn dispatch_behavior_actions(
    mut agents: Query<(Entity, &BehaviorTarget, &mut BehaviorOutbox)>,
    mut attacks: EventWriter<AttackPerformed>,
) {
    for (entity, target, mut outbox) in agents.iter_mut() {
        for action in outbox.actions.drain(..) {
            match action {
                BehaviorAction::Attack { origin, target: target_position } => {
                    crate::log(&format!("⚔️ {:?} attacks {:?}", entity, target.entity()));
                    attacks.write(AttackPerformed {
                        attacker: entity,
                        target: target.entity(),
                        origin,
                        target_position,
                    });
                }
            }
        }
    }
}

/// Система: имя активного состояния → telemetry
///
/// Один охранник → key "Enemy State"; несколько → "Enemy State {entity}".
pub fn publish_behavior_telemetry(agents: Query<(Entity, &BehaviorMachine)>, telemetry: Res<Telemetry>) {
    let single = agents.iter().count() == 1;

    for (entity, machine) in agents.iter() {
        if single {
            telemetry.publish(ENEMY_STATE_KEY, machine.current_state_name());
        } else {
            telemetry.publish(
                &format!("{} {}", ENEMY_STATE_KEY, entity),
                machine.current_state_name(),
            );
        }
    }
}
