//! Attack: стоим на месте, доворачиваемся к цели, бьём по cooldown

use crate::ai::fsm::{DebugColor, DebugShapes, State};
use super::{report_once, BehaviorAction, BehaviorContext, BehaviorError};

pub const ATTACK_TURN_RATE: f32 = 10.0;
pub const DEFAULT_ATTACK_COOLDOWN: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct AttackState {
    /// Секунды fixed-времени между атаками
    pub cooldown: f32,
    /// Только для debug-отрисовки (переходы решает policy)
    pub attack_range: f32,
    last_attack: Option<f64>,
    missing_target_reported: bool,
}

impl AttackState {
    pub fn new(cooldown: f32, attack_range: f32) -> Self {
        Self {
            cooldown,
            attack_range,
            last_attack: None,
            missing_target_reported: false,
        }
    }

    pub fn last_attack(&self) -> Option<f64> {
        self.last_attack
    }

    /// Первая атака — сразу; дальше строго больше cooldown с последней
    pub fn is_ready(&self, elapsed: f64) -> bool {
        match self.last_attack {
            None => true,
            Some(last) => elapsed - last > self.cooldown as f64,
        }
    }
}

impl<'a> State<BehaviorContext<'a>> for AttackState {
    fn on_enter(&mut self, ctx: &mut BehaviorContext<'a>) {
        if ctx.target.is_none() {
            report_once(
                &mut self.missing_target_reported,
                BehaviorError::Configuration {
                    behavior: "Attack",
                    reason: "entered without a target",
                },
            );
            return;
        }

        self.missing_target_reported = false;
        crate::log("⚔️ Attack started");
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'a>) {
        let Some(target) = ctx.target else {
            return;
        };

        let origin = ctx.body.position();
        ctx.body.turn_towards(target - origin, ATTACK_TURN_RATE, ctx.delta);

        // Cooldown сбрасывается только когда атака реально случилась
        if self.is_ready(ctx.elapsed) {
            ctx.actions.push(BehaviorAction::Attack { origin, target });
            self.last_attack = Some(ctx.elapsed);
        }
    }

    fn draw_debug(&self, ctx: &BehaviorContext<'a>, shapes: &mut DebugShapes) {
        shapes.wire_sphere(ctx.body.position(), self.attack_range, DebugColor::Yellow);
    }
}
