//! Chase: бег к цели на повышенной скорости

use crate::ai::fsm::{DebugColor, DebugShapes, State};
use super::{report_once, step_towards, BehaviorContext, BehaviorError};

pub const CHASE_TURN_RATE: f32 = 10.0;
pub const DEFAULT_CHASE_MULTIPLIER: f32 = 1.5;

#[derive(Debug, Clone)]
pub struct ChaseState {
    move_speed: f32,
    pub speed_multiplier: f32,
    missing_target_reported: bool,
}

impl ChaseState {
    pub fn new(move_speed: f32, speed_multiplier: f32) -> Self {
        Self {
            move_speed,
            speed_multiplier,
            missing_target_reported: false,
        }
    }

    pub fn chase_speed(&self) -> f32 {
        self.move_speed * self.speed_multiplier
    }
}

impl<'a> State<BehaviorContext<'a>> for ChaseState {
    fn on_enter(&mut self, ctx: &mut BehaviorContext<'a>) {
        match ctx.target {
            Some(target) => {
                self.missing_target_reported = false;
                crate::log(&format!("🏃 Chase started → {:?}", target));
            }
            None => report_once(
                &mut self.missing_target_reported,
                BehaviorError::Configuration {
                    behavior: "Chase",
                    reason: "entered without a target",
                },
            ),
        }
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'a>) {
        let Some(target) = ctx.target else {
            return;
        };

        let direction = step_towards(ctx.body, target, self.chase_speed(), ctx.delta);
        ctx.body.turn_towards(direction, CHASE_TURN_RATE, ctx.delta);
    }

    fn draw_debug(&self, ctx: &BehaviorContext<'a>, shapes: &mut DebugShapes) {
        if let Some(target) = ctx.target {
            shapes.line(ctx.body.position(), target, DebugColor::Red);
        }
    }
}
