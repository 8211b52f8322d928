//! Investigate: идём проверить точку шума

use bevy::prelude::*;
use crate::ai::fsm::{DebugColor, DebugShapes, State};
use super::{step_towards, BehaviorContext};

pub const INVESTIGATE_TURN_RATE: f32 = 5.0;
pub const INVESTIGATE_ARRIVAL_DISTANCE: f32 = 1.5;

#[derive(Debug, Clone)]
pub struct InvestigateState {
    point: Option<Vec3>,
    move_speed: f32,
    pub arrival_distance: f32,
    /// Ставится по прибытии, сам не сбрасывается (только новой точкой)
    arrived: bool,
}

impl InvestigateState {
    pub fn new(move_speed: f32) -> Self {
        Self {
            point: None,
            move_speed,
            arrival_distance: INVESTIGATE_ARRIVAL_DISTANCE,
            arrived: false,
        }
    }

    pub fn set_investigation_point(&mut self, point: Vec3) {
        self.point = Some(point);
        self.arrived = false;
    }

    pub fn investigation_point(&self) -> Option<Vec3> {
        self.point
    }

    pub fn has_finished_investigation(&self) -> bool {
        self.arrived
    }
}

impl<'a> State<BehaviorContext<'a>> for InvestigateState {
    fn on_enter(&mut self, _ctx: &mut BehaviorContext<'a>) {
        crate::log(&format!("🔍 Investigating {:?}", self.point));
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'a>) {
        let Some(point) = self.point else {
            return;
        };
        if self.arrived {
            return;
        }

        if ctx.body.position().distance(point) <= self.arrival_distance {
            self.arrived = true;
            return;
        }

        let direction = step_towards(ctx.body, point, self.move_speed, ctx.delta);
        ctx.body.turn_towards(direction, INVESTIGATE_TURN_RATE, ctx.delta);
    }

    fn draw_debug(&self, ctx: &BehaviorContext<'a>, shapes: &mut DebugShapes) {
        if let Some(point) = self.point {
            shapes.line(ctx.body.position(), point, DebugColor::Cyan);
            shapes.wire_sphere(point, self.arrival_distance, DebugColor::Cyan);
        }
    }
}
