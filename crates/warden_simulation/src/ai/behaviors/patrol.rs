//! Patrol: циклический обход waypoints

use bevy::prelude::*;
use crate::ai::fsm::{DebugColor, DebugShapes, State};
use super::{report_once, step_towards, BehaviorContext, BehaviorError};

pub const PATROL_TURN_RATE: f32 = 5.0;
pub const DEFAULT_ARRIVAL_DISTANCE: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct PatrolState {
    waypoints: Vec<Vec3>,
    current: usize,
    move_speed: f32,
    /// Строгое `<`: ровно на границе ещё не прибыли
    pub arrival_distance: f32,
    config_reported: bool,
}

impl PatrolState {
    pub fn new(waypoints: Vec<Vec3>, move_speed: f32) -> Self {
        Self {
            waypoints,
            current: 0,
            move_speed,
            arrival_distance: DEFAULT_ARRIVAL_DISTANCE,
            config_reported: false,
        }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Индекс текущего waypoint (None при пустом маршруте)
    pub fn current_index(&self) -> Option<usize> {
        (!self.waypoints.is_empty()).then_some(self.current)
    }

    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    fn validate(&self) -> Result<(), BehaviorError> {
        if self.waypoints.is_empty() {
            return Err(BehaviorError::Configuration {
                behavior: "Patrol",
                reason: "waypoint list is empty",
            });
        }
        Ok(())
    }
}

impl<'a> State<BehaviorContext<'a>> for PatrolState {
    fn on_enter(&mut self, _ctx: &mut BehaviorContext<'a>) {
        if let Err(err) = self.validate() {
            report_once(&mut self.config_reported, err);
        }
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'a>) {
        if let Err(err) = self.validate() {
            report_once(&mut self.config_reported, err);
            return;
        }
        let Some(waypoint) = self.current_waypoint() else {
            return;
        };

        let direction = step_towards(ctx.body, waypoint, self.move_speed, ctx.delta);
        ctx.body.turn_towards(direction, PATROL_TURN_RATE, ctx.delta);

        if ctx.body.position().distance(waypoint) < self.arrival_distance {
            self.current = (self.current + 1) % self.waypoints.len();
        }
    }

    fn draw_debug(&self, ctx: &BehaviorContext<'a>, shapes: &mut DebugShapes) {
        if let Some(waypoint) = self.current_waypoint() {
            shapes.line(ctx.body.position(), waypoint, DebugColor::Cyan);
        }
    }
}
