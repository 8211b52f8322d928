//! TransitionPolicy — пороговые правила переходов FSM
//!
//! Patrol → Chase (distance < detection)
//! Chase → Attack (distance < attack) | Chase → Patrol (distance > lose)
//! Attack → Chase (distance ≥ attack)
//!
//! Investigate зарегистрирован, но policy в него не переводит.

use bevy::prelude::*;
use super::behaviors::BehaviorId;

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TransitionPolicy {
    pub detection_range: f32,
    pub attack_range: f32,
    pub lose_target_range: f32,
    /// Patrol → Chase только если цель реально видна (vision cone + occlusion)
    pub detection_requires_sight: bool,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            detection_range: 10.0,
            attack_range: 2.0,
            lose_target_range: 15.0,
            detection_requires_sight: false,
        }
    }
}

impl TransitionPolicy {
    pub fn from_config(config: &crate::config::WardenConfig) -> Self {
        Self {
            detection_range: config.detection_range,
            attack_range: config.attack_range,
            lose_target_range: config.lose_target_range,
            detection_requires_sight: config.detection_requires_sight,
        }
    }

    /// Следующее состояние (None = остаёмся)
    ///
    /// `distance` — прямое 3D расстояние до цели; None = цели нет → без перехода.
    pub fn evaluate(
        &self,
        current: Option<BehaviorId>,
        distance: Option<f32>,
        target_visible: bool,
    ) -> Option<BehaviorId> {
        let distance = distance?;

        match current? {
            BehaviorId::Patrol => {
                let noticed = !self.detection_requires_sight || target_visible;
                (distance < self.detection_range && noticed).then_some(BehaviorId::Chase)
            }
            BehaviorId::Chase => {
                if distance < self.attack_range {
                    Some(BehaviorId::Attack)
                } else if distance > self.lose_target_range {
                    Some(BehaviorId::Patrol)
                } else {
                    None
                }
            }
            BehaviorId::Attack => (distance >= self.attack_range).then_some(BehaviorId::Chase),
            BehaviorId::Investigate => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(policy: &TransitionPolicy, state: BehaviorId, distance: f32) -> BehaviorId {
        policy
            .evaluate(Some(state), Some(distance), false)
            .unwrap_or(state)
    }

    #[test]
    fn test_scenario_sequence() {
        let policy = TransitionPolicy::default();

        let mut state = BehaviorId::Patrol;
        state = step(&policy, state, 12.0);
        assert_eq!(state, BehaviorId::Patrol);

        state = step(&policy, state, 8.0);
        assert_eq!(state, BehaviorId::Chase);

        state = step(&policy, state, 1.5);
        assert_eq!(state, BehaviorId::Attack);

        // Один переход за тик: Attack → Chase, затем Chase → Patrol
        state = step(&policy, state, 20.0);
        assert_eq!(state, BehaviorId::Chase);
        state = step(&policy, state, 20.0);
        assert_eq!(state, BehaviorId::Patrol);
    }

    #[test]
    fn test_boundaries() {
        let policy = TransitionPolicy::default();

        assert_eq!(policy.evaluate(Some(BehaviorId::Patrol), Some(10.0), false), None);
        assert_eq!(policy.evaluate(Some(BehaviorId::Chase), Some(2.0), false), None);
        assert_eq!(policy.evaluate(Some(BehaviorId::Chase), Some(15.0), false), None);
        assert_eq!(
            policy.evaluate(Some(BehaviorId::Attack), Some(2.0), false),
            Some(BehaviorId::Chase)
        );
        assert_eq!(policy.evaluate(Some(BehaviorId::Attack), Some(1.99), false), None);
    }

    #[test]
    fn test_absent_target_or_state() {
        let policy = TransitionPolicy::default();

        assert_eq!(policy.evaluate(Some(BehaviorId::Chase), None, true), None);
        assert_eq!(policy.evaluate(None, Some(1.0), true), None);
        assert_eq!(policy.evaluate(Some(BehaviorId::Investigate), Some(1.0), true), None);
    }

    #[test]
    fn test_sight_gate() {
        let policy = TransitionPolicy {
            detection_requires_sight: true,
            ..Default::default()
        };

        assert_eq!(policy.evaluate(Some(BehaviorId::Patrol), Some(5.0), false), None);
        assert_eq!(
            policy.evaluate(Some(BehaviorId::Patrol), Some(5.0), true),
            Some(BehaviorId::Chase)
        );
        // Gate только на обнаружение
        assert_eq!(
            policy.evaluate(Some(BehaviorId::Chase), Some(1.0), false),
            Some(BehaviorId::Attack)
        );
    }
}
