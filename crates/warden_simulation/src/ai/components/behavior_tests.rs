//! Tests for behavior components.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use super::super::behavior::{BehaviorMachine, BehaviorTarget};
    use crate::ai::behaviors::{BehaviorContext, BehaviorId};
    use crate::ai::locomotion::TransformLocomotion;
    use crate::config::WardenConfig;

    #[test]
    fn test_all_behaviors_registered_and_inactive() {
        let machine = BehaviorMachine::new(vec![Vec3::X], &WardenConfig::default());

        assert_eq!(machine.machine().len(), 4);
        assert!(!machine.is_active());
        assert_eq!(machine.current_state_name(), "None");
        for id in [BehaviorId::Patrol, BehaviorId::Chase, BehaviorId::Attack, BehaviorId::Investigate] {
            assert!(machine.machine().contains(id));
        }
    }

    #[test]
    fn test_activate_starts_patrol_once() {
        let mut machine = BehaviorMachine::new(vec![Vec3::X], &WardenConfig::default());
        let mut transform = Transform::default();
        let mut body = TransformLocomotion::new(&mut transform);
        let mut ctx = BehaviorContext::new(&mut body, None, 0.1, 0.0);

        assert!(machine.activate(&mut ctx).is_ok());
        assert_eq!(machine.current(), Some(BehaviorId::Patrol));
        assert!(machine.activate(&mut ctx).is_err());
    }

    #[test]
    fn test_investigation_point_forwarded() {
        let mut machine = BehaviorMachine::new(Vec::new(), &WardenConfig::default());
        let point = Vec3::new(3.0, 0.0, -4.0);

        machine.set_investigation_point(point);

        let investigate = machine.investigation().unwrap();
        assert_eq!(investigate.investigation_point(), Some(point));
        assert!(!investigate.has_finished_investigation());
    }

    #[test]
    fn test_config_flows_into_states() {
        let config = WardenConfig {
            attack_cooldown: 2.5,
            ..Default::default()
        };
        let machine = BehaviorMachine::new(vec![Vec3::X, Vec3::Z], &config);

        assert_eq!(machine.attack().unwrap().cooldown, 2.5);
        assert_eq!(machine.patrol().unwrap().waypoints().len(), 2);
    }

    #[test]
    fn test_target_accessor() {
        assert_eq!(BehaviorTarget::default().entity(), None);
        let entity = Entity::from_raw(7);
        assert_eq!(BehaviorTarget::new(entity).entity(), Some(entity));
    }
}
