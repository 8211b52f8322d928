#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use crate::flock::coordinator::FlockCoordinator;
    use crate::flock::steering::BoidSnapshot;

    fn snapshot(index: u32, position: Vec3) -> BoidSnapshot {
        BoidSnapshot {
            entity: Entity::from_raw(index),
            position,
            velocity: Vec3::ZERO,
        }
    }

    #[test]
    fn test_neighbors_exclude_self_and_far() {
        let mut coordinator = FlockCoordinator::new(2.5);
        coordinator.rebuild([
            snapshot(0, Vec3::ZERO),
            snapshot(1, Vec3::new(1.0, 0.0, 0.0)),
            snapshot(2, Vec3::new(2.5, 0.0, 0.0)),
            snapshot(3, Vec3::new(2.6, 0.0, 0.0)),
            snapshot(4, Vec3::new(0.0, 1.0, 0.0)),
        ]);

        let mut found: Vec<u32> = coordinator
            .neighbors(Entity::from_raw(0), Vec3::ZERO, 2.5)
            .iter()
            .map(|n| n.entity.index())
            .collect();
        found.sort_unstable();

        // 2.5 включительно, 2.6 — нет
        assert_eq!(found, vec![1, 2, 4]);
    }

    #[test]
    fn test_rebuild_replaces_previous_tick() {
        let mut coordinator = FlockCoordinator::new(2.5);
        coordinator.rebuild([snapshot(0, Vec3::ZERO), snapshot(1, Vec3::X)]);
        assert_eq!(coordinator.len(), 2);

        coordinator.rebuild([snapshot(2, Vec3::new(50.0, 0.0, 50.0))]);
        assert_eq!(coordinator.len(), 1);
        assert!(coordinator.neighbors(Entity::from_raw(9), Vec3::ZERO, 2.5).is_empty());
    }

    #[test]
    fn test_empty_coordinator() {
        let coordinator = FlockCoordinator::default();
        assert!(coordinator.is_empty());
        assert!(coordinator.neighbors(Entity::from_raw(0), Vec3::ZERO, 10.0).is_empty());
    }

    #[test]
    fn test_neighbors_match_brute_force() {
        for seed in [1_u64, 7, 42] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let population: Vec<BoidSnapshot> = (0..200)
                .map(|i| {
                    snapshot(
                        i,
                        Vec3::new(
                            rng.gen_range(-15.0..15.0),
                            rng.gen_range(-3.0..3.0),
                            rng.gen_range(-15.0..15.0),
                        ),
                    )
                })
                .collect();

            let mut coordinator = FlockCoordinator::new(2.5);
            coordinator.rebuild(population.iter().copied());

            for agent in population.iter().take(40) {
                let radius = 2.5;
                let mut fast: Vec<u32> = coordinator
                    .neighbors(agent.entity, agent.position, radius)
                    .iter()
                    .map(|n| n.entity.index())
                    .collect();
                let mut brute: Vec<u32> = population
                    .iter()
                    .filter(|o| o.entity != agent.entity && o.position.distance(agent.position) <= radius)
                    .map(|o| o.entity.index())
                    .collect();

                fast.sort_unstable();
                brute.sort_unstable();
                assert_eq!(fast, brute, "seed {} agent {:?}", seed, agent.entity);
            }
        }
    }

    #[test]
    fn test_unbounded_radius_sees_whole_flock() {
        let mut coordinator = FlockCoordinator::new(2.5);
        coordinator.rebuild([
            snapshot(0, Vec3::new(-5.0, 0.0, 0.0)),
            snapshot(1, Vec3::new(300.0, 0.0, 300.0)),
        ]);

        for radius in [f32::INFINITY, 2500.0, 1.0e12] {
            let found = coordinator.neighbors(Entity::from_raw(0), Vec3::new(-5.0, 0.0, 0.0), radius);
            assert_eq!(found.len(), 1, "radius {}", radius);
            assert_eq!(found[0].entity, Entity::from_raw(1));
        }
    }
}
