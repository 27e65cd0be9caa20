#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use geneforge_core::components::RigidBody;
    use geneforge_core::constants::DT;
    use geneforge_core::enums::{HealthBand, KnockbackMethod, WeaponUpgrade};
    use geneforge_core::types::{ActorId, Position, Velocity};
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::chain::*;
    use crate::health::*;
    use crate::knockback::*;
    use crate::weapon::*;

    // --- Health ---

    #[test]
    fn test_health_starts_full() {
        let health = Health::new(5.0);
        assert_eq!(health.current(), 5.0);
        assert_eq!(health.maximum(), 5.0);
        assert!(health.is_alive());
        assert!(!health.has_been_hit());
        assert_eq!(health.band(), HealthBand::Healthy);
    }

    #[test]
    fn test_non_positive_damage_rejected() {
        let mut health = Health::new(5.0);
        assert_eq!(health.apply_damage(0.0, false), DamageReport::Rejected);
        assert_eq!(health.apply_damage(-3.0, false), DamageReport::Rejected);
        assert_eq!(health.apply_damage(f64::NAN, false), DamageReport::Rejected);
        assert_eq!(health.current(), 5.0);
        assert!(!health.has_been_hit(), "rejected hits don't count as first hit");
    }

    #[test]
    fn test_first_hit_reported_once() {
        let mut health = Health::new(5.0);
        let first = health.apply_damage(1.0, false);
        let second = health.apply_damage(1.0, true);
        assert!(matches!(first, DamageReport::Applied { first_hit: true, .. }));
        assert!(matches!(
            second,
            DamageReport::Applied {
                first_hit: false,
                critical: true,
                ..
            }
        ));
        assert!((health.current() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_death_fires_exactly_once() {
        // 5 HP split across uneven hits, with overkill at the end
        let mut health = Health::new(5.0);
        let hits = [1.5, 1.5, 1.0, 4.0, 2.0, 1.0];
        let deaths = hits
            .iter()
            .map(|amount| health.apply_damage(*amount, false))
            .filter(|report| report.died())
            .count();
        assert_eq!(deaths, 1);
        assert_eq!(health.current(), 0.0, "HP floors at zero");
        assert!(!health.is_alive());
    }

    #[test]
    fn test_hundred_hp_thirty_then_eighty() {
        let mut health = Health::new(100.0);
        let report = health.apply_damage(30.0, false);
        assert!(matches!(
            report,
            DamageReport::Applied {
                first_hit: true,
                died: false,
                ..
            }
        ));
        assert_eq!(health.current(), 70.0);

        let report = health.apply_damage(80.0, false);
        assert!(report.died());
        assert_eq!(health.current(), 0.0);
        assert_eq!(health.apply_damage(5.0, false), DamageReport::Rejected);
    }

    #[test]
    fn test_dead_actor_ignores_damage() {
        let mut health = Health::new(2.0);
        assert!(health.apply_damage(10.0, false).died());
        assert_eq!(health.apply_damage(1.0, false), DamageReport::Rejected);
        assert_eq!(health.current(), 0.0);
    }

    #[test]
    fn test_receiver_trait_object() {
        let mut health = Health::new(10.0);
        let receiver: &mut dyn DamageReceiver = &mut health;
        let report = receiver.apply_damage(4.0, false);
        assert!(report.is_applied());
        assert_eq!(receiver.current_hp(), 6.0);
        assert_eq!(receiver.max_hp(), 10.0);
    }

    #[test]
    fn test_revive_and_heal() {
        let mut health = Health::new(100.0);
        health.apply_damage(100.0, false);
        assert!(!health.is_alive());

        health.heal(10.0);
        assert_eq!(health.current(), 0.0, "dead actors can't heal");

        health.revive(0.5);
        assert!(health.is_alive());
        assert!((health.current() - 50.0).abs() < 1e-10);

        health.heal(80.0);
        assert_eq!(health.current(), 100.0);

        health.apply_damage(100.0, false);
        health.revive(0.0);
        assert!(health.current() > 0.0, "revive always leaves some HP");
    }

    #[test]
    fn test_health_bands() {
        let mut health = Health::new(100.0);
        health.apply_damage(55.0, false);
        assert_eq!(health.band(), HealthBand::Wounded);
        health.apply_damage(30.0, false);
        assert_eq!(health.band(), HealthBand::Critical);
    }

    #[test]
    fn test_listener_dispatch_order() {
        let listeners = DamageListeners::new([
            DamageListener::AiPause,
            DamageListener::DamageText,
            DamageListener::HealthBarReveal,
        ]);
        let mut health = Health::new(5.0);

        let first = listeners.dispatch(&health.apply_damage(2.0, true));
        assert_eq!(first.len(), 6);
        assert!(first[..3].iter().all(|(_, n)| *n == DamageNotice::FirstHit));
        assert_eq!(first[0].0, DamageListener::AiPause);
        assert_eq!(first[2].0, DamageListener::HealthBarReveal);
        assert_eq!(
            first[4],
            (
                DamageListener::DamageText,
                DamageNotice::Damaged {
                    amount: 2.0,
                    critical: true
                }
            )
        );

        let second = listeners.dispatch(&health.apply_damage(1.0, false));
        assert_eq!(second.len(), 3);
        assert!(listeners.dispatch(&DamageReport::Rejected).is_empty());
    }

    #[test]
    fn test_listener_registration_appends() {
        let mut listeners = DamageListeners::new([DamageListener::DamageText]);
        assert!(listeners.contains(DamageListener::DamageText));
        assert!(!listeners.contains(DamageListener::AiPause));

        listeners.register(DamageListener::AiPause);
        assert!(listeners.contains(DamageListener::AiPause));

        let mut health = Health::new(5.0);
        let notices = listeners.dispatch(&health.apply_damage(1.0, false));
        let order: Vec<_> = notices[2..].iter().map(|(l, _)| *l).collect();
        assert_eq!(order, [DamageListener::DamageText, DamageListener::AiPause]);
    }

    // --- Knockback ---

    #[test]
    fn test_receiver_clamps_horizontal_only() {
        let mut receiver = KnockbackReceiver::default();
        receiver.apply_impulse(DVec3::new(30.0, 40.0, 3.0));
        let horizontal = DVec3::new(receiver.velocity.x, receiver.velocity.y, 0.0).length();
        assert!((horizontal - 10.0).abs() < 1e-10);
        assert!((receiver.velocity.x - 6.0).abs() < 1e-10);
        assert_eq!(receiver.velocity.z, 3.0);
    }

    #[test]
    fn test_receiver_clamp_keeps_vertical() {
        let mut receiver = KnockbackReceiver {
            max_horizontal_speed: 8.0,
            ..Default::default()
        };
        receiver.apply_impulse(DVec3::new(10.0, 0.0, 2.0));
        assert!((receiver.velocity.x - 8.0).abs() < 1e-10);
        assert_eq!(receiver.velocity.y, 0.0);
        assert_eq!(receiver.velocity.z, 2.0);
    }

    #[test]
    fn test_receiver_step_decays() {
        let mut receiver = KnockbackReceiver::default();
        receiver.apply_impulse(DVec3::new(6.0, 0.0, 0.0));

        let dt = 0.1;
        let displacement = receiver.step(dt);
        assert!((displacement.x - 0.6).abs() < 1e-10);
        // k = clamp01(6 * 0.1) = 0.6
        assert!((receiver.velocity.x - 2.4).abs() < 1e-10);

        for _ in 0..200 {
            receiver.step(DT);
        }
        assert!(receiver.is_at_rest());
        assert_eq!(receiver.step(DT), DVec3::ZERO);
    }

    #[test]
    fn test_body_impulse_divides_by_mass_and_clamps() {
        let mut body = RigidBody {
            velocity: Velocity::default(),
            mass: 2.0,
            drag: 0.0,
        };
        apply_body_impulse(&mut body, DVec3::new(10.0, 0.0, 1.0), 0.0);
        assert!((body.velocity.x - 5.0).abs() < 1e-10);
        assert!((body.velocity.z - 0.5).abs() < 1e-10);

        apply_body_impulse(&mut body, DVec3::new(40.0, 0.0, 0.0), 12.0);
        assert!((body.velocity.horizontal_speed() - 12.0).abs() < 1e-10);
        assert!((body.velocity.z - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_controller_knockback_runs_for_duration() {
        let mut routine = ControllerKnockback::new(DVec3::new(0.0, 6.0, 0.5), 0.25, 8.0);
        let mut total = DVec3::ZERO;
        let mut ticks = 0;
        let mut last_step = f64::INFINITY;
        while !routine.is_finished() {
            let step = routine.step(DT);
            assert!(step.y < last_step, "displacement decays every tick");
            last_step = step.y;
            total += step;
            ticks += 1;
        }
        assert_eq!(ticks, 8);
        assert!(total.y > 0.0 && total.y < 6.0 * 0.25);
    }

    #[test]
    fn test_slide_knockback_distance() {
        let from = Position::new(1.0, 1.0, 0.0);
        let mut slide = SlideKnockback::new(from, DVec3::new(0.0, 1.0, 0.7), 5.0).unwrap();
        let mut total = DVec3::ZERO;
        while !slide.is_finished() {
            total += slide.step(DT);
        }
        assert!(total.x.abs() < 1e-10);
        assert!((total.y - 0.5).abs() < 1e-10);
        assert_eq!(total.z, 0.0);

        assert!(SlideKnockback::new(from, DVec3::Z, 5.0).is_none());
        assert!(SlideKnockback::new(from, DVec3::Y, 0.0).is_none());
    }

    #[test]
    fn test_resolve_method_order() {
        let all = KnockbackCapabilities {
            receiver: true,
            body: true,
            controller_enabled: true,
        };
        assert_eq!(resolve_method(all), Some(KnockbackMethod::Receiver));

        let body_and_controller = KnockbackCapabilities {
            receiver: false,
            ..all
        };
        assert_eq!(resolve_method(body_and_controller), Some(KnockbackMethod::Body));

        let controller = KnockbackCapabilities {
            controller_enabled: true,
            ..Default::default()
        };
        assert_eq!(resolve_method(controller), Some(KnockbackMethod::Controller));
        assert_eq!(resolve_method(KnockbackCapabilities::default()), None);
    }

    #[test]
    fn test_melee_impulse_direction() {
        let attacker = Position::new(0.0, 0.0, 0.0);
        let impulse = melee_impulse(attacker, 0.0, Position::new(3.0, 0.0, 2.0), 6.0, 0.5);
        assert!((impulse.x - 6.0).abs() < 1e-10);
        assert!(impulse.y.abs() < 1e-10);
        assert!((impulse.z - 0.5).abs() < 1e-10);

        // Stacked on top of each other: push along the attacker's facing (north)
        let impulse = melee_impulse(attacker, 0.0, Position::new(0.001, 0.0, 0.0), 6.0, 0.5);
        assert!(impulse.x.abs() < 1e-10);
        assert!((impulse.y - 6.0).abs() < 1e-10);
    }

    // --- Chain ---

    fn candidate(id: u32, x: f64, alive: bool) -> ChainCandidate {
        ChainCandidate {
            id: ActorId(id),
            position: Position::new(x, 0.0, 0.0),
            alive,
        }
    }

    fn tuning() -> ChainTuning {
        ChainTuning {
            max_hops: 3,
            radius: 6.0,
            ..ChainTuning::default()
        }
    }

    #[test]
    fn test_chain_hops_nearest_unvisited() {
        // Struck target #1 at x=0, then targets 2 apart, plus a fourth valid one
        let world = vec![
            candidate(1, 0.0, true),
            candidate(5, 6.0, true),
            candidate(3, 2.0, true),
            candidate(6, 8.0, true),
            candidate(4, 4.0, true),
        ];
        let mut session = ChainSession::start(1, ActorId(100), ActorId(1), world[0].position, &tuning());

        let mut hit = Vec::new();
        let mut ticks = 0;
        loop {
            match session.next_hop(if ticks == 0 { 0.0 } else { DT }, &world) {
                HopOutcome::Waiting => {}
                HopOutcome::Hop(hop) => hit.push(hop.target),
                HopOutcome::Finished => break,
            }
            ticks += 1;
            assert!(ticks < 100, "chain never finished");
        }
        assert_eq!(hit, vec![ActorId(3), ActorId(4), ActorId(5)]);
        assert_eq!(session.hops, 3);
        assert!(!session.visited.contains(&ActorId(6)));
    }

    #[test]
    fn test_first_hop_immediate_then_delayed() {
        let world = vec![candidate(1, 0.0, true), candidate(2, 2.0, true), candidate(3, 4.0, true)];
        let mut session = ChainSession::start(1, ActorId(9), ActorId(1), world[0].position, &tuning());

        let first = session.next_hop(0.0, &world);
        assert!(matches!(first, HopOutcome::Hop(ChainHop { hop: 1, .. })));

        // 0.1 s delay at 30 Hz: two waiting ticks, hop on the third
        assert_eq!(session.next_hop(DT, &world), HopOutcome::Waiting);
        assert_eq!(session.next_hop(DT, &world), HopOutcome::Waiting);
        let second = session.next_hop(DT, &world);
        match second {
            HopOutcome::Hop(hop) => {
                assert_eq!(hop.target, ActorId(3));
                assert_eq!(hop.from, Position::new(2.0, 0.0, 0.0));
                assert_eq!(hop.hop, 2);
            }
            other => panic!("expected hop, got {other:?}"),
        }
    }

    #[test]
    fn test_select_next_tie_breaks_on_lowest_id() {
        let anchor = Position::new(0.0, 0.0, 0.0);
        let candidates = [candidate(8, 3.0, true), candidate(2, -3.0, true), candidate(5, 3.0, true)];
        let picked = select_next(anchor, 6.0, &candidates, &BTreeSet::new()).unwrap();
        assert_eq!(picked.id, ActorId(2));
    }

    #[test]
    fn test_select_next_skips_dead_visited_and_far() {
        let anchor = Position::new(0.0, 0.0, 0.0);
        let candidates = [
            candidate(1, 1.0, false),
            candidate(2, 1.5, true),
            candidate(3, 2.0, true),
            candidate(4, 7.0, true),
        ];
        let visited = BTreeSet::from([ActorId(2)]);
        let picked = select_next(anchor, 6.0, &candidates, &visited).unwrap();
        assert_eq!(picked.id, ActorId(3));

        let visited = BTreeSet::from([ActorId(2), ActorId(3)]);
        assert!(select_next(anchor, 6.0, &candidates, &visited).is_none());
    }

    #[test]
    fn test_chain_ends_without_targets() {
        let world = vec![candidate(1, 0.0, true), candidate(2, 10.0, true)];
        let mut session = ChainSession::start(1, ActorId(9), ActorId(1), world[0].position, &tuning());
        assert_eq!(session.next_hop(0.0, &world), HopOutcome::Finished);
        assert!(session.is_finished());
        assert_eq!(session.hops, 0);
    }

    #[test]
    fn test_zero_max_hops_never_hops() {
        let world = vec![candidate(1, 0.0, true), candidate(2, 1.0, true)];
        let zero = ChainTuning {
            max_hops: 0,
            ..tuning()
        };
        let mut session = ChainSession::start(1, ActorId(9), ActorId(1), world[0].position, &zero);
        assert_eq!(session.next_hop(0.0, &world), HopOutcome::Finished);
    }

    #[test]
    fn test_chain_tuning_json_defaults() {
        let tuning: ChainTuning =
            serde_json::from_str(r#"{"hop_damage":{"kind":"Lethal"},"max_hops":5}"#).unwrap();
        assert_eq!(tuning.hop_damage, HopDamage::Lethal);
        assert_eq!(tuning.max_hops, 5);
        assert_eq!(tuning.radius, 6.0);
        assert!(tuning.enabled);
    }

    // --- Weapon ---

    #[test]
    fn test_weapon_upgrade_limits() {
        let mut stats = WeaponStats::default();
        stats.apply_upgrade(WeaponUpgrade::FireRate(1.0));
        assert!((stats.fire_rate - 0.05).abs() < 1e-10);
        stats.apply_upgrade(WeaponUpgrade::ProjectileSize(-5.0));
        assert!((stats.projectile_size - 0.1).abs() < 1e-10);
        stats.apply_upgrade(WeaponUpgrade::Knockback(-50.0));
        assert_eq!(stats.knockback_force, 0.0);
        stats.apply_upgrade(WeaponUpgrade::CritChance(3.0));
        assert_eq!(stats.crit_chance, 1.0);
        stats.apply_upgrade(WeaponUpgrade::CritMultiplier(-4.0));
        assert_eq!(stats.crit_multiplier, 1.0);
        stats.apply_upgrade(WeaponUpgrade::Damage(2.0));
        assert!((stats.damage - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_roll_shot_crit_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let never = WeaponStats::default();
        assert!((0..500).all(|_| !roll_shot(&never, &mut rng).critical));

        let always = WeaponStats {
            crit_chance: 1.0,
            crit_multiplier: 3.0,
            damage: 2.0,
            ..WeaponStats::default()
        };
        for _ in 0..100 {
            let shot = roll_shot(&always, &mut rng);
            assert!(shot.critical);
            assert!((shot.damage - 6.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_weapon_stats_partial_json() {
        let stats: WeaponStats = serde_json::from_str(r#"{"damage":4.0}"#).unwrap();
        assert_eq!(stats.damage, 4.0);
        assert_eq!(stats.fire_rate, 0.25);
        assert!((stats.projectile_radius() - 0.25).abs() < 1e-10);
    }
}
