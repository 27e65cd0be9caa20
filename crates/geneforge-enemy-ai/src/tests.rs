#[cfg(test)]
mod tests {
    use geneforge_core::components::AiAgent;
    use geneforge_core::constants::{ATTACK_A_WEIGHT, ATTACK_B_WEIGHT, ATTACK_C_WEIGHT, DT};
    use geneforge_core::enums::{AiMode, AttackVariant, EnemyArchetype};
    use geneforge_core::types::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::fsm::{evaluate, on_damaged, spawn_state, AgentContext};
    use crate::profiles::get_profile;

    fn agent(archetype: EnemyArchetype) -> AiAgent {
        AiAgent {
            archetype,
            mode: AiMode::Wandering,
            spawn_anchor: Position::new(0.0, 0.0, 0.0),
            wander_target: Position::new(4.0, 0.0, 0.0),
            wander_timer: 0.0,
            idle_waiting: false,
            idle_timer: 0.0,
            last_attack_secs: None,
            damage_paused: false,
            damage_pause_timer: 0.0,
            pending_hit_secs: None,
        }
    }

    fn context(state: &AiAgent, target: Option<Position>, now_secs: f64) -> AgentContext<'_> {
        AgentContext {
            state,
            position: Position::new(0.0, 0.0, 0.0),
            heading: 0.0,
            target,
            now_secs,
            dt: DT,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_mode_by_distance() {
        // Grunt: detection 20, attack range 1.5. One agent walks the
        // transitions in both directions.
        let mut state = agent(EnemyArchetype::Grunt);
        let mut rng = rng();
        let cases = [
            (25.0, AiMode::Wandering),
            (10.0, AiMode::Chasing),
            (1.0, AiMode::Attacking),
            (25.0, AiMode::Wandering),
            (1.0, AiMode::Attacking),
            (10.0, AiMode::Chasing),
        ];
        let mut previous = state.mode;
        for (distance, expected) in cases {
            let target = Position::new(0.0, distance, 0.0);
            let update = evaluate(&context(&state, Some(target), 0.0), &mut rng);
            assert_eq!(update.state.mode, expected, "distance {distance}");
            assert_eq!(update.mode_changed, expected != previous);
            previous = update.state.mode;
            state = update.state;
        }
    }

    #[test]
    fn test_mode_uses_full_3d_distance() {
        // Horizontally inside attack range, but far overhead
        let state = agent(EnemyArchetype::Grunt);
        let target = Position::new(1.0, 0.0, 10.0);
        let update = evaluate(&context(&state, Some(target), 0.0), &mut rng());
        assert_eq!(update.state.mode, AiMode::Chasing);
    }

    #[test]
    fn test_chase_moves_toward_target() {
        let state = agent(EnemyArchetype::Grunt);
        let target = Position::new(0.0, 10.0, 0.0);
        let update = evaluate(&context(&state, Some(target), 0.0), &mut rng());

        let profile = get_profile(EnemyArchetype::Grunt);
        assert!(update.mode_changed);
        assert!(update.displacement.x.abs() < 1e-10);
        assert!((update.displacement.y - profile.chase_speed * DT).abs() < 1e-10);
        assert_eq!(update.displacement.z, 0.0);
        assert!(update.heading.abs() < 1e-10, "should face north");
        assert_eq!(update.anim_speed, Some(1.0));
        assert!(update.attack.is_none());
    }

    #[test]
    fn test_attack_holds_position_and_faces_target() {
        let state = agent(EnemyArchetype::Grunt);
        let target = Position::new(1.0, 0.0, 0.0);
        let update = evaluate(&context(&state, Some(target), 0.0), &mut rng());

        assert_eq!(update.state.mode, AiMode::Attacking);
        assert_eq!(update.displacement.length(), 0.0);
        assert!((update.heading - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
        assert_eq!(update.anim_speed, Some(0.0));
    }

    #[test]
    fn test_first_attack_is_immediate_then_rate_limited() {
        let mut state = agent(EnemyArchetype::Grunt);
        let target = Some(Position::new(1.0, 0.0, 0.0));
        let mut rng = rng();

        let first = evaluate(&context(&state, target, 5.0), &mut rng);
        assert_eq!(first.attack, Some(AttackVariant::Attack));
        assert_eq!(first.state.last_attack_secs, Some(5.0));
        assert_eq!(first.state.pending_hit_secs, Some(0.4));
        state = first.state;

        // Attack rate is 1.0 s
        let early = evaluate(&context(&state, target, 5.5), &mut rng);
        assert!(early.attack.is_none());
        assert_eq!(early.state.last_attack_secs, Some(5.0));

        let ready = evaluate(&context(&state, target, 6.0), &mut rng);
        assert!(ready.attack.is_some());
        assert_eq!(ready.state.last_attack_secs, Some(6.0));
    }

    #[test]
    fn test_weighted_attack_table_distribution() {
        let state = agent(EnemyArchetype::Brute);
        let target = Some(Position::new(1.0, 0.0, 0.0));
        let mut rng = rng();

        let trials = 6000;
        let (mut a, mut b, mut c) = (0u32, 0u32, 0u32);
        for _ in 0..trials {
            match evaluate(&context(&state, target, 0.0), &mut rng).attack {
                Some(AttackVariant::Attack) => a += 1,
                Some(AttackVariant::AttackB) => b += 1,
                Some(AttackVariant::AttackC) => c += 1,
                None => panic!("brute in range with no prior attack must swing"),
            }
        }
        assert!((ATTACK_A_WEIGHT + ATTACK_B_WEIGHT + ATTACK_C_WEIGHT - 1.0).abs() < 1e-12);
        let frac = |n: u32| n as f64 / trials as f64;
        assert!((frac(a) - ATTACK_A_WEIGHT).abs() < 0.04, "Attack share {}", frac(a));
        assert!((frac(b) - ATTACK_B_WEIGHT).abs() < 0.04, "AttackB share {}", frac(b));
        assert!((frac(c) - ATTACK_C_WEIGHT).abs() < 0.04, "AttackC share {}", frac(c));
    }

    #[test]
    fn test_damage_pause_preempts_everything() {
        let mut state = agent(EnemyArchetype::Grunt);
        on_damaged(&mut state);
        let target = Some(Position::new(1.0, 0.0, 0.0));

        let update = evaluate(&context(&state, target, 0.0), &mut rng());
        assert_eq!(update.state.mode, AiMode::Wandering, "no transitions while paused");
        assert!(update.attack.is_none(), "no attack timing while paused");
        assert_eq!(update.displacement.length(), 0.0);
        assert_eq!(update.anim_speed, Some(0.0));
        assert!(update.state.damage_paused);
        assert!((update.state.damage_pause_timer - DT).abs() < 1e-10);
    }

    #[test]
    fn test_damage_pause_expires() {
        let mut state = agent(EnemyArchetype::Grunt);
        on_damaged(&mut state);
        state.damage_pause_timer = 0.49;

        let update = evaluate(&context(&state, Some(Position::new(1.0, 0.0, 0.0)), 0.0), &mut rng());
        assert!(!update.state.damage_paused);
        assert!(update.attack.is_none(), "the clearing tick does no mode logic");

        let next = evaluate(&context(&update.state, Some(Position::new(1.0, 0.0, 0.0)), DT), &mut rng());
        assert_eq!(next.state.mode, AiMode::Attacking);
        assert!(next.attack.is_some());
    }

    #[test]
    fn test_on_damaged_is_idempotent_while_paused() {
        let mut state = agent(EnemyArchetype::Grunt);
        on_damaged(&mut state);
        state.damage_pause_timer = 0.3;
        on_damaged(&mut state);
        assert!(state.damage_paused);
        assert!((state.damage_pause_timer - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_no_target_is_noop() {
        let state = agent(EnemyArchetype::Grunt);
        let update = evaluate(&context(&state, None, 0.0), &mut rng());
        assert!(!update.mode_changed);
        assert_eq!(update.displacement.length(), 0.0);
        assert!(update.anim_speed.is_none());
        assert_eq!(update.state.wander_timer, 0.0);
    }

    #[test]
    fn test_stationary_never_moves() {
        let state = agent(EnemyArchetype::Sentry);
        let target = Some(Position::new(0.0, 10.0, 0.0));
        let update = evaluate(&context(&state, target, 0.0), &mut rng());
        assert_eq!(update.state.mode, AiMode::Wandering);
        assert_eq!(update.displacement.length(), 0.0);
        assert_eq!(update.anim_speed, Some(0.0));
        assert_eq!(update.state.wander_timer, 0.0);
    }

    #[test]
    fn test_wander_walks_then_idles() {
        let state = agent(EnemyArchetype::Grunt);
        let far_target = Some(Position::new(0.0, 25.0, 0.0));
        let update = evaluate(&context(&state, far_target, 0.0), &mut rng());
        assert!((update.displacement.x - 2.0 * DT).abs() < 1e-10);
        assert!((update.anim_speed.unwrap_or_default() - 0.5).abs() < 1e-10);
        assert!(!update.state.idle_waiting);

        let mut tired = update.state.clone();
        tired.wander_timer = 3.0 - DT / 2.0;
        let update = evaluate(&context(&tired, far_target, 0.0), &mut rng());
        assert!(update.state.idle_waiting);

        let idle = evaluate(&context(&update.state, far_target, 0.0), &mut rng());
        assert_eq!(idle.displacement.length(), 0.0);
        assert_eq!(idle.anim_speed, Some(0.0));
    }

    #[test]
    fn test_idle_ends_with_new_wander_target_in_radius() {
        let mut state = agent(EnemyArchetype::Grunt);
        state.idle_waiting = true;
        state.idle_timer = 1.0 - DT / 2.0;
        state.wander_timer = 2.0;

        let far_target = Some(Position::new(0.0, 25.0, 0.0));
        let update = evaluate(&context(&state, far_target, 0.0), &mut rng());
        assert!(!update.state.idle_waiting);
        assert_eq!(update.state.wander_timer, 0.0);
        let anchor = update.state.spawn_anchor;
        assert!(anchor.horizontal_distance_to(&update.state.wander_target) <= 5.0 + 1e-9);
    }

    #[test]
    fn test_arrival_starts_idle() {
        let mut state = agent(EnemyArchetype::Grunt);
        state.wander_target = Position::new(0.1, 0.0, 0.0);
        let update = evaluate(&context(&state, Some(Position::new(0.0, 25.0, 0.0)), 0.0), &mut rng());
        assert!(update.state.idle_waiting);
    }

    #[test]
    fn test_spawn_state_targets_within_radius() {
        let mut rng = rng();
        let anchor = Position::new(10.0, -4.0, 0.0);
        for _ in 0..100 {
            let state = spawn_state(EnemyArchetype::Grunt, anchor, &mut rng);
            assert_eq!(state.mode, AiMode::Wandering);
            assert!(state.last_attack_secs.is_none());
            assert!(anchor.horizontal_distance_to(&state.wander_target) <= 5.0 + 1e-9);
        }
    }
}
