#[cfg(test)]
mod tests {
    use crate::commands::SimCommand;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{heading_vector, ActorId, Position, SimTime, Velocity};

    #[test]
    fn test_ai_mode_serde() {
        let variants = vec![AiMode::Wandering, AiMode::Chasing, AiMode::Attacking];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: AiMode = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_weapon_upgrade_wire_format() {
        let upgrade = WeaponUpgrade::CritChance(0.1);
        let json = serde_json::to_string(&upgrade).unwrap();
        assert_eq!(json, r#"{"stat":"CritChance","delta":0.1}"#);
        let back: WeaponUpgrade = serde_json::from_str(&json).unwrap();
        assert_eq!(upgrade, back);
    }

    /// Verify SimCommand round-trips through serde (tagged union).
    #[test]
    fn test_sim_command_serde() {
        let commands = vec![
            SimCommand::StartArena {
                scenario: ScenarioId::Medium,
            },
            SimCommand::MovePlayer {
                position: Position::new(1.0, 2.0, 0.0),
            },
            SimCommand::Fire { heading: 1.25 },
            SimCommand::AttackHit { actor: ActorId(4) },
            SimCommand::UpgradeWeapon {
                upgrade: WeaponUpgrade::Damage(2.0),
            },
            SimCommand::SetTimeScale { scale: 2.0 },
            SimCommand::Pause,
            SimCommand::Resume,
            SimCommand::ReturnToMenu,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: SimCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_command_parses_from_frontend_json() {
        let cmd: SimCommand = serde_json::from_str(r#"{"type":"AttackHit","actor":7}"#).unwrap();
        match cmd {
            SimCommand::AttackHit { actor } => assert_eq!(actor, ActorId(7)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::FirstHit { actor: ActorId(2) },
            SimEvent::Animation {
                actor: ActorId(2),
                signal: AnimSignal::Attack(AttackVariant::AttackB),
            },
            SimEvent::KnockbackApplied {
                target: ActorId(1),
                method: KnockbackMethod::Receiver,
            },
            SimEvent::ChainHop {
                session: 1,
                target: ActorId(5),
                from: Position::new(0.0, 0.0, 0.0),
                to: Position::new(2.0, 0.0, 0.0),
                hop: 1,
            },
            SimEvent::GameOver,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(back.player.is_none());
    }

    #[test]
    fn test_actor_id_ordering() {
        let mut ids = vec![ActorId(9), ActorId(2), ActorId(5)];
        ids.sort();
        assert_eq!(ids, vec![ActorId(2), ActorId(5), ActorId(9)]);
        assert_eq!(ActorId(3).to_string(), "#3");
    }

    #[test]
    fn test_position_distances() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 12.0);
        assert!((a.distance_to(&b) - 13.0).abs() < 1e-10);
        assert!((a.horizontal_distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_position_heading() {
        let origin = Position::new(0.0, 0.0, 0.0);

        let north = Position::new(0.0, 10.0, 0.0);
        assert!(origin.heading_to(&north).abs() < 1e-10);

        let east = Position::new(10.0, 0.0, 0.0);
        assert!((origin.heading_to(&east) - std::f64::consts::FRAC_PI_2).abs() < 1e-10);

        let west = Position::new(-10.0, 0.0, 0.0);
        assert!((origin.heading_to(&west) - 3.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    }

    #[test]
    fn test_velocity_from_heading() {
        let v = Velocity::from_heading(std::f64::consts::FRAC_PI_2, 4.0);
        assert!((v.x - 4.0).abs() < 1e-10);
        assert!(v.y.abs() < 1e-10);
        assert!((v.horizontal_speed() - 4.0).abs() < 1e-10);
        assert!((v.heading() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);

        let dir = heading_vector(0.0);
        assert!((dir.y - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance(1.0 / 30.0);
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }
}
