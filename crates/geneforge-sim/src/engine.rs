//! Simulation engine: the core of the arena.
//!
//! `SimulationEngine` owns the hecs ECS world, processes commands, runs all
//! systems, and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use geneforge_combat::chain::ChainSession;
use geneforge_combat::weapon::WeaponStats;
use geneforge_core::commands::SimCommand;
use geneforge_core::constants::{DT, MAX_TIME_SCALE};
use geneforge_core::enums::{GamePhase, ScenarioId};
use geneforge_core::events::SimEvent;
use geneforge_core::state::GameStateSnapshot;
use geneforge_core::types::{ActorId, SimTime};

use crate::config::TuningConfig;
use crate::error::SimResult;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::damage::DamageSink;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub tuning: TuningConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tuning: TuningConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    scenario: Option<ScenarioId>,
    rng: ChaCha8Rng,
    next_actor_id: u32,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,

    chains: BTreeMap<u32, ChainSession>,
    next_chain_id: u32,
    tuning: TuningConfig,
    weapon: WeaponStats,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            scenario: None,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_actor_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            chains: BTreeMap::new(),
            next_chain_id: 0,
            weapon: config.tuning.weapon.clone(),
            tuning: config.tuning,
            score: ScoreState::default(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one fixed tick, scaled by the time scale
    /// in effect after this tick's commands.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.step(None)
    }

    /// Advance the simulation by `dt` seconds of game time.
    pub fn tick_with(&mut self, dt: f64) -> GameStateSnapshot {
        self.step(Some(dt))
    }

    fn step(&mut self, dt: Option<f64>) -> GameStateSnapshot {
        self.process_commands();
        let dt = dt.unwrap_or(DT * self.time_scale);

        if self.phase == GamePhase::Active && dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
            if systems::player::is_defeated(&self.world) {
                self.phase = GamePhase::GameOver;
                log::info!(
                    "game over at {:.1}s, {}/{} enemies killed",
                    self.time.elapsed_secs,
                    self.score.enemies_killed,
                    self.score.enemies_total
                );
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: &self.time,
                phase: self.phase,
                time_scale: self.time_scale,
                scenario: self.scenario,
                chains: &self.chains,
                score: &self.score,
            },
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Resolve an actor id to its entity.
    pub fn actor_entity(&self, id: ActorId) -> SimResult<Entity> {
        systems::actor_entity(&self.world, id)
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Current weapon stats, upgrades included.
    pub fn weapon(&self) -> &WeaponStats {
        &self.weapon
    }

    /// Chain sessions still resolving hops.
    pub fn chains(&self) -> &BTreeMap<u32, ChainSession> {
        &self.chains
    }

    /// Mutable world access for tests that stage a situation directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an extra enemy (for tests needing a specific layout).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        archetype: geneforge_core::enums::EnemyArchetype,
        position: geneforge_core::types::Position,
    ) -> ActorId {
        world_setup::spawn_enemy(
            &mut self.world,
            &mut self.rng,
            &mut self.next_actor_id,
            archetype,
            position,
        );
        self.score.enemies_total += 1;
        ActorId(self.next_actor_id)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::StartArena { scenario } => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.reset();
                    self.score.enemies_total = world_setup::setup_arena(
                        &mut self.world,
                        &mut self.rng,
                        &mut self.next_actor_id,
                        scenario,
                        &self.tuning.player,
                    );
                    self.scenario = Some(scenario);
                    self.phase = GamePhase::Active;
                    log::info!(
                        "arena {scenario:?} started with {} enemies",
                        self.score.enemies_total
                    );
                } else {
                    log::warn!("StartArena ignored in phase {:?}", self.phase);
                }
            }
            SimCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            SimCommand::SetTimeScale { scale } => {
                self.time_scale = if scale.is_nan() {
                    0.0
                } else {
                    scale.clamp(0.0, MAX_TIME_SCALE)
                };
            }
            SimCommand::ReturnToMenu => {
                self.reset();
                self.phase = GamePhase::MainMenu;
            }
            SimCommand::UpgradeWeapon { upgrade } => {
                self.weapon.apply_upgrade(upgrade);
                log::debug!("weapon upgraded: {upgrade:?}");
            }
            SimCommand::MovePlayer { position } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                if let Err(e) = systems::player::move_player(&mut self.world, position) {
                    log::warn!("MovePlayer ignored: {e}");
                }
            }
            SimCommand::Fire { heading } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                let result = systems::player::fire(
                    &mut self.world,
                    &mut self.rng,
                    &mut self.next_actor_id,
                    heading,
                    &self.weapon,
                    self.tuning.chain.enabled,
                    &mut self.score,
                    &mut self.events,
                );
                if let Err(e) = result {
                    log::warn!("Fire ignored: {e}");
                }
            }
            SimCommand::AttackHit { actor } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                let mut sink = DamageSink {
                    events: &mut self.events,
                    score: &mut self.score,
                    tuning: &self.tuning,
                };
                let result = systems::actor_entity(&self.world, actor).and_then(|attacker| {
                    systems::attack::resolve_attack_hit(&mut self.world, attacker, actor, &mut sink)
                });
                if let Err(e) = result {
                    log::warn!("AttackHit ignored: {e}");
                }
            }
        }
    }

    /// Clear the arena and all per-run state. Weapon upgrades are kept.
    fn reset(&mut self) {
        self.world.clear();
        self.chains.clear();
        self.next_chain_id = 0;
        self.next_actor_id = 0;
        self.score = ScoreState::default();
        self.time = SimTime::default();
        self.scenario = None;
    }

    /// Run all systems in order for one tick of `dt` seconds.
    fn run_systems(&mut self, dt: f64) {
        let now_secs = self.time.elapsed_secs + dt;
        let mut sink = DamageSink {
            events: &mut self.events,
            score: &mut self.score,
            tuning: &self.tuning,
        };

        // 1. Enemy AI (FSM, movement, attack starts)
        systems::enemy_ai::run(&mut self.world, &mut self.rng, now_secs, dt, sink.events);

        // 2. Scheduled attack hits
        systems::attack::run(&mut self.world, dt, &mut sink);

        // 3. Projectiles; chains started here wait a tick before their next hop
        let mut new_chains = Vec::new();
        systems::projectile::run(
            &mut self.world,
            dt,
            &mut new_chains,
            &mut self.next_chain_id,
            &mut sink,
        );

        // 4. Chain sessions
        systems::chain::run(&mut self.world, &mut self.chains, dt, &mut sink);
        for session in new_chains {
            self.chains.insert(session.id, session);
        }

        // 5. Knockback routines and controller gravity
        systems::knockback::run(&mut self.world, dt);

        // 6. Player timers
        systems::player::run(&mut self.world, dt);

        // 7. Damage numbers
        systems::damage_text::run(&mut self.world, dt);

        // 8. Death timers and out-of-arena projectiles
        systems::cleanup::run(&mut self.world, dt, &mut self.despawn_buffer);
    }
}
