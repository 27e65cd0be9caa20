//! Entity spawn factories for setting up the arena.
//!
//! Creates the player, enemies and projectiles with appropriate
//! component bundles.

use hecs::{Entity, EntityBuilder, World};
use rand_chacha::ChaCha8Rng;

use geneforge_combat::health::{DamageListener, DamageListeners, Health};
use geneforge_combat::knockback::KnockbackReceiver;
use geneforge_combat::weapon::{ShotRoll, WeaponStats};
use geneforge_core::components::*;
use geneforge_core::constants::*;
use geneforge_core::enums::{EnemyArchetype, KnockbackMethod, ScenarioId};
use geneforge_core::types::{ActorId, Position, Velocity};
use geneforge_enemy_ai::fsm::spawn_state;
use geneforge_enemy_ai::profiles::get_profile;

use crate::config::PlayerTuning;
use crate::scenario::build_layout;

/// Hand out the next actor id.
pub fn allocate_id(next_actor_id: &mut u32) -> ActorId {
    *next_actor_id += 1;
    ActorId(*next_actor_id)
}

/// Set up the arena for a scenario: the player and every enemy.
/// Returns the number of enemies spawned.
pub fn setup_arena(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_actor_id: &mut u32,
    scenario: ScenarioId,
    player: &PlayerTuning,
) -> u32 {
    let layout = build_layout(scenario);
    spawn_player(world, next_actor_id, layout.player_spawn, player);
    for spawn in &layout.enemies {
        spawn_enemy(world, rng, next_actor_id, spawn.archetype, spawn.position);
    }
    layout.enemies.len() as u32
}

/// Spawn the player with health, lives and the configured knockback capability.
pub fn spawn_player(
    world: &mut World,
    next_actor_id: &mut u32,
    position: Position,
    tuning: &PlayerTuning,
) -> Entity {
    let mut builder = EntityBuilder::new();
    builder
        .add(Actor {
            id: allocate_id(next_actor_id),
        })
        .add(Player)
        .add(position)
        .add(Facing::default())
        .add(Health::new(tuning.max_hp))
        .add(DamageListeners::new([DamageListener::DamageText]))
        .add(Lives {
            remaining: tuning.lives,
            max: tuning.lives,
        })
        .add(Invulnerability {
            remaining_secs: 0.0,
        })
        .add(RespawnPoint(position))
        .add(HitRadius(tuning.hit_radius))
        .add(FireCooldown::default())
        .add(CharacterController {
            enabled: true,
            grounded_z: position.z,
            vertical_speed: 0.0,
        });

    match tuning.knockback {
        KnockbackMethod::Receiver => {
            builder.add(KnockbackReceiver::default());
        }
        KnockbackMethod::Body => {
            builder.add(RigidBody {
                velocity: Velocity::default(),
                mass: tuning.body_mass,
                drag: tuning.body_drag,
            });
        }
        KnockbackMethod::Controller => {}
    }

    world.spawn(builder.build())
}

/// Spawn an enemy of the given archetype with its profile stats.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_actor_id: &mut u32,
    archetype: EnemyArchetype,
    position: Position,
) -> Entity {
    let profile = get_profile(archetype);
    let mut builder = EntityBuilder::new();
    builder
        .add(Actor {
            id: allocate_id(next_actor_id),
        })
        .add(Enemy)
        .add(position)
        .add(Facing {
            heading: position.heading_to(&Position::default()),
        })
        .add(Animator::default())
        .add(spawn_state(archetype, position, rng))
        .add(Health::new(profile.max_health))
        .add(DamageListeners::new([
            DamageListener::AiPause,
            DamageListener::DamageText,
            DamageListener::HealthBarReveal,
        ]))
        .add(HealthBar::default())
        .add(HitRadius(profile.hit_radius))
        .add(CharacterController {
            enabled: true,
            grounded_z: position.z,
            vertical_speed: 0.0,
        });
    world.spawn(builder.build())
}

/// Spawn a projectile at the muzzle, moving along `heading`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    world: &mut World,
    next_actor_id: &mut u32,
    owner: ActorId,
    origin: Position,
    heading: f64,
    shot: ShotRoll,
    stats: &WeaponStats,
    chains: bool,
) -> (Entity, ActorId) {
    let id = allocate_id(next_actor_id);
    let muzzle = Position::new(origin.x, origin.y, origin.z + MUZZLE_HEIGHT);
    let entity = world.spawn((
        Actor { id },
        Projectile {
            owner,
            damage: shot.damage,
            critical: shot.critical,
            knockback_force: stats.knockback_force,
            radius: stats.projectile_radius(),
            age_secs: 0.0,
            lifetime_secs: PROJECTILE_LIFETIME_SECS,
            chains,
            hidden: false,
        },
        muzzle,
        Velocity::from_heading(heading, stats.projectile_speed),
    ));
    (entity, id)
}
