//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use std::collections::BTreeMap;

use hecs::World;

use geneforge_combat::chain::ChainSession;
use geneforge_combat::health::Health;
use geneforge_core::components::*;
use geneforge_core::enums::{GamePhase, ScenarioId};
use geneforge_core::events::SimEvent;
use geneforge_core::state::*;
use geneforge_core::types::{Position, SimTime, Velocity};

use crate::score::ScoreState;

/// Engine-owned state that goes into a snapshot next to the world.
pub struct SnapshotContext<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    pub scenario: Option<ScenarioId>,
    pub chains: &'a BTreeMap<u32, ChainSession>,
    pub score: &'a ScoreState,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *ctx.time,
        phase: ctx.phase,
        time_scale: ctx.time_scale,
        scenario: ctx.scenario,
        player: build_player(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        chains: build_chains(ctx.chains),
        damage_texts: build_damage_texts(world),
        events,
        score: ScoreView {
            enemies_killed: ctx.score.enemies_killed,
            enemies_total: ctx.score.enemies_total,
            shots_fired: ctx.score.shots_fired,
            chain_hops: ctx.score.chain_hops,
            damage_dealt: ctx.score.damage_dealt,
            damage_taken: ctx.score.damage_taken,
            run_time_secs: ctx.time.elapsed_secs,
        },
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(
            &Player,
            &Actor,
            &Position,
            &Health,
            &Lives,
            &Invulnerability,
            Option<&Dead>,
        )>()
        .iter()
        .next()
        .map(|(_, (_, actor, pos, health, lives, inv, dead))| PlayerView {
            id: actor.id,
            position: *pos,
            hp: health.current(),
            max_hp: health.maximum(),
            lives: lives.remaining,
            invulnerable: inv.remaining_secs > 0.0,
            alive: dead.is_none(),
        })
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(
            &Actor,
            &AiAgent,
            &Position,
            &Facing,
            &Animator,
            &Health,
            &HealthBar,
            Option<&Dead>,
        )>()
        .iter()
        .map(
            |(_, (actor, agent, pos, facing, animator, health, bar, dead))| EnemyView {
                id: actor.id,
                archetype: agent.archetype,
                position: *pos,
                heading: facing.heading,
                mode: agent.mode,
                paused: agent.damage_paused,
                anim_speed: animator.speed,
                alive: dead.is_none(),
                health_bar: bar.visible.then(|| HealthBarView {
                    fraction: health.fraction(),
                    band: health.band(),
                }),
            },
        )
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

/// Hidden projectiles are carrying a chain and are not drawn.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Actor, &Projectile, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (_, projectile, _, _))| !projectile.hidden)
        .map(|(_, (actor, projectile, pos, vel))| ProjectileView {
            id: actor.id,
            position: *pos,
            heading: vel.heading(),
            radius: projectile.radius,
            critical: projectile.critical,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_chains(chains: &BTreeMap<u32, ChainSession>) -> Vec<ChainView> {
    chains
        .values()
        .map(|session| ChainView {
            session: session.id,
            anchor: session.anchor,
            hops: session.hops,
            max_hops: session.max_hops,
            visited: session.visited.iter().copied().collect(),
        })
        .collect()
}

fn build_damage_texts(world: &World) -> Vec<DamageTextView> {
    world
        .query::<&DamageText>()
        .iter()
        .map(|(_, text)| {
            let progress = (text.age_secs / text.fade_secs).clamp(0.0, 1.0);
            DamageTextView {
                value: text.value,
                critical: text.critical,
                position: Position::new(
                    text.origin.x,
                    text.origin.y,
                    text.origin.z + text.rise * progress,
                ),
                alpha: 1.0 - progress,
            }
        })
        .collect()
}
