//! Damage application: the single path every hit goes through.
//!
//! Applies damage to an entity's `Health`, fans the accepted hit out to the
//! entity's damage listeners, and handles the consequences (hurt and death
//! animations, enemy death timers, player lives and revive).

use hecs::{Entity, World};

use geneforge_combat::health::{DamageListener, DamageListeners, DamageNotice, DamageReport, Health};
use geneforge_combat::knockback::KnockbackReceiver;
use geneforge_core::components::*;
use geneforge_core::enums::AnimSignal;
use geneforge_core::events::SimEvent;
use geneforge_core::types::{ActorId, Position, Velocity};
use geneforge_enemy_ai::fsm::on_damaged;
use geneforge_enemy_ai::profiles::get_profile;

use crate::config::TuningConfig;
use crate::error::{SimError, SimResult};
use crate::score::ScoreState;

/// Per-tick outputs and tuning shared by every system that deals damage.
pub struct DamageSink<'a> {
    pub events: &'a mut Vec<SimEvent>,
    pub score: &'a mut ScoreState,
    pub tuning: &'a TuningConfig,
}

/// Apply `amount` damage to `target`. Rejected hits (invulnerable, dead,
/// non-positive amount, no health) come back as `DamageReport::Rejected`.
pub fn apply_damage(
    world: &mut World,
    target: Entity,
    target_id: ActorId,
    amount: f64,
    critical: bool,
    sink: &mut DamageSink,
) -> SimResult<DamageReport> {
    if !world.contains(target) {
        return Err(SimError::Despawned(target_id));
    }

    let invulnerable = world
        .get::<&Invulnerability>(target)
        .map(|inv| inv.remaining_secs > 0.0)
        .unwrap_or(false);
    if invulnerable {
        log::debug!("{target_id} is invulnerable, ignoring {amount} damage");
        return Ok(DamageReport::Rejected);
    }

    let report = match world.get::<&mut Health>(target) {
        Ok(mut health) => health.apply_damage(amount, critical),
        Err(_) => return Ok(DamageReport::Rejected),
    };
    let DamageReport::Applied {
        amount,
        critical,
        first_hit,
        remaining,
        died,
    } = report
    else {
        return Ok(report);
    };

    if first_hit {
        sink.events.push(SimEvent::FirstHit { actor: target_id });
    }
    sink.events.push(SimEvent::Damaged {
        actor: target_id,
        amount,
        critical,
        remaining,
    });

    let is_player = world.get::<&Player>(target).is_ok();
    if is_player {
        sink.score.damage_taken += amount;
    } else {
        sink.score.damage_dealt += amount;
    }

    notify_listeners(world, target, &report, died, sink);

    if is_player {
        player_hit(world, target, target_id, died, sink);
    } else if died {
        enemy_died(world, target, target_id, sink);
    } else {
        sink.events.push(SimEvent::Animation {
            actor: target_id,
            signal: AnimSignal::Damaged,
        });
    }

    Ok(report)
}

fn notify_listeners(
    world: &mut World,
    target: Entity,
    report: &DamageReport,
    died: bool,
    sink: &mut DamageSink,
) {
    let notices = match world.get::<&DamageListeners>(target) {
        Ok(listeners) => listeners.dispatch(report),
        Err(_) => return,
    };

    for (listener, notice) in notices {
        match (listener, notice) {
            (DamageListener::AiPause, DamageNotice::Damaged { .. }) if !died => {
                if let Ok(mut agent) = world.get::<&mut AiAgent>(target) {
                    on_damaged(&mut agent);
                }
            }
            (DamageListener::DamageText, DamageNotice::Damaged { amount, critical }) => {
                let Ok(origin) = world.get::<&Position>(target).map(|p| *p) else {
                    continue;
                };
                let text = &sink.tuning.damage_text;
                world.spawn((DamageText {
                    value: amount.ceil() as u32,
                    critical,
                    origin: Position::new(origin.x, origin.y, origin.z + text.height),
                    age_secs: 0.0,
                    fade_secs: text.fade_secs,
                    rise: text.rise,
                },));
            }
            (DamageListener::HealthBarReveal, DamageNotice::FirstHit) => {
                if let Ok(mut bar) = world.get::<&mut HealthBar>(target) {
                    bar.visible = true;
                }
            }
            _ => {}
        }
    }
}

fn enemy_died(world: &mut World, target: Entity, target_id: ActorId, sink: &mut DamageSink) {
    let death_secs = match world.get::<&mut AiAgent>(target) {
        Ok(mut agent) => {
            agent.pending_hit_secs = None;
            get_profile(agent.archetype).death_anim_secs
        }
        Err(_) => 0.0,
    };
    if let Ok(mut animator) = world.get::<&mut Animator>(target) {
        animator.speed = 0.0;
    }
    if let Ok(mut controller) = world.get::<&mut CharacterController>(target) {
        controller.enabled = false;
    }
    let _ = world.insert(
        target,
        (
            Dead,
            DeathTimer {
                remaining_secs: death_secs,
            },
        ),
    );

    sink.events.push(SimEvent::Animation {
        actor: target_id,
        signal: AnimSignal::Death,
    });
    sink.events.push(SimEvent::Died { actor: target_id });
    sink.score.enemies_killed += 1;
    log::info!("enemy {target_id} died");
}

fn player_hit(
    world: &mut World,
    target: Entity,
    target_id: ActorId,
    died: bool,
    sink: &mut DamageSink,
) {
    if !died {
        sink.events.push(SimEvent::Animation {
            actor: target_id,
            signal: AnimSignal::Damaged,
        });
        return;
    }

    let lives_remaining = match world.get::<&mut Lives>(target) {
        Ok(mut lives) => {
            lives.remaining = lives.remaining.saturating_sub(1);
            lives.remaining
        }
        Err(_) => 0,
    };

    if lives_remaining == 0 {
        let _ = world.insert_one(target, Dead);
        sink.events.push(SimEvent::Animation {
            actor: target_id,
            signal: AnimSignal::FinalDeath,
        });
        sink.events.push(SimEvent::Died { actor: target_id });
        sink.events.push(SimEvent::GameOver);
        log::info!("player {target_id} is out of lives");
        return;
    }

    sink.events.push(SimEvent::Animation {
        actor: target_id,
        signal: AnimSignal::Death,
    });
    revive_player(world, target, sink.tuning);
    sink.events.push(SimEvent::PlayerRevived { lives_remaining });
    log::info!("player {target_id} revived, {lives_remaining} lives left");
}

fn revive_player(world: &mut World, player: Entity, tuning: &TuningConfig) {
    if let Ok(mut health) = world.get::<&mut Health>(player) {
        health.revive(tuning.player.post_revive_fraction);
    }
    let respawn = world.get::<&RespawnPoint>(player).map(|r| r.0).ok();
    if let (Some(spawn), Ok(mut pos)) = (respawn, world.get::<&mut Position>(player)) {
        *pos = spawn;
    }
    if let Ok(mut inv) = world.get::<&mut Invulnerability>(player) {
        inv.remaining_secs = tuning.player.invulnerable_secs;
    }
    if let Ok(mut receiver) = world.get::<&mut KnockbackReceiver>(player) {
        receiver.velocity = glam::DVec3::ZERO;
    }
    if let Ok(mut body) = world.get::<&mut RigidBody>(player) {
        body.velocity = Velocity::default();
    }
}
