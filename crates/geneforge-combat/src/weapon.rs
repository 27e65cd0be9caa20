//! Player weapon stats, upgrades and critical rolls.

use geneforge_core::constants::*;
use geneforge_core::enums::WeaponUpgrade;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    /// Seconds between shots.
    pub fire_rate: f64,
    pub projectile_speed: f64,
    pub damage: f64,
    /// Scale multiplier for the projectile (drives its hit radius).
    pub projectile_size: f64,
    pub knockback_force: f64,
    /// 0..1
    pub crit_chance: f64,
    pub crit_multiplier: f64,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            fire_rate: WEAPON_FIRE_RATE,
            projectile_speed: WEAPON_PROJECTILE_SPEED,
            damage: WEAPON_DAMAGE,
            projectile_size: WEAPON_PROJECTILE_SIZE,
            knockback_force: WEAPON_KNOCKBACK_FORCE,
            crit_chance: WEAPON_CRIT_CHANCE,
            crit_multiplier: WEAPON_CRIT_MULTIPLIER,
        }
    }
}

/// Damage of a single shot after the critical roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRoll {
    pub damage: f64,
    pub critical: bool,
}

impl WeaponStats {
    pub fn apply_upgrade(&mut self, upgrade: WeaponUpgrade) {
        match upgrade {
            WeaponUpgrade::FireRate(delta) => {
                self.fire_rate = (self.fire_rate - delta).max(MIN_FIRE_RATE)
            }
            WeaponUpgrade::ProjectileSpeed(delta) => self.projectile_speed += delta,
            WeaponUpgrade::Damage(delta) => self.damage += delta,
            WeaponUpgrade::ProjectileSize(delta) => {
                self.projectile_size = (self.projectile_size + delta).max(MIN_PROJECTILE_SIZE)
            }
            WeaponUpgrade::Knockback(delta) => {
                self.knockback_force = (self.knockback_force + delta).max(0.0)
            }
            WeaponUpgrade::CritChance(delta) => {
                self.crit_chance = (self.crit_chance + delta).clamp(0.0, 1.0)
            }
            WeaponUpgrade::CritMultiplier(delta) => {
                self.crit_multiplier = (self.crit_multiplier + delta).max(1.0)
            }
        }
    }

    /// Collision radius of projectiles fired with these stats.
    pub fn projectile_radius(&self) -> f64 {
        PROJECTILE_RADIUS_PER_SIZE * self.projectile_size
    }
}

/// Roll a shot: critical when the roll lands at or under the crit chance.
/// A zero chance never crits.
pub fn roll_shot<R: Rng + ?Sized>(stats: &WeaponStats, rng: &mut R) -> ShotRoll {
    let roll: f64 = rng.gen();
    let critical = stats.crit_chance > 0.0 && roll <= stats.crit_chance;
    let damage = if critical {
        stats.damage * stats.crit_multiplier
    } else {
        stats.damage
    };
    ShotRoll { damage, critical }
}
