//! Tuning configuration: weapon, chain lightning, player and damage text.
//!
//! Every field has a default, so a config file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use geneforge_combat::chain::{ChainTuning, HopDamage};
use geneforge_combat::weapon::WeaponStats;
use geneforge_core::constants::*;
use geneforge_core::enums::KnockbackMethod;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub weapon: WeaponStats,
    pub chain: ChainTuning,
    pub player: PlayerTuning,
    pub damage_text: DamageTextTuning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_hp: f64,
    pub lives: u32,
    /// Seconds of damage immunity after a revive.
    pub invulnerable_secs: f64,
    /// Fraction of max HP restored on revive.
    pub post_revive_fraction: f64,
    pub hit_radius: f64,
    /// Which capability absorbs enemy knockback.
    pub knockback: KnockbackMethod,
    pub body_mass: f64,
    pub body_drag: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_hp: PLAYER_MAX_HP,
            lives: PLAYER_LIVES,
            invulnerable_secs: PLAYER_INVULNERABLE_SECS,
            post_revive_fraction: PLAYER_POST_REVIVE_FRACTION,
            hit_radius: PLAYER_HIT_RADIUS,
            knockback: KnockbackMethod::Receiver,
            body_mass: 1.0,
            body_drag: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageTextTuning {
    /// Spawn height above the damaged actor.
    pub height: f64,
    pub fade_secs: f64,
    pub rise: f64,
}

impl Default for DamageTextTuning {
    fn default() -> Self {
        Self {
            height: DAMAGE_TEXT_HEIGHT,
            fade_secs: DAMAGE_TEXT_FADE_SECS,
            rise: DAMAGE_TEXT_RISE,
        }
    }
}

impl TuningConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TuningConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded tuning config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weapon;
        positive("weapon.fire_rate", w.fire_rate)?;
        positive("weapon.projectile_speed", w.projectile_speed)?;
        positive("weapon.projectile_size", w.projectile_size)?;
        non_negative("weapon.damage", w.damage)?;
        non_negative("weapon.knockback_force", w.knockback_force)?;
        if !(0.0..=1.0).contains(&w.crit_chance) {
            return Err(invalid("weapon.crit_chance", "must be within 0..=1"));
        }
        if w.crit_multiplier.is_nan() || w.crit_multiplier < 1.0 {
            return Err(invalid("weapon.crit_multiplier", "must be at least 1"));
        }

        let c = &self.chain;
        non_negative("chain.radius", c.radius)?;
        non_negative("chain.hop_delay_secs", c.hop_delay_secs)?;
        if let HopDamage::Fixed(amount) = c.hop_damage {
            positive("chain.hop_damage", amount)?;
        }

        let p = &self.player;
        positive("player.max_hp", p.max_hp)?;
        positive("player.hit_radius", p.hit_radius)?;
        positive("player.body_mass", p.body_mass)?;
        non_negative("player.body_drag", p.body_drag)?;
        non_negative("player.invulnerable_secs", p.invulnerable_secs)?;
        if p.lives == 0 {
            return Err(invalid("player.lives", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&p.post_revive_fraction) {
            return Err(invalid("player.post_revive_fraction", "must be within 0..=1"));
        }

        positive("damage_text.fade_secs", self.damage_text.fade_secs)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be non-negative, got {value}"),
        })
    }
}
