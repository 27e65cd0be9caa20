//! Scenario definitions: hardcoded arena layouts.
//!
//! Each scenario places the player and a fixed roster of enemies around it,
//! by bearing and range from the arena center.

use std::f64::consts::PI;

use geneforge_core::enums::{EnemyArchetype, ScenarioId};
use geneforge_core::types::Position;

/// One enemy placement.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub archetype: EnemyArchetype,
    pub position: Position,
}

impl EnemySpawn {
    /// Place an enemy at `range` units from the center along `bearing` (0 = North).
    pub fn at_bearing(archetype: EnemyArchetype, bearing: f64, range: f64) -> Self {
        Self {
            archetype,
            position: Position::new(range * bearing.sin(), range * bearing.cos(), 0.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArenaLayout {
    pub player_spawn: Position,
    pub enemies: Vec<EnemySpawn>,
}

/// Build the arena layout for a given scenario.
pub fn build_layout(scenario: ScenarioId) -> ArenaLayout {
    match scenario {
        ScenarioId::Easy => build_easy(),
        ScenarioId::Medium => build_medium(),
        ScenarioId::Hard => build_hard(),
    }
}

/// Easy: three grunts spread out to the north.
fn build_easy() -> ArenaLayout {
    use EnemyArchetype::Grunt;
    ArenaLayout {
        player_spawn: Position::default(),
        enemies: vec![
            EnemySpawn::at_bearing(Grunt, -0.4, 14.0),
            EnemySpawn::at_bearing(Grunt, 0.0, 16.0),
            EnemySpawn::at_bearing(Grunt, 0.4, 14.0),
        ],
    }
}

/// Medium: a grunt pack on two axes, a brute behind them, and a sentry
/// guarding the east flank.
fn build_medium() -> ArenaLayout {
    use EnemyArchetype::*;
    let east = PI / 2.0;
    ArenaLayout {
        player_spawn: Position::default(),
        enemies: vec![
            EnemySpawn::at_bearing(Grunt, -0.2, 12.0),
            EnemySpawn::at_bearing(Grunt, 0.2, 12.0),
            EnemySpawn::at_bearing(Grunt, east - 0.2, 15.0),
            EnemySpawn::at_bearing(Grunt, east + 0.2, 15.0),
            EnemySpawn::at_bearing(Brute, 0.0, 18.0),
            EnemySpawn::at_bearing(Sentry, east, 6.0),
        ],
    }
}

/// Hard: tight clusters from three axes (chain lightning fodder),
/// two brutes, and sentries close to the spawn.
fn build_hard() -> ArenaLayout {
    use EnemyArchetype::*;
    let north = 0.0;
    let east = PI / 2.0;
    let southwest = PI * 1.25;

    let mut enemies = Vec::new();
    for axis in [north, east, southwest] {
        enemies.push(EnemySpawn::at_bearing(Grunt, axis - 0.1, 13.0));
        enemies.push(EnemySpawn::at_bearing(Grunt, axis + 0.1, 13.0));
        enemies.push(EnemySpawn::at_bearing(Grunt, axis, 15.0));
    }
    enemies.push(EnemySpawn::at_bearing(Brute, north, 19.0));
    enemies.push(EnemySpawn::at_bearing(Brute, southwest, 19.0));
    enemies.push(EnemySpawn::at_bearing(Sentry, PI, 5.0));
    enemies.push(EnemySpawn::at_bearing(Sentry, PI * 1.75, 5.0));

    ArenaLayout {
        player_spawn: Position::default(),
        enemies,
    }
}
