//! Chain lightning resolution.
//!
//! A chain session starts on a chain-capable projectile's first strike and
//! repeatedly jumps to the nearest unvisited live target around its current
//! anchor, one hop per `hop_delay_secs`, until it runs out of hops or targets.

use std::collections::BTreeSet;

use geneforge_core::constants::*;
use geneforge_core::types::{ActorId, Position};
use serde::{Deserialize, Serialize};

/// Damage dealt by each hop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount")]
pub enum HopDamage {
    Fixed(f64),
    /// The target's full max HP.
    Lethal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainTuning {
    pub enabled: bool,
    pub radius: f64,
    pub hop_damage: HopDamage,
    pub max_hops: u32,
    pub hop_delay_secs: f64,
}

impl Default for ChainTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: CHAIN_RADIUS,
            hop_damage: HopDamage::Fixed(CHAIN_HOP_DAMAGE),
            max_hops: CHAIN_MAX_HOPS,
            hop_delay_secs: CHAIN_HOP_DELAY_SECS,
        }
    }
}

/// A damageable actor found by a spatial query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainCandidate {
    pub id: ActorId,
    pub position: Position,
    pub alive: bool,
}

/// Sphere overlap over the world's damageable actors. Result order is unspecified.
pub trait SpatialQuery {
    fn overlap_sphere(&self, center: Position, radius: f64) -> Vec<ChainCandidate>;
}

impl SpatialQuery for [ChainCandidate] {
    fn overlap_sphere(&self, center: Position, radius: f64) -> Vec<ChainCandidate> {
        self.iter()
            .filter(|c| c.position.distance_to(&center) <= radius)
            .copied()
            .collect()
    }
}

impl SpatialQuery for Vec<ChainCandidate> {
    fn overlap_sphere(&self, center: Position, radius: f64) -> Vec<ChainCandidate> {
        self.as_slice().overlap_sphere(center, radius)
    }
}

/// Nearest live, unvisited candidate within `radius` of `anchor`.
/// Equal distances go to the lowest `ActorId`.
pub fn select_next(
    anchor: Position,
    radius: f64,
    candidates: &[ChainCandidate],
    visited: &BTreeSet<ActorId>,
) -> Option<ChainCandidate> {
    candidates
        .iter()
        .filter(|c| c.alive && !visited.contains(&c.id))
        .map(|c| (c.position.distance_to(&anchor), c))
        .filter(|(d, _)| *d <= radius)
        .min_by(|(da, a), (db, b)| da.total_cmp(db).then(a.id.cmp(&b.id)))
        .map(|(_, c)| *c)
}

/// One resolved hop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainHop {
    pub target: ActorId,
    pub from: Position,
    pub to: Position,
    /// 1-based hop number.
    pub hop: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HopOutcome {
    /// Hop delay still running.
    Waiting,
    Hop(ChainHop),
    /// No more hops; the session is over.
    Finished,
}

/// An in-progress chain.
#[derive(Debug, Clone)]
pub struct ChainSession {
    pub id: u32,
    /// Projectile that started the chain.
    pub projectile: ActorId,
    pub anchor: Position,
    pub visited: BTreeSet<ActorId>,
    pub hops: u32,
    pub max_hops: u32,
    pub radius: f64,
    pub hop_damage: HopDamage,
    pub hop_delay: f64,
    pub delay_remaining: f64,
    pub finished: bool,
}

impl ChainSession {
    /// Session anchored on the struck target, which counts as visited.
    /// The first hop is due immediately.
    pub fn start(
        id: u32,
        projectile: ActorId,
        struck: ActorId,
        anchor: Position,
        tuning: &ChainTuning,
    ) -> Self {
        Self {
            id,
            projectile,
            anchor,
            visited: BTreeSet::from([struck]),
            hops: 0,
            max_hops: tuning.max_hops,
            radius: tuning.radius,
            hop_damage: tuning.hop_damage,
            hop_delay: tuning.hop_delay_secs,
            delay_remaining: 0.0,
            finished: tuning.max_hops == 0,
        }
    }

    /// Advance the hop clock by `dt` and resolve a hop if one is due.
    pub fn next_hop<Q: SpatialQuery + ?Sized>(&mut self, dt: f64, query: &Q) -> HopOutcome {
        if self.finished {
            return HopOutcome::Finished;
        }

        self.delay_remaining -= dt;
        if self.delay_remaining > 1e-9 {
            return HopOutcome::Waiting;
        }

        let candidates = query.overlap_sphere(self.anchor, self.radius);
        let Some(next) = select_next(self.anchor, self.radius, &candidates, &self.visited) else {
            log::debug!(
                "chain {} out of targets after {} hops ({} in radius)",
                self.id,
                self.hops,
                candidates.len()
            );
            self.finished = true;
            return HopOutcome::Finished;
        };

        let from = self.anchor;
        self.visited.insert(next.id);
        self.anchor = next.position;
        self.hops += 1;
        self.delay_remaining = self.hop_delay;
        if self.hops >= self.max_hops {
            self.finished = true;
        }

        HopOutcome::Hop(ChainHop {
            target: next.id,
            from,
            to: next.position,
            hop: self.hops,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
