//! Running score for a run. Stored in `SimulationEngine`, not as ECS entities.

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub enemies_killed: u32,
    pub enemies_total: u32,
    pub shots_fired: u32,
    pub chain_hops: u32,
    pub damage_dealt: f64,
    pub damage_taken: f64,
}
