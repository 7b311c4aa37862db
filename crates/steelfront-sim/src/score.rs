//! Running score and battle-outcome state tracked by the engine.
//!
//! Stored in `BattleEngine`, NOT as ECS entities.

use steelfront_core::constants::{STARTING_RESEARCH, STARTING_SILVER};

#[derive(Debug, Clone)]
pub struct ScoreState {
    pub enemies_destroyed: u32,
    pub enemies_total: u32,
    pub allies_lost: u32,
    pub allies_total: u32,
    pub objectives_captured: u32,
    pub objectives_total: u32,
    pub silver: u64,
    pub research: u64,
    /// Latched when the player vehicle is destroyed.
    pub player_destroyed: bool,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            enemies_destroyed: 0,
            enemies_total: 0,
            allies_lost: 0,
            allies_total: 0,
            objectives_captured: 0,
            objectives_total: 0,
            silver: STARTING_SILVER,
            research: STARTING_RESEARCH,
            player_destroyed: false,
        }
    }
}

impl ScoreState {
    pub fn allies_alive(&self) -> u32 {
        self.allies_total.saturating_sub(self.allies_lost)
    }

    /// Every objective taken; a battle without objectives is never won this way.
    pub fn all_objectives_captured(&self) -> bool {
        self.objectives_total > 0 && self.objectives_captured >= self.objectives_total
    }
}
