//! Per-level difficulty
//!
//! Invader speed and bomb parameters scale linearly with the level number.
//! Level 1 is already scaled once: the multiplier is `level * factor`.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// Parameters resolved once when a level starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    pub ship_speed: f32,
    pub invader_initial_velocity: f32,
    pub bomb_rate: f32,
    pub bomb_min_velocity: f32,
    pub bomb_max_velocity: f32,
}

impl LevelParams {
    /// Scale the base config for `level`; `ship_speed` is the session's
    /// current ship speed, which grows as levels are won.
    pub fn resolve(config: &GameConfig, level: u32, ship_speed: f32) -> Self {
        let scale = 1.0 + level as f32 * config.level_difficulty_multiplier;
        Self {
            ship_speed,
            invader_initial_velocity: config.invader_initial_velocity * scale,
            bomb_rate: config.bomb_rate * scale,
            bomb_min_velocity: config.bomb_min_velocity * scale,
            bomb_max_velocity: config.bomb_max_velocity * scale,
        }
    }
}

/// Wall strength a level starts with after winning into `level`.
/// Higher levels start with a thinner cushion, down to a fixed floor.
pub fn rebased_score(level: u32) -> i32 {
    if level <= REBASE_MAX_LEVEL {
        STARTING_SCORE - REBASE_STEP * level as i32
    } else {
        REBASE_FLOOR
    }
}
